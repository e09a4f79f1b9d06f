//! Difficulty tables.
//!
//! Each family's progression is a literal, ordered table of [`LevelConfig`]
//! rows. Resolution picks the last row whose `required_score` is at or below
//! the input and clamps to the first row for anything lower, so lookups never
//! fail.

use serde::Serialize;

use crate::problem_engine::models::EquationType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub level: u8,
    pub min_number: i32,
    pub max_number: i32,
    pub required_score: i32,
    /// Sub-styles unlocked at this level (empty for families without any).
    pub equation_types: &'static [EquationType],
    pub complexity: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProblemFamily {
    Equation,
    Multiplication,
    WholePart,
}

const SIMPLE: &[EquationType] = &[EquationType::Simple];
const WITH_PARENS: &[EquationType] = &[EquationType::Simple, EquationType::WithParentheses];
const ALL_EQUATIONS: &[EquationType] = &[
    EquationType::Simple,
    EquationType::WithParentheses,
    EquationType::WithMultiplication,
];

const fn equation_level(
    level: u8, max_number: i32, required_score: i32,
    equation_types: &'static [EquationType], complexity: f64, description: &'static str,
) -> LevelConfig {
    LevelConfig {
        level,
        min_number: 1,
        max_number,
        required_score,
        equation_types,
        complexity,
        description,
    }
}

pub static EQUATION_LEVELS: [LevelConfig; 9] = [
    equation_level(1,  10,   0, SIMPLE,        1.0, "Find x with numbers up to 10"),
    equation_level(2,  20,  50, SIMPLE,        1.5, "Find x with numbers up to 20"),
    equation_level(3,  30, 100, WITH_PARENS,   2.0, "Brackets appear, numbers up to 30"),
    equation_level(4,  50, 150, WITH_PARENS,   2.5, "Brackets with numbers up to 50"),
    equation_level(5,  70, 200, WITH_PARENS,   3.0, "Brackets with numbers up to 70"),
    equation_level(6, 100, 250, ALL_EQUATIONS, 3.5, "Multiplication appears, numbers up to 100"),
    equation_level(7, 130, 300, ALL_EQUATIONS, 4.0, "Mixed equations up to 130"),
    equation_level(8, 160, 350, ALL_EQUATIONS, 4.5, "Mixed equations up to 160"),
    equation_level(9, 200, 400, ALL_EQUATIONS, 5.0, "Mixed equations up to 200"),
];

const fn multiplication_level(
    level: u8,
    complexity: f64,
    description: &'static str,
) -> LevelConfig {
    LevelConfig {
        level,
        min_number: 1,
        max_number: level as i32 + 1,
        required_score: (level as i32 - 1) * 30,
        equation_types: &[],
        complexity,
        description,
    }
}

/// Times tables 2 through 10; `max_number` is the first factor's ceiling.
pub static MULTIPLICATION_LEVELS: [LevelConfig; 9] = [
    multiplication_level(1, 1.0, "Times table of 2"),
    multiplication_level(2, 2.0, "Times tables up to 3"),
    multiplication_level(3, 3.0, "Times tables up to 4"),
    multiplication_level(4, 4.0, "Times tables up to 5"),
    multiplication_level(5, 5.0, "Times tables up to 6"),
    multiplication_level(6, 6.0, "Times tables up to 7"),
    multiplication_level(7, 7.0, "Times tables up to 8"),
    multiplication_level(8, 8.0, "Times tables up to 9"),
    multiplication_level(9, 9.0, "Times tables up to 10"),
];

/// Whole-and-parts bands, addressed by difficulty 1..=3 rather than score.
pub static WHOLE_PART_BANDS: [LevelConfig; 3] = [
    LevelConfig {
        level: 1, min_number: 2, max_number: 10, required_score: 0,
        equation_types: &[], complexity: 1.0, description: "Wholes up to 10",
    },
    LevelConfig {
        level: 2, min_number: 2, max_number: 20, required_score: 50,
        equation_types: &[], complexity: 2.0, description: "Wholes up to 20",
    },
    LevelConfig {
        level: 3, min_number: 2, max_number: 100, required_score: 150,
        equation_types: &[], complexity: 3.0, description: "Wholes up to 100",
    },
];

pub fn levels(family: ProblemFamily) -> &'static [LevelConfig] {
    match family {
        ProblemFamily::Equation       => &EQUATION_LEVELS,
        ProblemFamily::Multiplication => &MULTIPLICATION_LEVELS,
        ProblemFamily::WholePart      => &WHOLE_PART_BANDS,
    }
}

/// Highest row whose `required_score <= score`; first row otherwise.
pub fn resolve(family: ProblemFamily, score: i32) -> &'static LevelConfig {
    let table = levels(family);
    table
        .iter()
        .rev()
        .find(|cfg| cfg.required_score <= score)
        .unwrap_or(&table[0])
}

/// Row for an explicit level number, clamped into the table.
pub fn resolve_level(family: ProblemFamily, level: i32) -> &'static LevelConfig {
    let table = levels(family);
    let idx = (level.max(1) as usize - 1).min(table.len() - 1);
    &table[idx]
}

// ---------------------------------------------------------------------------
// Family-facing lookups
// ---------------------------------------------------------------------------

pub fn get_equations_level_config(score: i32) -> &'static LevelConfig {
    resolve(ProblemFamily::Equation, score)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextLevel {
    pub current_level: u8,
    pub next_level: u8,
    /// Points still missing before the next level unlocks.
    pub score_needed: i32,
    pub next_level_config: &'static LevelConfig,
}

/// `None` once the top equation level is reached.
pub fn get_next_equations_level(score: i32) -> Option<NextLevel> {
    let current = get_equations_level_config(score);
    let next = EQUATION_LEVELS.iter().find(|cfg| cfg.level == current.level + 1)?;
    Some(NextLevel {
        current_level: current.level,
        next_level: next.level,
        score_needed: next.required_score - score.max(0),
        next_level_config: next,
    })
}

pub fn get_multiplication_level_config(score: i32) -> &'static LevelConfig {
    resolve(ProblemFamily::Multiplication, score)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStatus {
    pub config: &'static LevelConfig,
    pub unlocked: bool,
}

/// Every multiplication level in order, flagged with whether `score` reaches it.
pub fn get_available_multiplication_levels(score: i32) -> Vec<LevelStatus> {
    MULTIPLICATION_LEVELS
        .iter()
        .map(|config| LevelStatus { config, unlocked: config.required_score <= score })
        .collect()
}

/// Whole-part band for an explicit difficulty (1 = up to 10, 2 = 20, 3+ = 100).
pub fn whole_part_band(difficulty: i32) -> &'static LevelConfig {
    resolve_level(ProblemFamily::WholePart, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_monotonic(table: &[LevelConfig]) {
        for pair in table.windows(2) {
            assert!(pair[1].complexity > pair[0].complexity, "complexity must rise: {pair:?}");
            assert!(pair[1].max_number >= pair[0].max_number, "bounds must not shrink: {pair:?}");
            assert!(pair[1].required_score > pair[0].required_score);
            assert_eq!(pair[1].level, pair[0].level + 1);
        }
    }

    #[test]
    fn tables_are_monotonic() {
        assert_monotonic(&EQUATION_LEVELS);
        assert_monotonic(&MULTIPLICATION_LEVELS);
        assert_monotonic(&WHOLE_PART_BANDS);
    }

    #[test]
    fn equation_level_lookup_matches_thresholds() {
        let first = get_equations_level_config(0);
        assert_eq!(first.level, 1);
        assert_eq!(first.max_number, 10);
        assert_eq!(get_equations_level_config(49).level, 1);
        assert_eq!(get_equations_level_config(50).level, 2);
        assert_eq!(get_equations_level_config(400).level, 9);
        assert_eq!(get_equations_level_config(10_000).max_number, 200);
    }

    #[test]
    fn negative_score_clamps_to_first_level() {
        assert_eq!(get_equations_level_config(-25).level, 1);
        assert_eq!(get_multiplication_level_config(i32::MIN).level, 1);
    }

    #[test]
    fn parentheses_and_multiplication_unlock_at_three_and_six() {
        for cfg in &EQUATION_LEVELS {
            assert_eq!(
                cfg.equation_types.contains(&EquationType::WithParentheses),
                cfg.level >= 3,
                "level {}", cfg.level
            );
            assert_eq!(
                cfg.equation_types.contains(&EquationType::WithMultiplication),
                cfg.level >= 6,
                "level {}", cfg.level
            );
        }
    }

    #[test]
    fn next_level_reports_missing_points() {
        let next = get_next_equations_level(120).unwrap();
        assert_eq!(next.current_level, 3);
        assert_eq!(next.next_level, 4);
        assert_eq!(next.score_needed, 30);
        assert_eq!(next.next_level_config.max_number, 50);
        assert!(get_next_equations_level(400).is_none());
    }

    #[test]
    fn multiplication_levels_follow_thirty_point_steps() {
        for cfg in &MULTIPLICATION_LEVELS {
            assert_eq!(cfg.required_score, (cfg.level as i32 - 1) * 30);
            assert_eq!(cfg.max_number, cfg.level as i32 + 1);
        }
        assert_eq!(MULTIPLICATION_LEVELS[0].max_number, 2);
        assert_eq!(MULTIPLICATION_LEVELS[8].max_number, 10);
    }

    #[test]
    fn score_thirty_unlocks_exactly_two_multiplication_levels() {
        let levels = get_available_multiplication_levels(30);
        assert_eq!(levels.len(), 9);
        let unlocked: Vec<i32> = levels
            .iter()
            .filter(|s| s.unlocked)
            .map(|s| s.config.required_score)
            .collect();
        assert_eq!(unlocked, vec![0, 30]);
    }

    #[test]
    fn whole_part_bands_by_difficulty() {
        assert_eq!(whole_part_band(1).max_number, 10);
        assert_eq!(whole_part_band(2).max_number, 20);
        assert_eq!(whole_part_band(3).max_number, 100);
        assert_eq!(whole_part_band(0).max_number, 10);
        assert_eq!(whole_part_band(-4).max_number, 10);
        assert_eq!(whole_part_band(17).max_number, 100);
    }

    #[test]
    fn resolve_by_score_for_whole_part() {
        assert_eq!(resolve(ProblemFamily::WholePart, 60).level, 2);
    }
}
