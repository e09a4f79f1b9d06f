//! Whole-and-parts equations.
//!
//! A whole splits into two parts; the three equation shapes differ only in
//! which quantity is hidden behind `x`. The distractors reuse the visible
//! quantities (the whole, the known part, their difference) because picking
//! "a number from the picture" is the typical mistake.

use crate::problem_engine::{
    config::GeneratorConfig,
    distractors::{proximity, wrong_operation, DistractorContext, DistractorPool, Strategy},
    helpers::{assemble_numeric, math_problem},
    levels::{whole_part_band, WHOLE_PART_BANDS},
    models::{Operation, SupportLevel, WholePartOptions, WholePartProblem, WholePartType},
    random::RandomSource,
    shuffle::shuffled,
};

const MIN_WHOLE: i32 = 2;

/// Largest whole any band allows; overrides above it are clamped.
fn max_whole_limit() -> i32 {
    WHOLE_PART_BANDS.last().map_or(100, |band| band.max_number)
}

/// Structural distractors offered before the generic strategies run.
const STRUCTURAL_SLOTS: usize = 2;

fn default_support_level(score: i32) -> SupportLevel {
    match score {
        ..=29 => SupportLevel::Full,
        30..=79 => SupportLevel::Partial,
        _ => SupportLevel::Minimal,
    }
}

struct Shape {
    whole: i32,
    known_part: i32,
    unknown_part: i32,
    expression: String,
    sign: char,
    answer: i32,
}

fn build<R: RandomSource>(rng: &mut R, equation_type: WholePartType, max_whole: i32) -> Shape {
    let whole = rng.int_in(MIN_WHOLE, max_whole);
    match equation_type {
        WholePartType::UnknownAddend => {
            let known_part = rng.int_in(1, whole - 1);
            let unknown_part = whole - known_part;
            Shape {
                whole, known_part, unknown_part,
                expression: format!("x + {known_part} = {whole}"),
                sign: '+',
                answer: unknown_part,
            }
        }
        WholePartType::UnknownSubtrahend => {
            let unknown_part = rng.int_in(1, whole - 1);
            let known_part = whole - unknown_part;
            Shape {
                whole, known_part, unknown_part,
                expression: format!("{whole} - x = {known_part}"),
                sign: '-',
                answer: unknown_part,
            }
        }
        WholePartType::UnknownMinuend => {
            let known_part = rng.int_in(1, whole - 1);
            let result = whole - known_part;
            Shape {
                whole, known_part,
                unknown_part: whole,
                expression: format!("x - {known_part} = {result}"),
                sign: '-',
                answer: whole,
            }
        }
    }
}

/// A whole-and-parts equation.
///
/// `difficulty` picks the band (1 = wholes up to 10, 2 = 20, 3+ = 100) unless
/// `options.max_number` overrides it. Overrides below 2 are ignored and
/// overrides above the top band are clamped to it. `options.equation_types` restricts the
/// shapes drawn from; an empty or missing list allows all three.
pub fn generate_equation_whole_part<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    score: i32,
    difficulty: i32,
    options: &WholePartOptions,
) -> WholePartProblem {
    let band = whole_part_band(difficulty);
    let max_whole = options
        .max_number
        .filter(|m| *m >= MIN_WHOLE)
        .map_or(band.max_number, |m| m.min(max_whole_limit()));

    let allowed: &[WholePartType] = match options.equation_types.as_deref() {
        Some(types) if !types.is_empty() => types,
        _ => &WholePartType::ALL,
    };
    let equation_type = rng.pick(allowed).copied().unwrap_or(WholePartType::UnknownAddend);
    let shape = build(rng, equation_type, max_whole);

    let structural = [
        shape.whole,
        shape.known_part,
        (shape.whole - shape.known_part).abs(),
        shape.whole + shape.known_part,
    ];
    let ctx = DistractorContext::new(shape.answer, 1, 2 * max_whole)
        .with_operands(Operation::Subtraction, shape.whole, shape.known_part)
        .with_spread(1, 2);
    let mut pool = DistractorPool::new(ctx);
    let mut offered = 0;
    for value in shuffled(rng, &structural) {
        if offered == STRUCTURAL_SLOTS {
            break;
        }
        if pool.offer(value) {
            offered += 1;
        }
    }
    let strategies: [Strategy<R>; 2] = [proximity, wrong_operation];
    pool.fill(rng, &strategies, config.distractor_attempts);
    let wrong = pool.finish();
    let (opts, correct_index) = assemble_numeric(rng, shape.answer, &wrong);

    WholePartProblem {
        problem: math_problem(
            shape.expression, Operation::Equation, 0, 0, shape.answer, opts, correct_index,
            band.complexity,
        ),
        equation_type,
        whole: shape.whole,
        known_part: shape.known_part,
        unknown_part: shape.unknown_part,
        operation_sign: shape.sign,
        support_level: options.support_level.unwrap_or_else(|| default_support_level(score)),
    }
}

/// `count` problems with the three shapes spread as evenly as possible, in
/// shuffled order.
pub fn build_whole_part_battery<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    count: usize,
    difficulty: i32,
) -> Vec<WholePartProblem> {
    let problems: Vec<WholePartProblem> = (0..count)
        .map(|i| {
            let forced = WholePartOptions {
                equation_types: Some(vec![WholePartType::ALL[i % WholePartType::ALL.len()]]),
                ..WholePartOptions::default()
            };
            generate_equation_whole_part(rng, config, 0, difficulty, &forced)
        })
        .collect();
    shuffled(rng, &problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_engine::families::equation::solve_for_x;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn check_invariant(p: &WholePartProblem) {
        match p.equation_type {
            WholePartType::UnknownAddend => {
                assert_eq!(p.unknown_part + p.known_part, p.whole);
                assert_eq!(p.operation_sign, '+');
            }
            WholePartType::UnknownSubtrahend => {
                assert_eq!(p.whole - p.unknown_part, p.known_part);
                assert_eq!(p.operation_sign, '-');
            }
            WholePartType::UnknownMinuend => {
                assert_eq!(p.unknown_part, p.whole);
                assert_eq!(p.problem.correct_answer, p.whole);
            }
        }
        assert!(p.known_part >= 1 && p.whole >= 2);
    }

    #[test]
    fn invariants_hold_for_every_band() {
        let cfg = GeneratorConfig::default();
        for difficulty in 1..=3 {
            let max = whole_part_band(difficulty).max_number;
            for seed in 0..200 {
                let mut rng = StdRng::seed_from_u64(seed);
                let opts = WholePartOptions::default();
                let p = generate_equation_whole_part(&mut rng, &cfg, 0, difficulty, &opts);
                check_invariant(&p);
                assert!(p.whole <= max, "whole {} above {max}", p.whole);
                assert_eq!(solve_for_x(&p.problem.expression), Some(p.problem.correct_answer));
                assert_eq!(p.problem.correct_option(), p.problem.correct_answer.to_string());
            }
        }
    }

    #[test]
    fn options_restrict_the_shape_and_bound() {
        let cfg = GeneratorConfig::default();
        let opts = WholePartOptions {
            max_number: Some(15),
            equation_types: Some(vec![WholePartType::UnknownMinuend]),
            support_level: Some(SupportLevel::Partial),
        };
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = generate_equation_whole_part(&mut rng, &cfg, 500, 3, &opts);
            assert_eq!(p.equation_type, WholePartType::UnknownMinuend);
            assert!(p.whole <= 15);
            assert_eq!(p.support_level, SupportLevel::Partial);
        }
    }

    #[test]
    fn support_level_defaults_from_score() {
        let cfg = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let none = WholePartOptions::default();
        for (score, expected) in [
            (0, SupportLevel::Full),
            (50, SupportLevel::Partial),
            (80, SupportLevel::Minimal),
        ] {
            let p = generate_equation_whole_part(&mut rng, &cfg, score, 1, &none);
            assert_eq!(p.support_level, expected, "score {score}");
        }
    }

    #[test]
    fn empty_type_list_allows_all_shapes() {
        let cfg = GeneratorConfig::default();
        let opts = WholePartOptions { equation_types: Some(vec![]), ..WholePartOptions::default() };
        let mut seen = std::collections::HashSet::new();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.insert(generate_equation_whole_part(&mut rng, &cfg, 0, 1, &opts).equation_type);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn battery_spreads_types_evenly() {
        let cfg = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let battery = build_whole_part_battery(&mut rng, &cfg, 9, 2);
        assert_eq!(battery.len(), 9);
        for t in WholePartType::ALL {
            assert_eq!(battery.iter().filter(|p| p.equation_type == t).count(), 3, "{t}");
        }
        battery.iter().for_each(check_invariant);
    }

    #[test]
    fn huge_max_number_is_clamped_to_the_top_band() {
        let cfg = GeneratorConfig::default();
        let opts = WholePartOptions { max_number: Some(i32::MAX), ..WholePartOptions::default() };
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = generate_equation_whole_part(&mut rng, &cfg, 0, 1, &opts);
            check_invariant(&p);
            assert!(p.whole <= 100, "whole {} above the top band", p.whole);
            for o in &p.problem.options {
                let v: i32 = o.parse().unwrap();
                assert!((1..=200).contains(&v), "option {v} out of range");
            }
        }
    }

    #[test]
    fn tiny_or_negative_max_number_falls_back_to_the_band() {
        let cfg = GeneratorConfig::default();
        for max in [i32::MIN, -1, 0, 1] {
            let opts = WholePartOptions { max_number: Some(max), ..WholePartOptions::default() };
            for seed in 0..30 {
                let mut rng = StdRng::seed_from_u64(seed);
                let p = generate_equation_whole_part(&mut rng, &cfg, 0, 2, &opts);
                check_invariant(&p);
                assert!(p.whole <= 20);
            }
        }
    }

    #[test]
    fn support_level_serializes_as_number() {
        let json = serde_json::to_string(&SupportLevel::Minimal).unwrap();
        assert_eq!(json, "3");
        let back: SupportLevel = serde_json::from_str("2").unwrap();
        assert_eq!(back, SupportLevel::Partial);
        assert!(serde_json::from_str::<SupportLevel>("4").is_err());
    }
}
