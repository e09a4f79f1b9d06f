use crate::problem_engine::{
    config::GeneratorConfig,
    distractors::{
        generate_distractors, operand_neighbor, proximity, wrong_operation, DistractorContext,
        Strategy,
    },
    helpers::{assemble_numeric, math_problem},
    levels::MULTIPLICATION_LEVELS,
    models::{MultiplicationProblem, Operation},
    random::RandomSource,
};

const MAX_SECOND_FACTOR: i32 = 10;

/// `num1 × num2` with `num1` in `1..=max_multiplier` and `num2` in `1..=10`.
///
/// `max_multiplier` is clamped into the times-table range 2..=10.
pub fn generate_multiplication<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    max_multiplier: i32,
) -> MultiplicationProblem {
    let max_multiplier = max_multiplier.clamp(2, 10);
    let num1 = rng.int_in(1, max_multiplier);
    let num2 = rng.int_in(1, MAX_SECOND_FACTOR);
    let correct = num1 * num2;

    let ctx = DistractorContext::new(correct, 1, max_multiplier * MAX_SECOND_FACTOR)
        .with_operands(Operation::Multiplication, num1, num2)
        .with_spread(1, 2);
    let strategies: [Strategy<R>; 3] = [operand_neighbor, wrong_operation, proximity];
    let wrong = generate_distractors(rng, ctx, &strategies, config.distractor_attempts);
    let (options, correct_index) = assemble_numeric(rng, correct, &wrong);

    let difficulty = MULTIPLICATION_LEVELS
        .iter()
        .find(|cfg| cfg.max_number == max_multiplier)
        .map(|cfg| cfg.complexity)
        .unwrap_or(1.0);

    MultiplicationProblem {
        problem: math_problem(
            format!("{} × {}", num1, num2),
            Operation::Multiplication, num1, num2, correct, options, correct_index, difficulty,
        ),
        max_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn product_and_factor_bounds() {
        let cfg = GeneratorConfig::default();
        for max in 2..=10 {
            for seed in 0..40 {
                let mut rng = StdRng::seed_from_u64(seed);
                let m = generate_multiplication(&mut rng, &cfg, max);
                let p = &m.problem;
                assert!((1..=max).contains(&p.operand1));
                assert!((1..=10).contains(&p.operand2));
                assert_eq!(p.correct_answer, p.operand1 * p.operand2);
                assert_eq!(p.correct_option(), p.correct_answer.to_string());
                assert_eq!(m.max_multiplier, max);
            }
        }
    }

    #[test]
    fn difficulty_tracks_level_complexity() {
        let cfg = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_multiplication(&mut rng, &cfg, 2).problem.difficulty, 1.0);
        assert_eq!(generate_multiplication(&mut rng, &cfg, 10).problem.difficulty, 9.0);
    }

    #[test]
    fn out_of_range_multiplier_is_clamped() {
        let cfg = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate_multiplication(&mut rng, &cfg, -5).max_multiplier, 2);
        assert_eq!(generate_multiplication(&mut rng, &cfg, 99).max_multiplier, 10);
        assert_eq!(generate_multiplication(&mut rng, &cfg, i32::MIN).max_multiplier, 2);
        let p = generate_multiplication(&mut rng, &cfg, i32::MAX);
        assert_eq!(p.max_multiplier, 10);
        assert!(p.problem.correct_answer <= 100);
    }
}
