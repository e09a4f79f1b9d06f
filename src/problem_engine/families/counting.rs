use crate::problem_engine::{
    config::GeneratorConfig,
    distractors::{
        generate_distractors, operand_neighbor, proximity, wrong_operation, DistractorContext,
        Strategy,
    },
    helpers::{assemble_numeric, math_problem},
    models::{MathProblem, Operation},
    random::RandomSource,
};

const DEFAULT_MAX: i32 = 10;

/// Score above which proximity distractors sit closer to the answer.
const TIGHT_SPREAD_SCORE: i32 = 100;

/// Addition or subtraction within `min_num..=max_num`, correct by construction.
///
/// A `max_num` below 2 cannot hold two positive operands and falls back to 10.
pub fn generate_counting<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    score: i32,
    min_num: i32,
    max_num: i32,
) -> MathProblem {
    let max_num = if max_num < 2 { DEFAULT_MAX } else { max_num };
    let low = min_num.clamp(1, max_num - 1);

    let operation = if rng.chance(0.5) { Operation::Addition } else { Operation::Subtraction };
    let (num1, num2) = match operation {
        Operation::Addition => {
            let num1 = rng.int_in(low, max_num - 1);
            (num1, rng.int_in(1, max_num - num1))
        }
        _ => {
            let num1 = rng.int_in(low, max_num - 1);
            (num1, rng.int_in(1, num1))
        }
    };
    let correct = match operation {
        Operation::Addition => num1 + num2,
        _ => num1 - num2,
    };

    let spread = if score >= TIGHT_SPREAD_SCORE { (1, 2) } else { (1, 3) };
    let ctx = DistractorContext::new(correct, 0, max_num)
        .with_operands(operation, num1, num2)
        .with_spread(spread.0, spread.1);
    let strategies: [Strategy<R>; 3] = [proximity, operand_neighbor, wrong_operation];
    let wrong = generate_distractors(rng, ctx, &strategies, config.distractor_attempts);

    let (options, correct_index) = assemble_numeric(rng, correct, &wrong);
    let difficulty = match max_num {
        ..=10 => 1.0,
        11..=20 => 2.0,
        _ => 3.0,
    };

    math_problem(
        format!("{} {} {}", num1, operation.sign(), num2),
        operation, num1, num2, correct, options, correct_index, difficulty,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_engine::random::SequenceSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn operands_respect_bounds() {
        let cfg = GeneratorConfig::default();
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = generate_counting(&mut rng, &cfg, 0, 1, 20);
            match p.operation {
                Operation::Addition => {
                    assert!(p.operand1 + p.operand2 <= 20, "{}", p.expression);
                    assert_eq!(p.correct_answer, p.operand1 + p.operand2);
                }
                Operation::Subtraction => {
                    assert!(p.operand1 >= p.operand2, "{}", p.expression);
                    assert!(p.correct_answer >= 0);
                    assert_eq!(p.correct_answer, p.operand1 - p.operand2);
                }
                other => panic!("unexpected operation {other:?}"),
            }
            assert!(p.operand1 >= 1 && p.operand2 >= 1);
        }
    }

    #[test]
    fn options_hold_answer_and_stay_in_range() {
        let cfg = GeneratorConfig::default();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = generate_counting(&mut rng, &cfg, 150, 1, 10);
            assert_eq!(p.correct_option(), p.correct_answer.to_string());
            for o in &p.options {
                let v: i32 = o.parse().unwrap();
                assert!((0..=10).contains(&v), "{o} out of range in {}", p.expression);
            }
        }
    }

    #[test]
    fn tiny_max_falls_back_to_ten() {
        let cfg = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let p = generate_counting(&mut rng, &cfg, 0, 1, 0);
        assert!(p.operand1 <= 9);
        assert_eq!(p.difficulty, 1.0);
    }

    #[test]
    fn extreme_bounds_stay_total() {
        let cfg = GeneratorConfig::default();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let p = generate_counting(&mut rng, &cfg, 0, i32::MIN, i32::MAX);
            assert!(p.operand1 >= 1 && p.operand2 >= 1);
            assert!(p.correct_answer >= 0);
            assert_eq!(p.options.len(), 4);
            assert_eq!(p.correct_option(), p.correct_answer.to_string());
            if p.operation == Operation::Addition {
                assert_eq!(p.operand1.checked_add(p.operand2), Some(p.correct_answer));
            }

            let p = generate_counting(&mut rng, &cfg, 0, i32::MAX, i32::MIN);
            assert!(p.operand1 <= 9, "negative max falls back to 10: {}", p.expression);
        }
    }

    #[test]
    fn scripted_draws_pick_addition_with_exact_operands() {
        // 0.1 -> addition, 0.0 -> num1 = 1, 0.99 -> num2 = max - num1 = 9
        let mut rng = SequenceSource::new(vec![0.1, 0.0, 0.99]);
        let p = generate_counting(&mut rng, &GeneratorConfig::default(), 0, 1, 10);
        assert_eq!(p.expression, "1 + 9");
        assert_eq!(p.correct_answer, 10);
    }
}
