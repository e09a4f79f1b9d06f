//! Shared assembly steps used by every family generator.
//!
//! Every generator ends the same way: put the correct option next to its
//! distractors, shuffle, find where the correct option landed and build the
//! record. These helpers centralise that tail so family files only deal with
//! operand sampling and their own distractor heuristics.

use crate::problem_engine::{
    models::{MathProblem, Operation},
    random::RandomSource,
    shuffle::shuffled,
};

/// Shuffle `correct` in among `wrong` and return `(options, correct_index)`.
pub fn assemble_options<R: RandomSource>(
    rng: &mut R,
    correct: String,
    wrong: Vec<String>,
) -> (Vec<String>, usize) {
    let mut all = Vec::with_capacity(wrong.len() + 1);
    all.push(correct.clone());
    all.extend(wrong);
    let options = shuffled(rng, &all);
    let correct_index = options.iter().position(|o| *o == correct).unwrap_or(0);
    (options, correct_index)
}

/// Numeric variant of [`assemble_options`].
pub fn assemble_numeric<R: RandomSource>(
    rng: &mut R,
    correct: i32,
    wrong: &[i32],
) -> (Vec<String>, usize) {
    assemble_options(
        rng,
        correct.to_string(),
        wrong.iter().map(|w| w.to_string()).collect(),
    )
}

/// Build the base record from its parts.
pub fn math_problem(
    expression: String, operation: Operation, operand1: i32, operand2: i32,
    correct_answer: i32, options: Vec<String>, correct_index: usize, difficulty: f64,
) -> MathProblem {
    MathProblem {
        expression,
        operation,
        operand1,
        operand2,
        correct_answer,
        options,
        correct_index,
        difficulty,
    }
}

/// Problem ID from a family prefix and 32 random bits, e.g. `"CS-1A2B3C4D"`.
pub fn make_problem_id<R: RandomSource>(prefix: &str, rng: &mut R) -> String {
    let bits = (rng.next_f64() * 4_294_967_296.0) as u64 as u32;
    format!("{}-{:08X}", prefix, bits)
}
