//! Two-digit column subtraction with and without borrowing.

use crate::problem_engine::{
    config::GeneratorConfig,
    distractors::{digit_flip, proximity, tens_digit, DistractorContext, DistractorPool, Strategy},
    error::{ProblemError, ProblemResult},
    helpers::{assemble_numeric, make_problem_id, math_problem},
    models::{ColumnSubtractionProblem, Operation},
    random::RandomSource,
    shuffle::shuffled,
};

const MIN_RESULT: i32 = 10;
const MAX_RESULT: i32 = 99;

/// Operand shapes the generator can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnShape {
    /// Units of the minuend cover the subtrahend's units.
    Plain,
    /// Units of the subtrahend exceed the minuend's.
    Borrow,
    /// The minuend is a round ten (40 - 17).
    ZeroUnits,
}

fn check_two_digit(value: i32) -> ProblemResult<i32> {
    if (0..=99).contains(&value) {
        Ok(value)
    } else {
        Err(ProblemError::OperandOutOfRange { value })
    }
}

/// True when the minuend's units digit is smaller than the subtrahend's.
pub fn needs_borrowing(minuend: i32, subtrahend: i32) -> ProblemResult<bool> {
    let m = check_two_digit(minuend)?;
    let s = check_two_digit(subtrahend)?;
    Ok(m % 10 < s % 10)
}

pub fn has_zero_in_units(value: i32) -> ProblemResult<bool> {
    Ok(check_two_digit(value)? % 10 == 0)
}

/// Probabilities of (zero-units, borrow) for a difficulty; the rest is plain.
fn shape_weights(difficulty: i32) -> (f64, f64) {
    match difficulty {
        ..=1 => (0.1, 0.3),
        2 => (0.2, 0.5),
        _ => (0.3, 0.6),
    }
}

fn pick_shape<R: RandomSource>(rng: &mut R, difficulty: i32) -> ColumnShape {
    let (zero, borrow) = shape_weights(difficulty);
    let roll = rng.next_f64();
    if roll < zero {
        ColumnShape::ZeroUnits
    } else if roll < zero + borrow {
        ColumnShape::Borrow
    } else {
        ColumnShape::Plain
    }
}

fn sample_operands<R: RandomSource>(rng: &mut R, shape: ColumnShape) -> (i32, i32) {
    match shape {
        ColumnShape::Plain => {
            let m_tens = rng.int_in(2, 9);
            let m_units = rng.int_in(0, 9);
            let s_tens = rng.int_in(1, m_tens - 1);
            let s_units = rng.int_in(0, m_units);
            (m_tens * 10 + m_units, s_tens * 10 + s_units)
        }
        ColumnShape::Borrow => {
            let m_tens = rng.int_in(3, 9);
            let m_units = rng.int_in(0, 8);
            let s_tens = rng.int_in(1, m_tens - 2);
            let s_units = rng.int_in(m_units + 1, 9);
            (m_tens * 10 + m_units, s_tens * 10 + s_units)
        }
        ColumnShape::ZeroUnits => {
            let m_tens = rng.int_in(3, 9);
            let s_tens = rng.int_in(1, m_tens - 2);
            let s_units = rng.int_in(1, 9);
            (m_tens * 10, s_tens * 10 + s_units)
        }
    }
}

/// What a student gets by subtracting the smaller units digit from the larger
/// one instead of borrowing (52 - 17 -> 45).
fn forgot_to_borrow(minuend: i32, subtrahend: i32) -> i32 {
    let tens = minuend / 10 - subtrahend / 10;
    let units = (minuend % 10 - subtrahend % 10).abs();
    tens * 10 + units
}

fn finish<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    minuend: i32,
    subtrahend: i32,
) -> ColumnSubtractionProblem {
    let result = minuend - subtrahend;
    // Operands reaching here are two-digit, so the predicates cannot fail.
    let borrowing = needs_borrowing(minuend, subtrahend).unwrap_or(false);
    let zero_units = has_zero_in_units(minuend).unwrap_or(false);

    let ctx = DistractorContext::new(result, MIN_RESULT, MAX_RESULT)
        .with_operands(Operation::Subtraction, minuend, subtrahend)
        .with_spread(1, 2);
    let mut pool = DistractorPool::new(ctx);
    if let Some(flipped) = digit_flip(result) {
        pool.offer(flipped);
    }
    if borrowing {
        pool.offer(forgot_to_borrow(minuend, subtrahend));
        // Borrowed in the units but forgot to decrement the tens.
        pool.offer(result + 10);
    }
    let strategies: [Strategy<R>; 2] = [proximity, tens_digit];
    pool.fill(rng, &strategies, config.distractor_attempts);
    let wrong = pool.finish();
    let (options, correct_index) = assemble_numeric(rng, result, &wrong);

    let difficulty = match (borrowing, zero_units) {
        (_, true) => 2.5,
        (true, false) => 2.0,
        (false, false) => 1.0,
    };

    ColumnSubtractionProblem {
        id: make_problem_id("CS", rng),
        problem: math_problem(
            format!("{} - {}", minuend, subtrahend),
            Operation::Subtraction, minuend, subtrahend, result, options, correct_index, difficulty,
        ),
        minuend,
        subtrahend,
        result,
        needs_borrowing: borrowing,
        has_zero_in_units: zero_units,
    }
}

/// One problem of the requested shape; 52 - 17 when the budget runs out.
pub fn generate_column_subtraction_shaped<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    shape: ColumnShape,
) -> ColumnSubtractionProblem {
    for attempt in 1..=config.column_subtraction_attempts {
        let (minuend, subtrahend) = sample_operands(rng, shape);
        let result = minuend - subtrahend;
        if (MIN_RESULT..=MAX_RESULT).contains(&result) {
            log::debug!(
                "column subtraction: {minuend} - {subtrahend} ({shape:?}) on attempt {attempt}"
            );
            return finish(rng, config, minuend, subtrahend);
        }
    }
    log::warn!(
        "column subtraction: no {shape:?} operands in {} attempts, using 52 - 17",
        config.column_subtraction_attempts
    );
    finish(rng, config, 52, 17)
}

/// Column subtraction with the shape drawn by difficulty (1 = mostly plain,
/// 3 = mostly borrowing).
pub fn generate_column_subtraction<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    difficulty: i32,
) -> ColumnSubtractionProblem {
    let shape = pick_shape(rng, difficulty);
    generate_column_subtraction_shaped(rng, config, shape)
}

/// Diagnostic set: 3 borrowing, 3 plain two-digit results, 2 round-ten
/// minuends and 2 free-form problems, in shuffled order.
pub fn build_column_subtraction_battery<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
) -> Vec<ColumnSubtractionProblem> {
    let mut battery = Vec::with_capacity(10);
    for shape in [ColumnShape::Borrow, ColumnShape::Plain] {
        for _ in 0..3 {
            battery.push(generate_column_subtraction_shaped(rng, config, shape));
        }
    }
    for _ in 0..2 {
        battery.push(generate_column_subtraction_shaped(rng, config, ColumnShape::ZeroUnits));
    }
    for _ in 0..2 {
        battery.push(generate_column_subtraction(rng, config, 2));
    }
    shuffled(rng, &battery)
}
