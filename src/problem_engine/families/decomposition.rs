//! Carry/borrow decomposition drills.
//!
//! The student sees `28 + 5` and picks the rewrite that makes the ten
//! crossing explicit: `28 + 2 + 3`. Single-digit second operands split into
//! "what reaches the round ten" and "the rest"; two-digit ones split into
//! their tens and units. A split with a zero part is never shown, neither as
//! the answer nor as a distractor.

use std::collections::HashSet;

use crate::problem_engine::{
    config::GeneratorConfig,
    distractors::DISTRACTOR_COUNT,
    helpers::{assemble_options, math_problem},
    models::{MathProblem, Operation},
    random::RandomSource,
    shuffle::shuffled,
};

const DEFAULT_MAX: i32 = 100;
const MIN_EFFECTIVE_MAX: i32 = 20;

/// Below this bound no ten-crossing sum has a split without a zero part
/// (`19 + 1 = 20` is the only crossing at 20), so only differences are drawn.
const MIN_ADDITION_MAX: i32 = 21;

/// One signed step after the first operand, e.g. `(Subtraction, 3)` is "- 3".
type Term = (Operation, i32);

/// A crossing split of `num1 op num2` into `num1 op first op second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    operation: Operation,
    num1: i32,
    first: i32,
    second: i32,
    two_digit: bool,
}

impl Split {
    fn canonical(&self) -> Vec<Term> {
        vec![(self.operation, self.first), (self.operation, self.second)]
    }

    fn with_parts(&self, first: i32, second: i32) -> Option<Vec<Term>> {
        (first > 0 && second > 0 && (first, second) != (self.first, self.second))
            .then(|| vec![(self.operation, first), (self.operation, second)])
    }
}

type SplitStrategy = fn(&Split) -> Option<Vec<Term>>;

// -- addition: wrong amounts to the round ten, or a wrong remainder ----------

fn add_swapped(s: &Split) -> Option<Vec<Term>> {
    s.with_parts(s.second, s.first)
}

fn add_short_of_ten(s: &Split) -> Option<Vec<Term>> {
    if s.two_digit { None } else { s.with_parts(s.first - 1, s.second + 1) }
}

fn add_past_ten(s: &Split) -> Option<Vec<Term>> {
    if s.two_digit { None } else { s.with_parts(s.first + 1, s.second - 1) }
}

fn add_rest_plus_one(s: &Split) -> Option<Vec<Term>> {
    s.with_parts(s.first, s.second + 1)
}

fn add_rest_minus_one(s: &Split) -> Option<Vec<Term>> {
    s.with_parts(s.first, s.second - 1)
}

fn add_tens_off(s: &Split) -> Option<Vec<Term>> {
    if s.two_digit { s.with_parts(s.first + 10, s.second) } else { None }
}

const ADDITION_STRATEGIES: [SplitStrategy; 6] = [
    add_swapped,
    add_short_of_ten,
    add_past_ten,
    add_rest_plus_one,
    add_rest_minus_one,
    add_tens_off,
];

// -- subtraction: sign slips and off-by-one borrows ---------------------------

fn sub_sign_slip(s: &Split) -> Option<Vec<Term>> {
    Some(vec![(Operation::Subtraction, s.first), (Operation::Addition, s.second)])
}

fn sub_swapped(s: &Split) -> Option<Vec<Term>> {
    s.with_parts(s.second, s.first)
}

fn sub_units_plus_one(s: &Split) -> Option<Vec<Term>> {
    if s.two_digit { None } else { s.with_parts(s.first + 1, s.second - 1) }
}

fn sub_units_minus_one(s: &Split) -> Option<Vec<Term>> {
    if s.two_digit { None } else { s.with_parts(s.first - 1, s.second + 1) }
}

fn sub_rest_plus_one(s: &Split) -> Option<Vec<Term>> {
    s.with_parts(s.first, s.second + 1)
}

fn sub_tens_off(s: &Split) -> Option<Vec<Term>> {
    if !s.two_digit {
        return None;
    }
    if s.first - 10 > 0 {
        s.with_parts(s.first - 10, s.second)
    } else if s.first + 10 + s.second <= s.num1 {
        s.with_parts(s.first + 10, s.second)
    } else {
        None
    }
}

const SUBTRACTION_STRATEGIES: [SplitStrategy; 6] = [
    sub_sign_slip,
    sub_swapped,
    sub_units_plus_one,
    sub_units_minus_one,
    sub_rest_plus_one,
    sub_tens_off,
];

// ---------------------------------------------------------------------------
// Rendering and inspection
// ---------------------------------------------------------------------------

fn render(num1: i32, terms: &[Term]) -> String {
    let mut out = num1.to_string();
    for (op, value) in terms {
        out.push_str(&format!(" {} {}", op.sign(), value));
    }
    out
}

/// Numeric terms of an option string, in order ("28 + 2 + 3" -> [28, 2, 3]).
pub fn decomposition_terms(option: &str) -> Vec<i32> {
    option.split_whitespace().filter_map(|tok| tok.parse().ok()).collect()
}

pub fn has_zero_term(option: &str) -> bool {
    decomposition_terms(option).contains(&0)
}

/// Split `num2` so that the first part lands `num1` on a round ten.
///
/// `None` when the split would contain a zero part; callers then only have
/// the unsplit form, which is not a usable drill.
fn decompose(operation: Operation, num1: i32, num2: i32) -> Option<Split> {
    let two_digit = num2 >= 10;
    let (first, second) = if two_digit {
        (num2 / 10 * 10, num2 % 10)
    } else {
        match operation {
            Operation::Addition => {
                let to_ten = 10 - num1 % 10;
                (to_ten, num2 - to_ten)
            }
            _ => {
                let to_ten = num1 % 10;
                (to_ten, num2 - to_ten)
            }
        }
    };
    (first > 0 && second > 0).then_some(Split { operation, num1, first, second, two_digit })
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

struct Candidate {
    operation: Operation,
    num1: i32,
    num2: i32,
    result: i32,
    correct: String,
    wrong: Vec<String>,
    two_digit: bool,
}

fn sample_operands<R: RandomSource>(
    rng: &mut R,
    operation: Operation,
    max: i32,
) -> Option<(i32, i32)> {
    let hi = if operation == Operation::Addition { max - 2 } else { max };
    let mut num1 = rng.int_in(11, hi);
    if num1 % 10 == 0 {
        num1 = num1 - num1 % 10 + rng.int_in(1, 9);
    }
    if num1 > hi {
        return None;
    }
    let units = num1 % 10;

    let num2 = match operation {
        Operation::Addition => {
            let room = max - num1;
            if room >= 11 && rng.chance(0.5) {
                rng.int_in(11, room.min(99))
            } else {
                let lo = 10 - units;
                let hi = room.min(9);
                if lo > hi {
                    return None;
                }
                rng.int_in(lo, hi)
            }
        }
        _ => {
            if num1 >= 22 && rng.chance(0.5) {
                rng.int_in(11, num1 - 1)
            } else {
                if units == 9 {
                    return None;
                }
                rng.int_in(units + 1, 9)
            }
        }
    };

    let result = operation.apply(num1, num2)?;
    (num1 / 10 != result / 10).then_some((num1, num2))
}

fn build_candidate<R: RandomSource>(rng: &mut R, max: i32) -> Option<Candidate> {
    let operation = if max >= MIN_ADDITION_MAX && rng.chance(0.5) {
        Operation::Addition
    } else {
        Operation::Subtraction
    };
    let (num1, num2) = sample_operands(rng, operation, max)?;
    let result = operation.apply(num1, num2)?;

    let split = decompose(operation, num1, num2)?;
    let correct = render(num1, &split.canonical());
    if decomposition_terms(&correct).len() < 3 || has_zero_term(&correct) {
        return None;
    }

    let strategies: &[SplitStrategy] = match operation {
        Operation::Addition => &ADDITION_STRATEGIES,
        _ => &SUBTRACTION_STRATEGIES,
    };
    let mut seen = HashSet::new();
    seen.insert(correct.clone());
    let mut wrong = Vec::with_capacity(DISTRACTOR_COUNT);
    for strategy in shuffled(rng, strategies) {
        if wrong.len() == DISTRACTOR_COUNT {
            break;
        }
        let Some(terms) = strategy(&split) else { continue };
        let option = render(num1, &terms);
        if !has_zero_term(&option) && seen.insert(option.clone()) {
            wrong.push(option);
        }
    }
    if wrong.len() < DISTRACTOR_COUNT {
        return None;
    }

    Some(Candidate { operation, num1, num2, result, correct, wrong, two_digit: split.two_digit })
}

/// A pre-checked problem used when the search runs out of attempts.
struct Canonical {
    operation: Operation,
    num1: i32,
    num2: i32,
    result: i32,
    correct: &'static str,
    wrong: [&'static str; DISTRACTOR_COUNT],
    difficulty: f64,
}

const ADDITION_FALLBACK: Canonical = Canonical {
    operation: Operation::Addition,
    num1: 28,
    num2: 5,
    result: 33,
    correct: "28 + 2 + 3",
    wrong: ["28 + 3 + 2", "28 + 1 + 4", "28 + 2 + 4"],
    difficulty: 2.0,
};

const SUBTRACTION_FALLBACK: Canonical = Canonical {
    operation: Operation::Subtraction,
    num1: 13,
    num2: 5,
    result: 8,
    correct: "13 - 3 - 2",
    wrong: ["13 - 3 + 2", "13 - 2 - 3", "13 - 4 - 1"],
    difficulty: 2.5,
};

/// `28 + 5` when its sum fits under `max`, otherwise `13 - 5`.
fn fallback<R: RandomSource>(rng: &mut R, max: i32) -> MathProblem {
    let c = if max >= ADDITION_FALLBACK.result {
        &ADDITION_FALLBACK
    } else {
        &SUBTRACTION_FALLBACK
    };
    let (options, correct_index) = assemble_options(
        rng,
        c.correct.to_string(),
        c.wrong.iter().map(|w| w.to_string()).collect(),
    );
    math_problem(
        format!("{} {} {}", c.num1, c.operation.sign(), c.num2),
        c.operation, c.num1, c.num2, c.result, options, correct_index, c.difficulty,
    )
}

/// A two-operand sum or difference that crosses a ten, with decomposed options.
///
/// `max_number` bounds the sum (and the first operand of a difference); it is
/// clamped into 20..=100 and defaults to 100. At 20 only differences are
/// drawn. The canonical fallback also stays under the bound.
pub fn generate_decomposition<R: RandomSource>(
    rng: &mut R,
    config: &GeneratorConfig,
    max_number: Option<i32>,
) -> MathProblem {
    let max = max_number.unwrap_or(DEFAULT_MAX).clamp(MIN_EFFECTIVE_MAX, DEFAULT_MAX);

    for attempt in 1..=config.decomposition_attempts {
        let Some(c) = build_candidate(rng, max) else { continue };
        log::debug!(
            "decomposition: accepted {} {} {} on attempt {attempt}",
            c.num1, c.operation.sign(), c.num2
        );

        let (options, correct_index) = assemble_options(rng, c.correct, c.wrong);
        let difficulty = match (c.two_digit, c.operation) {
            (false, Operation::Addition) => 2.0,
            (false, _) => 2.5,
            (true, Operation::Addition) => 3.0,
            (true, _) => 3.5,
        };
        return math_problem(
            format!("{} {} {}", c.num1, c.operation.sign(), c.num2),
            c.operation, c.num1, c.num2, c.result, options, correct_index, difficulty,
        );
    }

    log::warn!(
        "decomposition: no valid candidate in {} attempts (max {max}), using canonical example",
        config.decomposition_attempts
    );
    fallback(rng, max)
}
