//! # math_drill_gen
//!
//! An offline, deterministic generator of multiple-choice arithmetic drills
//! for primary-school practice.
//!
//! Every problem comes with a prompt, the correct answer and three wrong
//! answers that model typical student mistakes: a units digit off by one, the
//! wrong operation, a forgotten borrow, a "number from the picture" in a
//! whole-and-parts equation. Options are shuffled and the index of the
//! correct one is recorded.
//!
//! ## Families
//!
//! | Family | Example | Notes |
//! |--------|---------|-------|
//! | Counting | `7 + 2` | sums bounded, differences non-negative |
//! | Decomposition | `28 + 5` -> `28 + 2 + 3` | makes the ten crossing explicit |
//! | First-grade decomposition | `7 = 3 and 4` | parts of a number up to 10 |
//! | Multiplication | `6 × 7` | times tables 2..=10, 9 levels |
//! | Equation | `x + (12 - 5) = 20` | 9 levels, brackets from 3, × from 6 |
//! | Whole-and-parts | `15 - x = 9` | unknown addend / subtrahend / minuend |
//! | Column subtraction | `52 - 17` | borrowing, round-ten minuends |
//!
//! ## How it works
//!
//! Every constrained search is bounded: a generator samples operands, checks
//! its pedagogical constraints and, once its attempt budget from
//! [`GeneratorConfig`] is spent, returns a hand-checked canonical example
//! instead. Distractor search is bounded the same way and pads with
//! `correct + 1, + 2, ...`, so every call returns a complete record.
//!
//! ## Quick start
//!
//! ```rust
//! use math_drill_gen::{generate_problem, ProblemKind, ProblemRequest};
//!
//! // Minimal: only the family is required (score 0, difficulty 1, entropy).
//! let problem = generate_problem(ProblemRequest::new(ProblemKind::Counting));
//! println!("Q: {}", problem.expression());
//!
//! // Reproducible: same seed, same problem.
//! let request = ProblemRequest::new(ProblemKind::Equation).with_score(260).with_seed(42);
//! let a = generate_problem(request.clone());
//! let b = generate_problem(request);
//! assert_eq!(a, b);
//!
//! let (options, correct) = a.options();
//! for (i, option) in options.iter().enumerate() {
//!     let mark = if i == correct { "+" } else { " " };
//!     println!("[{mark}] {option}");
//! }
//! ```
//!
//! Family generators can also be called directly with any [`RandomSource`],
//! including a [`SequenceSource`] that replays a fixed list of draws:
//!
//! ```rust
//! use math_drill_gen::{families::column_subtraction, GeneratorConfig, SequenceSource};
//!
//! let mut rng = SequenceSource::new(vec![0.42, 0.17, 0.93, 0.5]);
//! let config = GeneratorConfig::default();
//! let p = column_subtraction::generate_column_subtraction(&mut rng, &config, 2);
//! assert!((10..=99).contains(&p.result));
//! ```

pub mod problem_engine;

// Convenience re-exports so callers can use `math_drill_gen::generate_problem`
// directly without reaching into `problem_engine::`.
pub use problem_engine::{
    families, generate_problem, levels, ColumnSubtractionProblem, EquationProblem, EquationType,
    FirstGradeDecompositionProblem, GeneratedProblem, GeneratorConfig, MathProblem,
    MultiplicationProblem, Operation, ProblemError, ProblemKind, ProblemRequest, ProblemResult,
    RandomSource, SequenceSource, SupportLevel, WholePartOptions, WholePartProblem, WholePartType,
};
