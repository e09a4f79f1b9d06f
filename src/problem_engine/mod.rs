//! Core problem engine: randomness, distractors, difficulty tables and the
//! family generators.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Problem records, enums, request/response types |
//! | `random`      | Injectable `RandomSource` and the replaying `SequenceSource` |
//! | `shuffle`     | Non-mutating Fisher-Yates shuffle |
//! | `distractors` | Wrong-answer strategies and the deduplicating pool |
//! | `levels`      | Immutable per-family difficulty tables |
//! | `helpers`     | Option assembly shared by every family |
//! | `config`      | Retry budgets, loadable from JSON |
//! | `error`       | `ProblemError` |
//! | `generator`   | Single entry point `generate_problem()` |
//! | `families`    | One generator module per exercise family |

pub mod config;
pub mod distractors;
pub mod error;
pub mod families;
pub mod generator;
pub mod helpers;
pub mod levels;
pub mod models;
pub mod random;
pub mod shuffle;

pub use config::GeneratorConfig;
pub use error::{ProblemError, ProblemResult};
pub use generator::generate_problem;
pub use models::{
    ColumnSubtractionProblem, EquationProblem, EquationType, FirstGradeDecompositionProblem,
    GeneratedProblem, MathProblem, MultiplicationProblem, Operation, ProblemKind, ProblemRequest,
    SupportLevel, WholePartOptions, WholePartProblem, WholePartType,
};
pub use random::{RandomSource, SequenceSource};
