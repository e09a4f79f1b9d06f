//! Problem generators, one module per exercise family.
//!
//! Every public generator takes the random source first and the
//! [`GeneratorConfig`](crate::problem_engine::config::GeneratorConfig) second:
//!
//! ```ignore
//! pub fn generate_<family><R: RandomSource>(
//!     rng: &mut R,
//!     config: &GeneratorConfig,
//!     /* family inputs */
//! ) -> <FamilyProblem>
//! ```
//!
//! The generator dispatches to these via `generator.rs`.

pub mod column_subtraction;
pub mod counting;
pub mod decomposition;
pub mod equation;
pub mod first_grade;
pub mod multiplication;
pub mod whole_part;
