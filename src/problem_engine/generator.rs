use rand::{rngs::StdRng, SeedableRng};

use crate::problem_engine::{
    families::{
        column_subtraction, counting, decomposition, equation, first_grade, multiplication,
        whole_part,
    },
    levels::get_multiplication_level_config,
    models::{GeneratedProblem, ProblemKind, ProblemRequest, WholePartOptions},
};

const DEFAULT_COUNTING_MAX: i32 = 10;

/// Core dispatch: routes to the correct family module.
///
/// With `rng_seed: Some(seed)` the output is fully reproducible; `None` draws
/// from entropy.
pub fn generate_problem(request: ProblemRequest) -> GeneratedProblem {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    let cfg = &request.config;

    log::debug!(
        "generating {} (score {}, difficulty {}, seed {:?})",
        request.kind, request.score, request.difficulty, request.rng_seed
    );

    match request.kind {
        ProblemKind::Counting => GeneratedProblem::Counting(counting::generate_counting(
            &mut rng, cfg, request.score, 1,
            request.max_number.unwrap_or(DEFAULT_COUNTING_MAX),
        )),

        ProblemKind::Decomposition => GeneratedProblem::Decomposition(
            decomposition::generate_decomposition(&mut rng, cfg, request.max_number),
        ),

        ProblemKind::FirstGradeDecomposition => GeneratedProblem::FirstGradeDecomposition(
            first_grade::generate_first_grade_decomposition(&mut rng),
        ),

        ProblemKind::Multiplication => {
            let max_multiplier = request
                .max_number
                .unwrap_or_else(|| get_multiplication_level_config(request.score).max_number);
            GeneratedProblem::Multiplication(multiplication::generate_multiplication(
                &mut rng, cfg, max_multiplier,
            ))
        }

        ProblemKind::Equation => GeneratedProblem::Equation(equation::generate_equation(
            &mut rng, cfg, request.score, request.previous_x,
        )),

        ProblemKind::EquationWholePart => {
            let options = WholePartOptions {
                max_number: request.max_number,
                ..WholePartOptions::default()
            };
            GeneratedProblem::EquationWholePart(whole_part::generate_equation_whole_part(
                &mut rng, cfg, request.score, request.difficulty, &options,
            ))
        }

        ProblemKind::ColumnSubtraction => GeneratedProblem::ColumnSubtraction(
            column_subtraction::generate_column_subtraction(&mut rng, cfg, request.difficulty),
        ),
    }
}
