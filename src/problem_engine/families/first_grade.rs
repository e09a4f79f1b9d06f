use std::collections::HashSet;

use crate::problem_engine::{
    distractors::DISTRACTOR_COUNT,
    helpers::assemble_options,
    models::FirstGradeDecompositionProblem,
    random::RandomSource,
    shuffle::shuffled,
};

fn pair_label((a, b): (i32, i32)) -> String {
    format!("{a} and {b}")
}

/// "Split `n` into two parts" for `n` in 2..=10.
///
/// Wrong pairs keep both parts positive but miss the target by one or two,
/// and never repeat the correct pair (in either order) or each other.
pub fn generate_first_grade_decomposition<R: RandomSource>(
    rng: &mut R,
) -> FirstGradeDecompositionProblem {
    let target = rng.int_in(2, 10);
    let part1 = rng.int_in(1, target - 1);
    let part2 = target - part1;

    let candidates = [
        (part1 + 1, part2),
        (part1, part2 + 1),
        (part1 - 1, part2),
        (part1, part2 - 1),
        (part1 + 1, part2 + 1),
        (part2 + 1, part1),
    ];

    let mut seen: HashSet<(i32, i32)> = HashSet::new();
    seen.insert((part1.min(part2), part1.max(part2)));
    let mut wrong = Vec::with_capacity(DISTRACTOR_COUNT);
    for (a, b) in shuffled(rng, &candidates) {
        if wrong.len() == DISTRACTOR_COUNT {
            break;
        }
        if a <= 0 || b <= 0 || a + b == target {
            continue;
        }
        if seen.insert((a.min(b), a.max(b))) {
            wrong.push(pair_label((a, b)));
        }
    }
    // Pad with (1, n) pairs above the target.
    let mut extra = target + 1;
    while wrong.len() < DISTRACTOR_COUNT {
        if seen.insert((1, extra)) {
            wrong.push(pair_label((1, extra)));
        }
        extra += 1;
    }

    let (options, correct_index) = assemble_options(rng, pair_label((part1, part2)), wrong);
    FirstGradeDecompositionProblem {
        target_number: target,
        correct_decomposition: (part1, part2),
        options,
        correct_index,
    }
}
