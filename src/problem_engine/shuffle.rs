use crate::problem_engine::random::RandomSource;

/// Return a Fisher-Yates permutation of `items`, leaving the input untouched.
pub fn shuffled<T: Clone, R: RandomSource>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.index_below(i + 1);
        out.swap(i, j);
    }
    out
}
