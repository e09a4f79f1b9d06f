//! Wrong-answer synthesis.
//!
//! Each heuristic is a [`Strategy`]: a plain function that looks at the
//! [`DistractorContext`] and proposes one candidate (or nothing). A
//! [`DistractorPool`] cycles through a family's strategy list under a fixed
//! attempt budget and keeps the first three candidates that are in range,
//! differ from the correct answer and from each other. Whatever is still
//! missing afterwards is padded with `correct + 1, + 2, ...`, so the pool
//! always yields exactly [`DISTRACTOR_COUNT`] values.

use std::collections::HashSet;

use crate::problem_engine::{models::Operation, random::RandomSource};

pub const DISTRACTOR_COUNT: usize = 3;

/// Everything a strategy may look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistractorContext {
    pub correct: i32,
    pub operand1: i32,
    pub operand2: i32,
    pub operation: Operation,
    /// Inclusive range every accepted distractor must fall in.
    pub min: i32,
    pub max: i32,
    /// Magnitude range for proximity offsets.
    pub spread: (i32, i32),
}

impl DistractorContext {
    pub fn new(correct: i32, min: i32, max: i32) -> Self {
        DistractorContext {
            correct,
            operand1: 0,
            operand2: 0,
            operation: Operation::Equation,
            min,
            max,
            spread: (1, 3),
        }
    }

    pub fn with_operands(mut self, operation: Operation, operand1: i32, operand2: i32) -> Self {
        self.operation = operation;
        self.operand1 = operand1;
        self.operand2 = operand2;
        self
    }

    pub fn with_spread(mut self, lo: i32, hi: i32) -> Self {
        self.spread = (lo.max(1), hi.max(lo.max(1)));
        self
    }

    fn in_range(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

pub type Strategy<R> = fn(&mut R, &DistractorContext) -> Option<i32>;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Correct answer shifted by a random offset from `ctx.spread`.
pub fn proximity<R: RandomSource>(rng: &mut R, ctx: &DistractorContext) -> Option<i32> {
    let delta = rng.int_in(ctx.spread.0, ctx.spread.1);
    let sign = if rng.chance(0.5) { 1 } else { -1 };
    ctx.correct.checked_add(sign * delta)
}

/// Same tens, different units digit.
pub fn last_digit<R: RandomSource>(rng: &mut R, ctx: &DistractorContext) -> Option<i32> {
    if ctx.correct < 0 {
        return None;
    }
    let units = ctx.correct % 10;
    let replacement = (units + rng.int_in(1, 9)) % 10;
    (ctx.correct - units).checked_add(replacement)
}

/// Same units, tens digit moved by one or two.
pub fn tens_digit<R: RandomSource>(rng: &mut R, ctx: &DistractorContext) -> Option<i32> {
    let step = 10 * rng.int_in(1, 2);
    if rng.chance(0.5) {
        ctx.correct.checked_add(step)
    } else {
        ctx.correct.checked_sub(step)
    }
}

/// One operand nudged by ±1, then recomputed with the real operation.
pub fn operand_neighbor<R: RandomSource>(rng: &mut R, ctx: &DistractorContext) -> Option<i32> {
    let nudge = if rng.chance(0.5) { 1 } else { -1 };
    let (a, b) = if rng.chance(0.5) {
        (ctx.operand1.checked_add(nudge)?, ctx.operand2)
    } else {
        (ctx.operand1, ctx.operand2.checked_add(nudge)?)
    };
    ctx.operation.apply(a, b)
}

/// The operands combined with the operation students confuse this one with.
pub fn wrong_operation<R: RandomSource>(_rng: &mut R, ctx: &DistractorContext) -> Option<i32> {
    ctx.operation.confusable()?.apply(ctx.operand1, ctx.operand2)
}

/// Half (when even) or double the correct answer.
pub fn half_or_double<R: RandomSource>(rng: &mut R, ctx: &DistractorContext) -> Option<i32> {
    if ctx.correct % 2 == 0 && rng.chance(0.5) {
        Some(ctx.correct / 2)
    } else {
        ctx.correct.checked_mul(2)
    }
}

/// Swap the two digits of a two-digit answer (35 -> 53).
pub fn digit_flip(value: i32) -> Option<i32> {
    if !(10..=99).contains(&value) || value % 10 == 0 {
        return None;
    }
    let flipped = (value % 10) * 10 + value / 10;
    (flipped != value).then_some(flipped)
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// Collects unique, in-range distractors for one problem.
#[derive(Debug, Clone)]
pub struct DistractorPool {
    ctx: DistractorContext,
    picked: Vec<i32>,
    seen: HashSet<i32>,
}

impl DistractorPool {
    pub fn new(ctx: DistractorContext) -> Self {
        let mut seen = HashSet::new();
        seen.insert(ctx.correct);
        DistractorPool { ctx, picked: Vec::with_capacity(DISTRACTOR_COUNT), seen }
    }

    pub fn is_full(&self) -> bool {
        self.picked.len() >= DISTRACTOR_COUNT
    }

    /// Accept `value` if there is room and it passes the range/uniqueness filter.
    pub fn offer(&mut self, value: i32) -> bool {
        if self.is_full() || !self.ctx.in_range(value) || !self.seen.insert(value) {
            return false;
        }
        self.picked.push(value);
        true
    }

    /// Cycle through `strategies` until full or `budget` calls are spent.
    pub fn fill<R: RandomSource>(&mut self, rng: &mut R, strategies: &[Strategy<R>], budget: u32) {
        if strategies.is_empty() {
            return;
        }
        for attempt in 0..budget as usize {
            if self.is_full() {
                break;
            }
            let strategy = strategies[attempt % strategies.len()];
            if let Some(value) = strategy(rng, &self.ctx) {
                self.offer(value);
            }
        }
    }

    /// Pad deterministically and return exactly three distractors.
    ///
    /// Padding walks upward from `correct + 1` inside the range, then downward
    /// from `correct - 1`, and only leaves the range when it is too narrow to
    /// hold three values.
    pub fn finish(mut self) -> Vec<i32> {
        let missing = DISTRACTOR_COUNT.saturating_sub(self.picked.len());
        if missing > 0 {
            log::debug!(
                "distractors: padding {missing} value(s) around {}",
                self.ctx.correct
            );
        }
        let mut step = 1;
        while !self.is_full() && self.ctx.correct.saturating_add(step) <= self.ctx.max {
            self.offer(self.ctx.correct + step);
            step += 1;
        }
        let mut step = 1;
        while !self.is_full() && self.ctx.correct.saturating_sub(step) >= self.ctx.min {
            self.offer(self.ctx.correct - step);
            step += 1;
        }
        let mut next = self.ctx.correct.max(self.ctx.max);
        while !self.is_full() {
            next += 1;
            if self.seen.insert(next) {
                self.picked.push(next);
            }
        }
        self.picked
    }
}

/// One-call convenience: fill from `strategies`, then pad.
pub fn generate_distractors<R: RandomSource>(
    rng: &mut R,
    ctx: DistractorContext,
    strategies: &[Strategy<R>],
    budget: u32,
) -> Vec<i32> {
    let mut pool = DistractorPool::new(ctx);
    pool.fill(rng, strategies, budget);
    pool.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_engine::random::SequenceSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_valid(values: &[i32], ctx: &DistractorContext) {
        assert_eq!(values.len(), DISTRACTOR_COUNT);
        let unique: HashSet<_> = values.iter().collect();
        assert_eq!(unique.len(), DISTRACTOR_COUNT, "duplicates in {values:?}");
        assert!(!values.contains(&ctx.correct), "{values:?} contains the answer");
    }

    #[test]
    fn strategies_produce_three_unique_in_range_values() {
        let ctx = DistractorContext::new(24, 0, 100)
            .with_operands(Operation::Multiplication, 4, 6);
        let strategies: [Strategy<StdRng>; 4] =
            [proximity, operand_neighbor, wrong_operation, half_or_double];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let values = generate_distractors(&mut rng, ctx, &strategies, 40);
            assert_valid(&values, &ctx);
            assert!(values.iter().all(|v| (0..=100).contains(v)), "{values:?}");
        }
    }

    #[test]
    fn empty_strategy_list_falls_back_to_sequence() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = DistractorContext::new(5, 0, 10);
        let values = generate_distractors::<StdRng>(&mut rng, ctx, &[], 10);
        assert_eq!(values, vec![6, 7, 8]);
    }

    #[test]
    fn padding_turns_downward_at_the_ceiling() {
        let mut pool = DistractorPool::new(DistractorContext::new(10, 0, 11));
        pool.offer(11);
        assert_eq!(pool.finish(), vec![11, 9, 8]);
    }

    #[test]
    fn padding_leaves_a_too_narrow_range() {
        let pool = DistractorPool::new(DistractorContext::new(1, 1, 2));
        assert_eq!(pool.finish(), vec![2, 3, 4]);
    }

    #[test]
    fn offer_rejects_answer_duplicates_and_out_of_range() {
        let mut pool = DistractorPool::new(DistractorContext::new(7, 0, 20));
        assert!(!pool.offer(7));
        assert!(pool.offer(8));
        assert!(!pool.offer(8));
        assert!(!pool.offer(21));
        assert!(!pool.offer(-1));
        assert!(pool.offer(9));
        assert!(pool.offer(10));
        assert!(!pool.offer(11), "pool is already full");
    }

    #[test]
    fn wrong_operation_uses_the_confusable_operation() {
        let mut rng = SequenceSource::new(vec![0.0]);
        let ctx = DistractorContext::new(12, 0, 100)
            .with_operands(Operation::Multiplication, 3, 4);
        assert_eq!(wrong_operation(&mut rng, &ctx), Some(7));
        let eq = DistractorContext::new(12, 0, 100);
        assert_eq!(wrong_operation(&mut rng, &eq), None);
    }

    #[test]
    fn last_digit_keeps_tens_and_changes_units() {
        let mut rng = StdRng::seed_from_u64(9);
        let ctx = DistractorContext::new(47, 0, 100);
        for _ in 0..100 {
            let v = last_digit(&mut rng, &ctx).unwrap();
            assert_eq!(v / 10, 4);
            assert_ne!(v, 47);
        }
    }

    #[test]
    fn digit_flip_rules() {
        assert_eq!(digit_flip(35), Some(53));
        assert_eq!(digit_flip(44), None);
        assert_eq!(digit_flip(40), None);
        assert_eq!(digit_flip(7), None);
    }

    #[test]
    fn spread_is_normalised() {
        let ctx = DistractorContext::new(0, 0, 10).with_spread(0, -2);
        assert_eq!(ctx.spread, (1, 1));
    }
}
