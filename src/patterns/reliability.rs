// =============================================================================
// Pattern Reliability
// =============================================================================
//
//   reliability = 0.4 * symmetry + 0.3 * volume + 0.3 * momentum
//
// symmetry: mean of the first half of the pattern window against the mean of
//           the mirrored second half: 1 - min(1, |left - right| / left)
// volume:   fixed 0.8 until volume confirmation is wired in
// momentum: |sum of the five one-step returns ending at the pattern end|,
//           capped at 1

const SYMMETRY_WEIGHT: f64 = 0.4;
const VOLUME_WEIGHT: f64 = 0.3;
const MOMENTUM_WEIGHT: f64 = 0.3;

const VOLUME_SCORE: f64 = 0.8;

/// Number of one-step returns summed into the momentum score.
const MOMENTUM_STEPS: usize = 5;

pub fn pattern_reliability(prices: &[f64], start: usize, end: usize) -> f64 {
    symmetry(prices, start, end) * SYMMETRY_WEIGHT
        + VOLUME_SCORE * VOLUME_WEIGHT
        + momentum(prices, end) * MOMENTUM_WEIGHT
}

/// Mirror symmetry of `prices[start..=end]`; 0 for windows shorter than 4.
pub fn symmetry(prices: &[f64], start: usize, end: usize) -> f64 {
    if end < start + 3 || end >= prices.len() {
        return 0.0;
    }

    let midpoint = (start + end) as f64 / 2.0;
    let (mut left_sum, mut right_sum, mut count) = (0.0, 0.0, 0usize);
    let mut i = start;
    while (i as f64) < midpoint {
        left_sum += prices[i];
        right_sum += prices[end - (i - start)];
        count += 1;
        i += 1;
    }

    let left_avg = left_sum / count as f64;
    let right_avg = right_sum / count as f64;
    if left_avg == 0.0 {
        return 0.0;
    }

    1.0 - ((left_avg - right_avg).abs() / left_avg).min(1.0)
}

/// Short-term momentum into the bar after `end`.
///
/// Needs `MOMENTUM_STEPS` bars before `end` and one after it; 0 otherwise.
pub fn momentum(prices: &[f64], end: usize) -> f64 {
    if end < MOMENTUM_STEPS || end + 1 >= prices.len() {
        return 0.0;
    }

    let total: f64 = (end + 1 - MOMENTUM_STEPS..=end)
        .filter(|&i| prices[i] != 0.0)
        .map(|i| (prices[i + 1] - prices[i]) / prices[i])
        .sum();

    total.abs().min(1.0)
}
