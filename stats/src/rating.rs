pub const INITIAL_RATING: f64 = 1000.0;

const BASE_GAIN: f64 = 10.0;
const BASE_LOSS: f64 = 10.0;
const ADJUSTMENT_FACTOR: f64 = 0.01;

/// Rating after one match.
///
/// A match with more kills than deaths gains `BASE_GAIN` plus the kill
/// difference scaled by `ADJUSTMENT_FACTOR`. Every other match, including an
/// even one, loses `BASE_LOSS` minus that (non-positive) difference. The
/// result never drops below zero.
pub fn compute_rating(current: f64, kills: i64, deaths: i64) -> f64 {
    let delta = (kills as f64 - deaths as f64) * ADJUSTMENT_FACTOR;

    let rating = if delta > 0.0 {
        current + BASE_GAIN + delta
    } else {
        current - (BASE_LOSS - delta)
    };

    rating.max(0.0)
}
