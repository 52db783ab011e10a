use stats::rating::{compute_rating, INITIAL_RATING};

fn assert_close(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 1e-9,
        "Expected {} but got {}",
        expected,
        actual
    );
}

#[test]
fn positive_match() {
    assert_close(1010.1, compute_rating(INITIAL_RATING, 20, 10));
}

#[test]
fn negative_match() {
    assert_close(989.85, compute_rating(INITIAL_RATING, 5, 20));
}

#[test]
fn even_match_still_loses_base() {
    assert_close(990.0, compute_rating(INITIAL_RATING, 12, 12));
    assert_close(990.0, compute_rating(INITIAL_RATING, 0, 0));
}

#[test]
fn clamps_at_zero() {
    assert_eq!(0.0, compute_rating(5.0, 0, 20));
    assert_eq!(0.0, compute_rating(0.0, 0, 1));
}

#[test]
fn no_upper_bound() {
    assert_close(1_000_060.0, compute_rating(1_000_000.0, 5000, 0));
}
