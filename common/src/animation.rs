/// Value shown `elapsed_ms` into a count-up from `start` to `end`.
///
/// Intermediate frames are floored; once the duration has passed the exact
/// `end` value is returned.
pub fn count_up(start: i64, end: i64, elapsed_ms: f64, duration_ms: f64) -> i64 {
    let progress = animation_progress(elapsed_ms, duration_ms);
    if progress >= 1.0 {
        return end;
    }
    (progress * (end - start) as f64 + start as f64).floor() as i64
}

/// Fraction of the animation completed, clamped to `[0, 1]`.
pub fn animation_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 || elapsed_ms.is_nan() {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_up_frames() {
        assert_eq!(count_up(0, 120, 0.0, 1500.0), 0);
        assert_eq!(count_up(0, 120, 750.0, 1500.0), 60);
        assert_eq!(count_up(0, 7, 1000.0, 1500.0), 4);
        assert_eq!(count_up(0, 120, 1500.0, 1500.0), 120);
        assert_eq!(count_up(0, 120, 9000.0, 1500.0), 120);
    }

    #[test]
    fn test_count_up_is_monotonic() {
        let mut last = 0;
        for frame in 0..=90 {
            let value = count_up(0, 431, frame as f64 * 16.7, 1500.0);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 431);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        assert_eq!(count_up(0, 55, 0.0, 0.0), 55);
        assert_eq!(animation_progress(10.0, 0.0), 1.0);
    }
}
