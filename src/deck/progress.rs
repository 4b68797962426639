//! Deck progress readout
//!
//! Pure function of (current, total): the gauge ratio and the `n / total`
//! label shown in the navigation bar.

use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Completion in (0, 1]
    pub ratio: f64,
    /// One-based position, e.g. "3 / 16"
    pub label: String,
}

impl Progress {
    /// Whole-number percentage for display
    pub fn percent(&self) -> u16 {
        (self.ratio * 100.0).round() as u16
    }
}

/// Progress through a deck of `total` slides while showing `current`
pub fn progress(current: usize, total: NonZeroUsize) -> Progress {
    let total = total.get();
    let position = current.saturating_add(1).min(total);
    let ratio = (position as f64 / total as f64).clamp(f64::MIN_POSITIVE, 1.0);

    Progress {
        ratio,
        label: format!("{} / {}", position, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn first_and_last_slides() {
        let first = progress(0, total(16));
        assert_eq!(first.label, "1 / 16");
        assert!((first.ratio - 1.0 / 16.0).abs() < f64::EPSILON);
        assert_eq!(first.percent(), 6);

        let last = progress(15, total(16));
        assert_eq!(last.label, "16 / 16");
        assert_eq!(last.ratio, 1.0);
        assert_eq!(last.percent(), 100);
    }

    #[test]
    fn single_slide_is_complete() {
        let p = progress(0, total(1));
        assert_eq!(p.ratio, 1.0);
        assert_eq!(p.label, "1 / 1");
    }

    #[test]
    fn monotonic_and_reaches_one_only_at_end() {
        for n in 1..=20 {
            let mut prev = 0.0;
            for current in 0..n {
                let p = progress(current, total(n));
                assert!(p.ratio > 0.0 && p.ratio <= 1.0);
                assert!(p.ratio >= prev);
                assert_eq!(p.ratio == 1.0, current == n - 1);
                prev = p.ratio;
            }
        }
    }

    #[test]
    fn index_past_end_clamps() {
        let p = progress(40, total(5));
        assert_eq!(p.ratio, 1.0);
        assert_eq!(p.label, "5 / 5");
    }
}
