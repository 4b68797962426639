//! Slide navigation state machine
//!
//! `Navigator` owns the current slide index and the direction of the last
//! successful move. Steps that would leave `[0, len)` are ignored: they are
//! reported as `Navigation::OutOfRange` and leave the state untouched.

use std::num::NonZeroUsize;

/// Sign of the most recent index change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Moved to a lower index
    Backward,
    /// No movement yet
    #[default]
    Still,
    /// Moved to a higher index
    Forward,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::Still => 0,
            Direction::Forward => 1,
        }
    }
}

/// A single navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Back,
    Forward,
}

impl Step {
    pub fn direction(self) -> Direction {
        match self {
            Step::Back => Direction::Backward,
            Step::Forward => Direction::Forward,
        }
    }
}

/// Snapshot of navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current: usize,
    pub direction: Direction,
}

/// Outcome of `Navigator::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved {
        from: usize,
        to: usize,
        direction: Direction,
    },
    /// Step would leave the deck; nothing changed
    OutOfRange { at: usize, step: Step },
}

impl Navigation {
    pub fn moved(&self) -> bool {
        matches!(self, Navigation::Moved { .. })
    }
}

/// Bounded cursor over `len` slides
#[derive(Debug, Clone)]
pub struct Navigator {
    len: NonZeroUsize,
    state: NavigationState,
}

impl Navigator {
    /// Start at the first slide with no direction
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            len,
            state: NavigationState {
                current: 0,
                direction: Direction::Still,
            },
        }
    }

    /// Move one slide back or forward, clamped to the deck
    pub fn advance(&mut self, step: Step) -> Navigation {
        let from = self.state.current;
        let candidate = match step {
            Step::Back => from.checked_sub(1),
            Step::Forward => from.checked_add(1).filter(|&next| next < self.len.get()),
        };

        let Some(to) = candidate else {
            tracing::debug!(slide = from, ?step, "navigation out of range, ignored");
            return Navigation::OutOfRange { at: from, step };
        };

        let direction = step.direction();
        self.state = NavigationState {
            current: to,
            direction,
        };
        tracing::debug!(from, to, ?direction, "slide changed");

        Navigation::Moved {
            from,
            to,
            direction,
        }
    }

    pub fn current(&self) -> usize {
        self.state.current
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn len(&self) -> NonZeroUsize {
        self.len
    }

    pub fn is_first(&self) -> bool {
        self.state.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.state.current + 1 == self.len.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(len: usize) -> Navigator {
        Navigator::new(NonZeroUsize::new(len).unwrap())
    }

    #[test]
    fn starts_at_first_slide_without_direction() {
        let n = nav(4);
        assert_eq!(n.current(), 0);
        assert_eq!(n.direction(), Direction::Still);
        assert!(n.is_first());
        assert!(!n.is_last());
    }

    #[test]
    fn forward_three_then_back_one() {
        let mut n = nav(5);
        for _ in 0..3 {
            assert!(n.advance(Step::Forward).moved());
        }
        assert_eq!(
            n.state(),
            NavigationState {
                current: 3,
                direction: Direction::Forward
            }
        );

        let result = n.advance(Step::Back);
        assert_eq!(
            result,
            Navigation::Moved {
                from: 3,
                to: 2,
                direction: Direction::Backward
            }
        );
        assert_eq!(n.current(), 2);
        assert_eq!(n.direction(), Direction::Backward);
    }

    #[test]
    fn back_at_first_is_noop() {
        let mut n = nav(3);
        assert_eq!(
            n.advance(Step::Back),
            Navigation::OutOfRange {
                at: 0,
                step: Step::Back
            }
        );
        assert_eq!(n.current(), 0);
        assert_eq!(n.direction(), Direction::Still);
    }

    #[test]
    fn forward_at_last_keeps_previous_direction() {
        let mut n = nav(2);
        n.advance(Step::Forward);
        assert!(n.is_last());

        assert!(!n.advance(Step::Forward).moved());
        assert_eq!(n.current(), 1);
        assert_eq!(n.direction(), Direction::Forward);

        n.advance(Step::Back);
        assert!(!n.advance(Step::Back).moved());
        assert_eq!(n.direction(), Direction::Backward);
    }

    #[test]
    fn single_slide_deck_never_moves() {
        let mut n = nav(1);
        assert!(n.is_first() && n.is_last());
        assert!(!n.advance(Step::Forward).moved());
        assert!(!n.advance(Step::Back).moved());
        assert_eq!(n.current(), 0);
    }

    #[test]
    fn index_stays_in_bounds_for_arbitrary_sequences() {
        // Deterministic pseudo-random walk over several deck sizes
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for len in 1..=9 {
            let mut n = nav(len);
            for _ in 0..500 {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                let step = if seed & 1 == 0 { Step::Back } else { Step::Forward };
                let before = n.state();

                match n.advance(step) {
                    Navigation::Moved { from, to, direction } => {
                        assert_eq!(from, before.current);
                        assert_eq!(direction, step.direction());
                        assert_eq!(to as isize - from as isize, direction.sign() as isize);
                    }
                    Navigation::OutOfRange { .. } => assert_eq!(n.state(), before),
                }
                assert!(n.current() < len);
            }
        }
    }

    #[test]
    fn direction_signs() {
        assert_eq!(Direction::Backward.sign(), -1);
        assert_eq!(Direction::Still.sign(), 0);
        assert_eq!(Direction::Forward.sign(), 1);
    }
}
