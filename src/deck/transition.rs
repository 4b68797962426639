//! Slide transition presenter
//!
//! Decides how the active slide enters and how the previous one leaves,
//! keyed by navigation direction. The presenter only produces descriptors
//! (`PhaseStyle`); the renderer turns them into pixels, or cells here.
//!
//! # Phases
//!
//! ```text
//!   Enter(dir) ──spring/tween──▶ Center            (new slide)
//!   Center     ──spring/tween──▶ Exit(dir)         (previous slide)
//! ```
//!
//! Horizontal offset follows a damped spring; opacity and scale run for a
//! fixed `FADE_DURATION` regardless of distance. A new `present()` call while
//! a transition is running replaces it: the old exiting slide is dropped and
//! the current slide starts leaving from wherever it is.

use std::time::{Duration, Instant};

use super::navigation::Direction;

/// Opacity/scale animation length
pub const FADE_DURATION: Duration = Duration::from_millis(400);

/// Scale of a slide that is fully off-screen
const OFFSCREEN_SCALE: f64 = 0.95;

/// Spring settles once both are below these
const REST_DELTA: f64 = 0.001;
const REST_SPEED: f64 = 0.01;

// ─────────────────────────────────────────────────────────────────────────────
// Phase descriptors
// ─────────────────────────────────────────────────────────────────────────────

/// Where a slide is in its transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start pose of an incoming slide
    Enter(Direction),
    /// Resting, fully visible
    Center,
    /// End pose of an outgoing slide
    Exit(Direction),
}

/// Declarative visual treatment for one slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStyle {
    /// Horizontal offset in viewport widths (+1.0 = one width to the right)
    pub offset_x: f64,
    pub opacity: f64,
    pub scale: f64,
    /// Higher draws on top
    pub z_index: u8,
}

impl Phase {
    pub fn style(self) -> PhaseStyle {
        match self {
            Phase::Enter(direction) => PhaseStyle {
                offset_x: if direction == Direction::Forward { 1.0 } else { -1.0 },
                opacity: 0.0,
                scale: OFFSCREEN_SCALE,
                z_index: 1,
            },
            Phase::Center => PhaseStyle {
                offset_x: 0.0,
                opacity: 1.0,
                scale: 1.0,
                z_index: 1,
            },
            Phase::Exit(direction) => PhaseStyle {
                offset_x: if direction == Direction::Backward { 1.0 } else { -1.0 },
                opacity: 0.0,
                scale: OFFSCREEN_SCALE,
                z_index: 0,
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Spring
// ─────────────────────────────────────────────────────────────────────────────

/// Damped harmonic oscillator parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 1.0,
        }
    }
}

impl Spring {
    /// Displacement from target and velocity `t` seconds after release
    ///
    /// Closed-form solution of `m·x'' + c·x' + k·x = 0` with `x(0) = x0`,
    /// `x'(0) = v0`.
    pub fn solve(&self, x0: f64, v0: f64, t: f64) -> (f64, f64) {
        let omega = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping / (2.0 * (self.stiffness * self.mass).sqrt());

        if (zeta - 1.0).abs() < 1e-6 {
            // Critically damped
            let b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let x = decay * (x0 + b * t);
            let v = decay * (b - omega * (x0 + b * t));
            (x, v)
        } else if zeta < 1.0 {
            let a = zeta * omega;
            let wd = omega * (1.0 - zeta * zeta).sqrt();
            let b = (v0 + a * x0) / wd;
            let decay = (-a * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = decay * (x0 * cos + b * sin);
            let v = decay * ((b * wd - a * x0) * cos - (x0 * wd + a * b) * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
        }
    }
}

/// One spring-driven value
#[derive(Debug, Clone, Copy)]
struct SpringMotion {
    from: f64,
    to: f64,
    velocity: f64,
    started: Instant,
}

impl SpringMotion {
    fn sample(&self, spring: &Spring, now: Instant) -> (f64, f64, bool) {
        let t = now.saturating_duration_since(self.started).as_secs_f64();
        let (x, v) = spring.solve(self.from - self.to, self.velocity, t);
        let settled = x.abs() < REST_DELTA && v.abs() < REST_SPEED;
        if settled {
            (self.to, 0.0, true)
        } else {
            (self.to + x, v, false)
        }
    }
}

/// Linear interpolation over a fixed duration
#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl Tween {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn sample(&self, now: Instant) -> f64 {
        let p = self.progress(now);
        if p >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * p
        }
    }

    fn finished(&self, now: Instant) -> bool {
        self.from == self.to || self.progress(now) >= 1.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layers
// ─────────────────────────────────────────────────────────────────────────────

/// A slide being animated toward `target`
#[derive(Debug, Clone)]
struct SlideLayer {
    slide: usize,
    target: Phase,
    offset: SpringMotion,
    opacity: Tween,
    scale: Tween,
}

impl SlideLayer {
    /// Layer already resting at `Center`
    fn resting(slide: usize, now: Instant) -> Self {
        Self::between(slide, Phase::Center.style(), 0.0, Phase::Center, now)
    }

    fn between(slide: usize, from: PhaseStyle, velocity: f64, target: Phase, now: Instant) -> Self {
        let to = target.style();
        Self {
            slide,
            target,
            offset: SpringMotion {
                from: from.offset_x,
                to: to.offset_x,
                velocity,
                started: now,
            },
            opacity: Tween {
                from: from.opacity,
                to: to.opacity,
                started: now,
                duration: FADE_DURATION,
            },
            scale: Tween {
                from: from.scale,
                to: to.scale,
                started: now,
                duration: FADE_DURATION,
            },
        }
    }

    fn sample(&self, spring: &Spring, now: Instant) -> (PhaseStyle, f64, bool) {
        let (offset_x, velocity, offset_done) = self.offset.sample(spring, now);
        let done = offset_done && self.opacity.finished(now) && self.scale.finished(now);
        let style = PhaseStyle {
            offset_x,
            opacity: self.opacity.sample(now),
            scale: self.scale.sample(now),
            z_index: self.target.style().z_index,
        };
        (style, velocity, done)
    }
}

/// A slide to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedLayer {
    pub slide: usize,
    /// Phase the layer is heading to
    pub target: Phase,
    pub style: PhaseStyle,
}

/// Everything the renderer needs for one frame, bottom layer first
#[derive(Debug, Clone, PartialEq)]
pub struct PresenterFrame {
    pub layers: Vec<RenderedLayer>,
    pub animating: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Presenter
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the active (centered) slide and at most one exiting slide
#[derive(Debug, Clone)]
pub struct Presenter {
    spring: Spring,
    active: SlideLayer,
    exiting: Option<SlideLayer>,
}

impl Presenter {
    /// Show `slide` already centered, with no entrance animation
    pub fn new(slide: usize, now: Instant) -> Self {
        Self::with_spring(slide, Spring::default(), now)
    }

    pub fn with_spring(slide: usize, spring: Spring, now: Instant) -> Self {
        Self {
            spring,
            active: SlideLayer::resting(slide, now),
            exiting: None,
        }
    }

    /// Start transitioning to `slide`, entering from `direction`
    ///
    /// Supersedes any running transition: the previous exiting slide is
    /// dropped and the current one leaves from its sampled pose.
    pub fn present(&mut self, slide: usize, direction: Direction, now: Instant) {
        if slide == self.active.slide {
            return;
        }

        let (pose, velocity, _) = self.active.sample(&self.spring, now);
        let leaving = self.active.slide;

        if let Some(dropped) = self.exiting.take() {
            tracing::trace!(slide = dropped.slide, "superseded exit dropped");
        }

        self.exiting = Some(SlideLayer::between(
            leaving,
            pose,
            velocity,
            Phase::Exit(direction),
            now,
        ));
        self.active = SlideLayer::between(
            slide,
            Phase::Enter(direction).style(),
            0.0,
            Phase::Center,
            now,
        );
    }

    /// Drop layers that have finished; returns whether anything still moves
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(exiting) = &self.exiting {
            let (_, _, done) = exiting.sample(&self.spring, now);
            if done {
                self.exiting = None;
            }
        }
        self.is_animating(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        let active_moving = !self.active.sample(&self.spring, now).2;
        active_moving || self.exiting.is_some()
    }

    /// Slide currently targeting `Center`
    pub fn active_slide(&self) -> usize {
        self.active.slide
    }

    pub fn exiting_slide(&self) -> Option<usize> {
        self.exiting.as_ref().map(|l| l.slide)
    }

    /// Sample every live layer at `now`
    pub fn frame(&self, now: Instant) -> PresenterFrame {
        let mut layers = Vec::with_capacity(2);
        let mut animating = false;

        for layer in self.exiting.iter().chain(std::iter::once(&self.active)) {
            let (style, _, done) = layer.sample(&self.spring, now);
            animating |= !done;
            layers.push(RenderedLayer {
                slide: layer.slide,
                target: layer.target,
                style,
            });
        }

        layers.sort_by_key(|l| l.style.z_index);
        PresenterFrame { layers, animating }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn phase_styles_match_direction() {
        let enter_fwd = Phase::Enter(Direction::Forward).style();
        assert_eq!(enter_fwd.offset_x, 1.0);
        assert_eq!(enter_fwd.opacity, 0.0);
        assert_eq!(enter_fwd.scale, 0.95);

        assert_eq!(Phase::Enter(Direction::Backward).style().offset_x, -1.0);

        // Exit goes the opposite way to entry
        assert_eq!(Phase::Exit(Direction::Forward).style().offset_x, -1.0);
        assert_eq!(Phase::Exit(Direction::Backward).style().offset_x, 1.0);
        assert_eq!(Phase::Exit(Direction::Forward).style().z_index, 0);

        let center = Phase::Center.style();
        assert_eq!(
            center,
            PhaseStyle {
                offset_x: 0.0,
                opacity: 1.0,
                scale: 1.0,
                z_index: 1
            }
        );
    }

    #[test]
    fn spring_starts_at_initial_displacement() {
        let spring = Spring::default();
        let (x, v) = spring.solve(1.0, 0.0, 0.0);
        assert!((x - 1.0).abs() < EPS);
        assert!(v.abs() < EPS);
    }

    #[test]
    fn spring_decays_for_all_damping_regimes() {
        for damping in [10.0, 2.0 * 300f64.sqrt(), 80.0] {
            let spring = Spring {
                damping,
                ..Spring::default()
            };
            let (x, v) = spring.solve(1.0, 0.0, 3.0);
            assert!(x.abs() < 1e-3, "damping {damping}: x = {x}");
            assert!(v.abs() < 1e-2, "damping {damping}: v = {v}");
        }
    }

    #[test]
    fn spring_velocity_matches_numeric_derivative() {
        let spring = Spring::default();
        let h = 1e-6;
        for t in [0.01, 0.05, 0.1, 0.3] {
            let (x1, v) = spring.solve(1.0, 2.0, t);
            let (x2, _) = spring.solve(1.0, 2.0, t + h);
            assert!(((x2 - x1) / h - v).abs() < 1e-3);
        }
    }

    #[test]
    fn initial_slide_is_centered_and_still() {
        let now = Instant::now();
        let presenter = Presenter::new(0, now);
        let frame = presenter.frame(now);

        assert!(!frame.animating);
        assert_eq!(frame.layers.len(), 1);
        assert_eq!(frame.layers[0].style, Phase::Center.style());
        assert!(!presenter.is_animating(now));
    }

    #[test]
    fn forward_transition_runs_and_settles() {
        let start = Instant::now();
        let mut presenter = Presenter::new(0, start);
        presenter.present(1, Direction::Forward, start);

        let frame = presenter.frame(start);
        assert!(frame.animating);
        assert_eq!(frame.layers.len(), 2);

        // Exiting slide below, entering slide on top
        let (below, above) = (frame.layers[0], frame.layers[1]);
        assert_eq!(below.slide, 0);
        assert_eq!(below.target, Phase::Exit(Direction::Forward));
        assert_eq!(below.style.offset_x, 0.0);
        assert_eq!(above.slide, 1);
        assert_eq!(above.target, Phase::Center);
        assert_eq!(above.style.offset_x, 1.0);
        assert_eq!(above.style.opacity, 0.0);

        // Halfway through the fade
        let mid = presenter.frame(start + FADE_DURATION / 2);
        let entering = mid.layers.iter().find(|l| l.slide == 1).unwrap();
        assert!((entering.style.opacity - 0.5).abs() < 1e-6);
        assert!(entering.style.offset_x < 1.0);

        let later = start + Duration::from_secs(3);
        assert!(!presenter.tick(later));
        assert_eq!(presenter.exiting_slide(), None);
        let settled = presenter.frame(later);
        assert_eq!(settled.layers.len(), 1);
        assert_eq!(settled.layers[0].style, Phase::Center.style());
    }

    #[test]
    fn opacity_finishes_at_fixed_duration() {
        let start = Instant::now();
        let mut presenter = Presenter::new(0, start);
        presenter.present(1, Direction::Backward, start);

        let frame = presenter.frame(start + FADE_DURATION);
        let entering = frame.layers.iter().find(|l| l.slide == 1).unwrap();
        let exiting = frame.layers.iter().find(|l| l.slide == 0).unwrap();
        assert_eq!(entering.style.opacity, 1.0);
        assert_eq!(entering.style.scale, 1.0);
        assert_eq!(exiting.style.opacity, 0.0);
    }

    #[test]
    fn rapid_navigation_supersedes_without_queueing() {
        let start = Instant::now();
        let mut presenter = Presenter::new(0, start);
        presenter.present(1, Direction::Forward, start);

        let mid = start + Duration::from_millis(100);
        let entering_pose = presenter
            .frame(mid)
            .layers
            .into_iter()
            .find(|l| l.slide == 1)
            .unwrap()
            .style;

        presenter.present(2, Direction::Forward, mid);

        // Slide 0 is gone, slide 1 leaves from where it was, slide 2 enters
        assert_eq!(presenter.active_slide(), 2);
        assert_eq!(presenter.exiting_slide(), Some(1));

        let frame = presenter.frame(mid);
        assert_eq!(frame.layers.len(), 2);
        let leaving = frame.layers.iter().find(|l| l.slide == 1).unwrap();
        assert!((leaving.style.offset_x - entering_pose.offset_x).abs() < 1e-9);
        assert!((leaving.style.opacity - entering_pose.opacity).abs() < 1e-9);
        assert_eq!(leaving.style.z_index, 0);

        let centered = frame
            .layers
            .iter()
            .filter(|l| l.target == Phase::Center)
            .count();
        assert_eq!(centered, 1);
    }

    #[test]
    fn presenting_active_slide_is_noop() {
        let now = Instant::now();
        let mut presenter = Presenter::new(3, now);
        presenter.present(3, Direction::Forward, now);
        assert_eq!(presenter.exiting_slide(), None);
        assert!(!presenter.is_animating(now));
    }
}
