//! Split line animation
//!
//! The divider eases toward its target with a damped spring:
//! each tick, per axis, `velocity = velocity * 0.5 + (target - position) * 0.1`,
//! then `position += velocity`. Within half a pixel of the target the
//! position snaps to it exactly; velocity is left as is and carries into the
//! next retarget. Axes are independent; animation stops once both sit exactly
//! on their targets.

use std::time::{Duration, Instant};

/// Time between animation ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

const DAMPING: f64 = 0.5;
const STIFFNESS: f64 = 0.1;
const SNAP_DISTANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplitState {
    pub position: Point,
    pub velocity: Point,
    pub target: Point,
}

fn step_axis(position: &mut f64, velocity: &mut f64, target: f64) {
    *velocity = *velocity * DAMPING + (target - *position) * STIFFNESS;
    *position += *velocity;

    if (*position - target).abs() < SNAP_DISTANCE {
        *position = target;
    }
}

impl SplitState {
    /// At rest at `position`
    pub fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Point::default(),
            target: position,
        }
    }

    /// Advance one tick
    pub fn tick(&mut self) {
        step_axis(&mut self.position.x, &mut self.velocity.x, self.target.x);
        step_axis(&mut self.position.y, &mut self.velocity.y, self.target.y);
    }

    pub fn is_settled(&self) -> bool {
        self.position == self.target
    }
}

/// Whether the animation timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPhase {
    Idle,
    Animating { next_tick: Instant },
}

/// Split state plus its single animation timer
#[derive(Debug, Clone)]
pub struct SplitAnimator {
    state: SplitState,
    phase: SplitPhase,
}

impl SplitAnimator {
    pub fn new(position: Point) -> Self {
        Self {
            state: SplitState::at(position),
            phase: SplitPhase::Idle,
        }
    }

    pub fn state(&self) -> &SplitState {
        &self.state
    }

    pub fn position(&self) -> Point {
        self.state.position
    }

    pub fn phase(&self) -> SplitPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, SplitPhase::Animating { .. })
    }

    /// Move the target; starts the timer if it is not already running
    pub fn set_target(&mut self, target: Point, now: Instant) {
        self.state.target = target;
        if self.phase == SplitPhase::Idle {
            self.phase = SplitPhase::Animating {
                next_tick: now + TICK_INTERVAL,
            };
        }
    }

    /// Jump straight to `position` and stop animating
    pub fn reset(&mut self, position: Point) {
        self.state = SplitState::at(position);
        self.phase = SplitPhase::Idle;
    }

    /// Run a tick if one is due. Returns true when the position changed.
    ///
    /// At most one tick runs per call; a late loop iteration does not replay
    /// missed ticks.
    pub fn advance(&mut self, now: Instant) -> bool {
        let SplitPhase::Animating { next_tick } = self.phase else {
            return false;
        };
        if now < next_tick {
            return false;
        }

        let before = self.state.position;
        self.state.tick();

        self.phase = if self.state.is_settled() {
            SplitPhase::Idle
        } else {
            SplitPhase::Animating {
                next_tick: now + TICK_INTERVAL,
            }
        };

        self.state.position != before
    }

    /// How long until the next tick is due, if the timer is running
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            SplitPhase::Idle => None,
            SplitPhase::Animating { next_tick } => Some(next_tick.saturating_duration_since(now)),
        }
    }
}

/// Clamp a pointer position into the view
///
/// x is kept within `[0, width - 1]`; y is only clamped from above.
///
/// # Examples
/// ```
/// use splitview::logic::split::{clamp_target, Point};
///
/// assert_eq!(clamp_target(-5.0, 10.0, 200.0, 100.0), Point::new(0.0, 10.0));
/// assert_eq!(clamp_target(250.0, 120.0, 200.0, 100.0), Point::new(199.0, 99.0));
/// ```
pub fn clamp_target(x: f64, y: f64, width: f64, height: f64) -> Point {
    let mut target = Point::new(x, y);
    if target.x < 0.0 {
        target.x = 0.0;
    }
    if target.x >= width {
        target.x = width - 1.0;
    }
    if target.y >= height {
        target.y = height - 1.0;
    }
    target
}
