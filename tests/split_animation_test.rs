// Tests for split line easing and its animation timer

use std::time::{Duration, Instant};

use splitview::logic::split::{clamp_target, Point, SplitAnimator, SplitPhase, SplitState, TICK_INTERVAL};

/// Drive the animator tick by tick until it stops, returning every x seen
fn run_to_rest(animator: &mut SplitAnimator, start: Instant) -> Vec<f64> {
    let mut xs = vec![animator.position().x];
    let mut now = start;
    for _ in 0..1000 {
        if !animator.is_animating() {
            break;
        }
        now += TICK_INTERVAL;
        animator.advance(now);
        xs.push(animator.position().x);
    }
    xs
}

#[test]
fn test_split_converges_monotonically_and_stops_exactly() {
    let start = Instant::now();
    let mut animator = SplitAnimator::new(Point::new(0.0, 0.0));
    animator.set_target(Point::new(100.0, 0.0), start);

    let xs = run_to_rest(&mut animator, start);

    assert!(!animator.is_animating(), "animation must stop");
    assert_eq!(animator.position(), Point::new(100.0, 0.0));
    for pair in xs.windows(2) {
        assert!(pair[1] >= pair[0], "x went backwards: {:?}", pair);
        assert!(pair[1] <= 100.0, "x overshot: {}", pair[1]);
    }
    assert!(xs.len() > 2, "should take several ticks, took {}", xs.len() - 1);
}

#[test]
fn test_leftover_velocity_carries_into_next_retarget() {
    let start = Instant::now();
    let mut animator = SplitAnimator::new(Point::new(0.0, 0.0));
    animator.set_target(Point::new(100.0, 0.0), start);
    run_to_rest(&mut animator, start);

    let rest_velocity = animator.state().velocity.x;
    assert_eq!(animator.position().x, 100.0);
    assert!(rest_velocity > 0.0, "velocity survives the snap: {}", rest_velocity);

    let later = start + Duration::from_secs(10);
    animator.set_target(Point::new(200.0, 0.0), later);
    assert!(animator.advance(later + TICK_INTERVAL));

    let velocity = rest_velocity * 0.5 + 100.0 * 0.1;
    assert_eq!(animator.state().velocity.x, velocity);
    assert_eq!(animator.position().x, 100.0 + velocity);
    assert!(animator.position().x > 110.0);
}

#[test]
fn test_axes_are_independent() {
    let mut state = SplitState::at(Point::new(50.0, 50.0));
    state.target = Point::new(50.0, 80.0);
    state.tick();

    assert_eq!(state.position.x, 50.0, "x already at target stays put");
    assert!((state.position.y - 53.0).abs() < 1e-9, "y moved: {}", state.position.y);
    assert!(!state.is_settled());
}

#[test]
fn test_first_tick_follows_easing_formula() {
    let mut state = SplitState::at(Point::new(0.0, 0.0));
    state.target = Point::new(100.0, 0.0);

    state.tick();
    // velocity = 0 * 0.5 + 100 * 0.1
    assert_eq!(state.velocity.x, 10.0);
    assert_eq!(state.position.x, 10.0);

    state.tick();
    // velocity = 10 * 0.5 + 90 * 0.1
    assert_eq!(state.velocity.x, 14.0);
    assert_eq!(state.position.x, 24.0);
}

#[test]
fn test_no_tick_before_interval() {
    let start = Instant::now();
    let mut animator = SplitAnimator::new(Point::new(0.0, 0.0));
    animator.set_target(Point::new(100.0, 0.0), start);

    assert!(!animator.advance(start));
    assert!(!animator.advance(start + TICK_INTERVAL - Duration::from_millis(1)));
    assert!(animator.advance(start + TICK_INTERVAL));
}

#[test]
fn test_retarget_while_animating_keeps_single_timer() {
    let start = Instant::now();
    let mut animator = SplitAnimator::new(Point::new(0.0, 0.0));
    animator.set_target(Point::new(100.0, 0.0), start);
    let first_phase = animator.phase();

    // A second update only moves the target; the pending tick is unchanged
    animator.set_target(Point::new(40.0, 0.0), start + Duration::from_millis(5));
    assert_eq!(animator.phase(), first_phase);
    assert_eq!(animator.state().target, Point::new(40.0, 0.0));

    run_to_rest(&mut animator, start);
    assert_eq!(animator.position(), Point::new(40.0, 0.0));
    assert_eq!(animator.phase(), SplitPhase::Idle);
}

#[test]
fn test_target_at_current_position_settles_on_first_tick() {
    let start = Instant::now();
    let mut animator = SplitAnimator::new(Point::new(30.0, 30.0));
    animator.set_target(Point::new(30.0, 30.0), start);
    assert!(animator.is_animating());

    assert!(!animator.advance(start + TICK_INTERVAL), "position did not change");
    assert!(!animator.is_animating());
}

#[test]
fn test_clamp_target_edges() {
    assert_eq!(clamp_target(-1.0, 5.0, 640.0, 480.0), Point::new(0.0, 5.0));
    assert_eq!(clamp_target(640.0, 5.0, 640.0, 480.0), Point::new(639.0, 5.0));
    assert_eq!(clamp_target(10.0, 480.0, 640.0, 480.0), Point::new(10.0, 479.0));
    // y below zero is left alone
    assert_eq!(clamp_target(10.0, -3.0, 640.0, 480.0), Point::new(10.0, -3.0));
}
