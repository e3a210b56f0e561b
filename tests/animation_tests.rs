//! Integration tests for AnimationRuntime

mod common;
use common::*;

use led_animation_seq::colors::OFF;
use led_animation_seq::{
    Animation, AnimationRegistry, AnimationRuntime, AnimationState, Attributes, DEFAULT_DELAY_MS,
    Strip, TickInstant,
};

/// Flushes on its own during setup.
struct EagerSetup;

impl Animation for EagerSetup {
    fn setup(&self, strip: &mut dyn Strip, _attributes: &Attributes) -> AnimationState {
        strip.fill(RED);
        strip.write();
        AnimationState::new()
    }
}

/// Returns a fresh state on every frame, dropping the delay.
struct Forgetful;

impl Animation for Forgetful {
    fn setup(&self, _strip: &mut dyn Strip, _attributes: &Attributes) -> AnimationState {
        AnimationState::new()
    }

    fn next_step(&self, _strip: &mut dyn Strip, _state: AnimationState) -> AnimationState {
        AnimationState::new()
    }
}

fn registry() -> AnimationRegistry<'static, 4> {
    let mut registry = AnimationRegistry::new();
    registry.register("counter", &FrameCounter, false);
    registry.register("slowing", &SlowingDown, false);
    registry.register("eager", &EagerSetup, false);
    registry.register("forgetful", &Forgetful, false);
    registry
}

fn start<'a>(
    registry: &AnimationRegistry<'a, 4>,
    strip: &mut TestStrip,
    name: Option<&str>,
    now: u32,
) -> AnimationRuntime<'a, TickInstant> {
    AnimationRuntime::new(strip, registry, name, &Attributes::new(), TickInstant(now))
}

#[test]
fn setup_is_flushed_exactly_once() {
    let registry = registry();
    let mut strip = test_strip(4);
    start(&registry, &mut strip, Some("counter"), 0);
    assert_eq!(strip.buffer().write_count(), 1);
    assert_eq!(strip.buffer().shown(), &[GREEN; 4]);
}

#[test]
fn runtime_flushes_even_when_setup_did() {
    let registry = registry();
    let mut strip = test_strip(4);
    start(&registry, &mut strip, Some("eager"), 0);
    assert_eq!(strip.buffer().write_count(), 2);
    assert_eq!(strip.buffer().shown(), &[RED; 4]);
}

#[test]
fn missing_name_gives_passive_runtime() {
    let registry = registry();
    let mut strip = test_strip(4);
    strip.fill(BLUE);
    strip.write();

    let mut runtime = start(&registry, &mut strip, None, 0);

    assert!(runtime.is_passive());
    assert_eq!(runtime.delay_ms(), 0);
    assert_eq!(runtime.deadline(), None);
    assert_eq!(strip.buffer().shown(), &[OFF; 4]);
    assert_eq!(strip.buffer().write_count(), 2);

    assert!(!runtime.check_event(&mut strip, TickInstant(100_000)));
    runtime.trigger_event(&mut strip, TickInstant(100_000));
    assert_eq!(runtime.deadline(), None);
    assert_eq!(strip.buffer().write_count(), 2);
}

#[test]
fn unknown_name_gives_passive_runtime() {
    let registry = registry();
    let mut strip = test_strip(4);
    let runtime = start(&registry, &mut strip, Some("sparkle"), 0);
    assert!(runtime.is_passive());
    assert_eq!(strip.buffer().shown(), &[OFF; 4]);
}

#[test]
fn frames_run_on_default_delay() {
    let registry = registry();
    let mut strip = test_strip(4);
    let mut runtime = start(&registry, &mut strip, Some("counter"), 0);
    assert_eq!(runtime.delay_ms(), DEFAULT_DELAY_MS);

    let mut frames = 0;
    for now in 1..=2000 {
        if runtime.check_event(&mut strip, TickInstant(now)) {
            frames += 1;
        }
    }

    // 501, 1002 and 1503.
    assert_eq!(frames, 3);
    assert_eq!(runtime.state().payload.int(FRAMES), Some(3));
    assert_eq!(strip.buffer().write_count(), 4);
}

#[test]
fn effect_can_change_its_delay_between_frames() {
    let registry = registry();
    let mut strip = test_strip(4);
    let mut runtime = start(&registry, &mut strip, Some("slowing"), 0);
    assert_eq!(runtime.deadline(), Some(TickInstant(10)));

    assert!(runtime.check_event(&mut strip, TickInstant(11)));
    assert_eq!(runtime.delay_ms(), 20);
    assert_eq!(runtime.deadline(), Some(TickInstant(31)));

    assert!(runtime.check_event(&mut strip, TickInstant(32)));
    assert_eq!(runtime.delay_ms(), 30);
    assert_eq!(runtime.state().delay, Some(30));
}

#[test]
fn speed_attribute_sets_frame_interval() {
    let registry = registry();
    let mut strip = test_strip(4);
    let attributes = Attributes::new().with("speed", 40);
    let mut runtime = AnimationRuntime::new(
        &mut strip,
        &registry,
        Some("counter"),
        &attributes,
        TickInstant(0),
    );

    runtime.trigger_event(&mut strip, TickInstant(5));
    assert_eq!(runtime.delay_ms(), 40);
    assert_eq!(runtime.state().delay, Some(40));
    assert_eq!(runtime.deadline(), Some(TickInstant(45)));
}

#[test]
fn frame_without_delay_keeps_previous_interval() {
    let registry = registry();
    let mut strip = test_strip(4);
    let attributes = Attributes::new().with("speed", 70);
    let mut runtime = AnimationRuntime::new(
        &mut strip,
        &registry,
        Some("forgetful"),
        &attributes,
        TickInstant(0),
    );

    runtime.trigger_event(&mut strip, TickInstant(10));
    assert_eq!(runtime.delay_ms(), 70);
    assert_eq!(runtime.state().delay, Some(70));
    assert_eq!(runtime.deadline(), Some(TickInstant(80)));

    assert!(runtime.check_event(&mut strip, TickInstant(81)));
    assert_eq!(runtime.deadline(), Some(TickInstant(151)));
}

#[test]
fn very_long_delay_does_not_fire_early() {
    let registry = registry();
    let mut strip = test_strip(4);
    let attributes = Attributes::new().with("speed", i32::MAX);
    let mut runtime = AnimationRuntime::new(
        &mut strip,
        &registry,
        Some("forgetful"),
        &attributes,
        TickInstant(u32::MAX - 10),
    );

    for now in [u32::MAX, 0, 1_000, 1_000_000_000] {
        assert!(!runtime.check_event(&mut strip, TickInstant(now)));
    }
}
