#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use roto_core::{
    Axis, Direction, GotoTarget, ItemId, MotionConfig, MotionController, MotionState, Point,
    SteppedAnimator, StripLayout,
};
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Command {
    Down(i16),
    Move(i16),
    Up,
    Wait(u16),
    Shift(bool),
    Step(bool),
    Index(u8),
    Item(u8),
    Offset(i32),
    Enable(bool),
    Remeasure,
}

#[derive(Debug, Arbitrary)]
struct Input {
    extents: Vec<u8>,
    viewport: u16,
    vertical: bool,
    snap: bool,
    start_offset: i8,
    end_offset: u8,
    commands: Vec<Command>,
}

fn dir(prev: bool) -> Direction {
    if prev { Direction::Prev } else { Direction::Next }
}

fuzz_target!(|input: Input| {
    if input.extents.len() > 64 || input.commands.len() > 512 {
        return;
    }
    let axis = if input.vertical {
        Axis::Vertical
    } else {
        Axis::Horizontal
    };
    let config = MotionConfig::default()
        .with_direction(axis)
        .with_snap(input.snap)
        .with_offsets(f64::from(input.start_offset), f64::from(input.end_offset));
    let layout = StripLayout::new(
        input.extents.iter().map(|&e| f64::from(e)),
        f64::from(input.viewport),
    );
    let Ok(mut c) = MotionController::new(config, layout, SteppedAnimator::new(0.0)) else {
        return;
    };

    let mut now = Instant::now();
    for command in input.commands {
        match command {
            Command::Down(v) => c.pointer_down(axis.point_at(f64::from(v)), now),
            Command::Move(v) => c.pointer_move(axis.point_at(f64::from(v)), now),
            Command::Up => c.pointer_up(now),
            Command::Wait(ms) => {
                now += Duration::from_millis(u64::from(ms));
                c.tick(now);
            }
            Command::Shift(prev) => c.shift(dir(prev), now),
            Command::Step(prev) => c.step(dir(prev), now),
            Command::Index(i) => c.goto(usize::from(i), now),
            Command::Item(i) => c.goto(GotoTarget::Item(ItemId(u64::from(i))), now),
            Command::Offset(px) => c.goto(GotoTarget::Offset(f64::from(px)), now),
            Command::Enable(on) => c.set_scrolling_enabled(on, now),
            Command::Remeasure => c.remeasure(now),
        }
        let bounds = c.bounds();
        assert!(bounds.min <= bounds.max, "bounds inverted: {bounds:?}");
        assert!(c.offset().is_finite());
    }

    // Close any gesture and let everything settle.
    c.pointer_up(now);
    for _ in 0..400 {
        now += Duration::from_millis(16);
        c.tick(now);
    }
    assert_eq!(c.state(), MotionState::Ready);
    let offset = c.offset();
    let bounds = c.bounds();
    assert!(
        offset >= bounds.min - 1e-6 && offset <= bounds.max + 1e-6,
        "settled at {offset} outside {bounds:?}"
    );
});
