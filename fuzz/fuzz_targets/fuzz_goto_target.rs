#![no_main]

use libfuzzer_sys::fuzz_target;
use roto_core::{GotoTarget, MotionConfig, MotionController, StripLayout, TransitionAnimator};
use web_time::{Duration, Instant};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 256 {
        return;
    }

    // Parsing must never panic; offsets are always whole pixels.
    if let Ok(GotoTarget::Offset(px)) = text.parse::<GotoTarget>() {
        assert!(px.is_finite());
        assert_eq!(px.fract(), 0.0);
    }

    // Any string is accepted by the controller; malformed ones are no-ops.
    let Ok(mut c) = MotionController::new(
        MotionConfig::default(),
        StripLayout::uniform(6, 90.0, 250.0),
        TransitionAnimator::new(0.0),
    ) else {
        return;
    };
    let t = Instant::now();
    c.goto_str(text, t);
    c.tick(t + Duration::from_secs(5));
    assert!(c.bounds().contains(c.offset()), "offset {} escaped", c.offset());
});
