// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: inertial, snap-aware motion for a one-dimensional strip of items.
//!
//! # Role
//! `roto-core` owns the motion model of a carousel or list strip. It turns a
//! pointer-drag stream and a set of item boundaries into the offset the strip
//! should sit at, the momentum drift after release, the elastic bounce when
//! the strip is pulled past its limits, and the snap to item edges.
//!
//! # Primary responsibilities
//! - **MotionController**: the state machine (`Ready`, `Tracking`,
//!   `Shifting`, `Drifting`, `Bouncing`) and every command an embedder sends.
//! - **VelocitySampler**: flick speed from the most recent sampling interval.
//! - **SnapResolver**: nearest / next item boundary in a direction of travel.
//! - **AnimationPort**: the renderer-facing sink for eased transitions, with
//!   a declarative ([`TransitionAnimator`]) and a frame-stepped
//!   ([`SteppedAnimator`]) implementation.
//!
//! # How it fits
//! Painting, input-kind detection and item measurement live outside the
//! crate. The embedder supplies an [`ItemLayout`] and an [`AnimationPort`],
//! forwards pointer events and calls [`MotionController::tick`] once per
//! frame. Everything is single-threaded and non-blocking: timers are
//! deadlines checked on `tick`, never sleeps.

pub mod animation;
pub mod axis;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod event;
pub mod layout;
pub mod logging;
pub mod sampler;
pub mod snap;
pub mod target;

pub use animation::{
    AnimationId, AnimationPort, AnimationRequest, Cancelled, SteppedAnimator, TransitionAnimator,
};
pub use axis::{Axis, Direction, Point};
pub use config::{ButtonAction, MotionConfig};
pub use controller::{Bounds, MotionController, MotionState};
pub use easing::{CubicBezier, EasingKind};
pub use error::{ConfigError, ParseTargetError, Result};
pub use event::{MotionEvent, Reachability};
pub use layout::{ItemId, ItemLayout, StripLayout};
pub use sampler::{PointerSpeed, VelocitySampler};
pub use snap::{Boundary, SnapResolver};
pub use target::GotoTarget;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, trace_span, warn};
