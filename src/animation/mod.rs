//! Animation module for the phased growth and bloom show
//!
//! Handles easing, per-phase clocks, the frame-request seam and the
//! scheduler that sequences growth, bloom and the optional slide.

mod easing;
mod phase;
mod frames;
mod scheduler;

pub use easing::{ease_out_cubic, ease_in_out_cubic};
pub use phase::{AnimationPhase, PhaseClock};
pub use frames::{AnimationFrames, FrameId, FrameRequester, ManualFrames};
pub use scheduler::{PhaseScheduler, RunHandle, Show, StepOutcome};
