//! Time subsystem.
//!
//! Provides stable, testable frame timing and frame scheduling without coupling to the
//! runtime. Intended usage:
//! - one `FrameClock` and one `FrameScheduler` per window
//! - `FrameScheduler::request()` to ask for the next frame, keeping the returned
//!   `FrameHandle` as a cancellation token
//! - the runtime fires the pending request on redraw and ticks the clock

mod frame_clock;
mod scheduler;

pub use frame_clock::{FrameClock, FrameTime};
pub use scheduler::{FrameHandle, FrameScheduler};
