//! Contract between the platform runtime and applications.
//!
//! Applications implement [`App`]; the runtime hands them a [`FrameCtx`] for every redraw.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
