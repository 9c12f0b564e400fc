//! Frame driver.
//!
//! Owns everything that used to be per-process animation state: the transform stack, the
//! display mode, and the token of the pending frame. Scene content plugs in via `Scene`.

mod frame_driver;

pub use frame_driver::{FrameDriver, Scene};
