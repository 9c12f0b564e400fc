//! Meadow engine.
//!
//! A 2D renderer built around a transform stack: scenes compose local transforms, draw a
//! fixed set of primitives through a `Renderer`, and a frame driver keeps exactly one frame
//! scheduled. The platform side (winit window, wgpu surface, keyboard input) lives in
//! `window`, `device` and `input`.

pub mod core;
pub mod device;
pub mod driver;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
pub mod transform;
pub mod window;
