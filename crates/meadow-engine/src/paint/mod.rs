//! Paint model shared between scene code and renderers.
//!
//! Only flat colors exist: every primitive is filled (or outlined) with one color.

pub mod color;

pub use color::Color;
