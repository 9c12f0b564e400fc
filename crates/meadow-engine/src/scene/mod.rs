//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - name the fixed primitive set and the display modes
//! - define the `Renderer` capability scene code draws through
//! - record renderer-agnostic draw commands (`DrawList`)
//! - thread the transform stack through scene traversal (`Canvas`)

mod canvas;
mod cmd;
mod list;
mod primitive;
mod renderer;

pub use canvas::Canvas;
pub use cmd::DrawCmd;
pub use list::DrawList;
pub use primitive::{DisplayMode, ParseDisplayModeError, PrimitiveKind};
pub use renderer::Renderer;
