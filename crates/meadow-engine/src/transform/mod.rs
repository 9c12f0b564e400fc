//! Hierarchical transform composition.
//!
//! Every shape is positioned through a `Transform` built by composing translate / scale /
//! rotate operations in the *local* frame of the transform they are applied to
//! (right-multiplication, parent → child). `TransformStack` bounds the scope of such local
//! adjustments with push/pop so sibling shapes never observe each other's state.
//!
//! Typical leaf draw:
//!
//! ```ignore
//! stack.reset_current();
//! stack.push_current();
//! stack.translate(Vec3::new(-0.68, 0.84, 0.0));
//! stack.scale(Vec3::new(0.09, 0.09, 1.0));
//! renderer.draw_primitive(PrimitiveKind::Circle, color, stack.current());
//! stack.pop()?;
//! ```

mod error;
mod matrix;
mod stack;

pub use error::TransformError;
pub use matrix::Transform;
pub use stack::TransformStack;

pub use glam::Vec3;
