use crate::paint::Color;
use crate::transform::Transform;

use super::PrimitiveKind;

/// Sink for primitive draws.
///
/// The transform is passed by value; implementations must not assume it outlives the call
/// in any other form than their own copy. Display mode is not part of this contract: it
/// only changes how a recorded primitive is rasterized, never its transform.
pub trait Renderer {
    fn draw_primitive(&mut self, kind: PrimitiveKind, color: Color, transform: Transform);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    #[inline]
    fn draw_primitive(&mut self, kind: PrimitiveKind, color: Color, transform: Transform) {
        (**self).draw_primitive(kind, color, transform);
    }
}
