use crate::paint::Color;
use crate::transform::Transform;

use super::PrimitiveKind;

/// One recorded primitive draw.
///
/// Extending the scene:
/// - add a variant to `PrimitiveKind`
/// - add its mesh under `render::mesh`
/// - add its row to the topology table in `render::topology`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCmd {
    pub kind: PrimitiveKind,
    pub color: Color,
    pub transform: Transform,
}

impl DrawCmd {
    #[inline]
    pub const fn new(kind: PrimitiveKind, color: Color, transform: Transform) -> Self {
        Self { kind, color, transform }
    }
}
