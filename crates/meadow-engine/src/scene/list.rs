use crate::paint::Color;
use crate::transform::Transform;

use super::{DrawCmd, PrimitiveKind, Renderer};

/// Recorded draw stream for a frame.
///
/// Commands are kept in call order, which is also paint order (back-to-front): the
/// landscape relies on later primitives covering earlier ones.
///
/// Performance characteristics:
/// - `draw_primitive()` is O(1)
/// - `clear()` keeps capacity, so steady-state frames do not allocate
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Number of recorded commands of `kind`.
    pub fn count_of(&self, kind: PrimitiveKind) -> usize {
        self.items.iter().filter(|c| c.kind == kind).count()
    }
}

impl Renderer for DrawList {
    #[inline]
    fn draw_primitive(&mut self, kind: PrimitiveKind, color: Color, transform: Transform) {
        self.push(DrawCmd::new(kind, color, transform));
    }
}
