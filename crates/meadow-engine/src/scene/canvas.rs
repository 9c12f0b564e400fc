use crate::paint::Color;
use crate::transform::{Transform, TransformError, TransformStack, Vec3};

use super::{PrimitiveKind, Renderer};

/// Drawing context threaded through one scene traversal.
///
/// Pairs the frame's [`TransformStack`] with the [`Renderer`] receiving primitives, so scene
/// code never touches global state. Composition methods return `&mut Self` for chaining:
///
/// ```ignore
/// canvas.reset();
/// canvas.branch(|c| {
///     c.translate(vec3(0.0, 0.6, 0.0)).scale(vec3(3.0, 1.2, 1.0));
///     c.draw(PrimitiveKind::Square, sky);
///     Ok(())
/// })?;
/// ```
pub struct Canvas<'a> {
    stack: &'a mut TransformStack,
    renderer: &'a mut dyn Renderer,
    draws: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(stack: &'a mut TransformStack, renderer: &'a mut dyn Renderer) -> Self {
        Self { stack, renderer, draws: 0 }
    }

    /// Resets the current transform to identity (start of a new top-level object).
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.stack.reset_current();
        self
    }

    #[inline]
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.stack.translate(offset);
        self
    }

    #[inline]
    pub fn scale(&mut self, factors: Vec3) -> &mut Self {
        self.stack.scale(factors);
        self
    }

    /// Rotates about +Z by `angle` radians, used as given.
    #[inline]
    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        self.stack.rotate(angle, Vec3::Z);
        self
    }

    /// Draws `kind` with a copy of the current transform.
    #[inline]
    pub fn draw(&mut self, kind: PrimitiveKind, color: Color) -> &mut Self {
        self.renderer.draw_primitive(kind, color, self.stack.current());
        self.draws += 1;
        self
    }

    /// Saves the current transform.
    #[inline]
    pub fn push(&mut self) {
        self.stack.push_current();
    }

    /// Restores the most recently saved transform.
    #[inline]
    pub fn pop(&mut self) -> Result<Transform, TransformError> {
        self.stack.pop()
    }

    /// Runs `f` inside a push/pop pair.
    ///
    /// The pop happens on every path, including when `f` fails; the first error wins.
    pub fn branch<F>(&mut self, f: F) -> Result<(), TransformError>
    where
        F: FnOnce(&mut Self) -> Result<(), TransformError>,
    {
        self.stack.push_current();
        let result = f(self);
        let popped = self.stack.pop();
        result?;
        popped.map(|_| ())
    }

    #[inline]
    pub fn current(&self) -> Transform {
        self.stack.current()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Primitives drawn through this canvas so far.
    #[inline]
    pub fn draw_count(&self) -> usize {
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawList;

    const EPS: f32 = 1e-6;

    fn vec2(x: f32, y: f32) -> Vec3 {
        Vec3::new(x, y, 0.0)
    }

    #[test]
    fn draw_records_current_transform() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut stack, &mut list);
            c.push();
            c.translate(vec2(1.0, 0.0)).scale(Vec3::new(2.0, 1.0, 1.0));
            c.draw(PrimitiveKind::Square, Color::black());
            c.pop().unwrap();
        }

        let t = list.items()[0].transform;
        assert!(t.transform_point(Vec3::ZERO).abs_diff_eq(vec2(1.0, 0.0), EPS));
        assert!(t.transform_point(Vec3::X).abs_diff_eq(vec2(3.0, 0.0), EPS));
        assert!(stack.is_balanced());
    }

    #[test]
    fn sibling_branches_are_independent() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        let a = vec2(-0.5, 0.2);
        let b = vec2(0.7, -0.1);
        {
            let mut c = Canvas::new(&mut stack, &mut list);
            c.reset();
            c.branch(|c| {
                c.translate(a).rotate(1.0).draw(PrimitiveKind::Triangle, Color::white());
                Ok(())
            })
            .unwrap();
            c.branch(|c| {
                c.translate(b).draw(PrimitiveKind::Circle, Color::white());
                Ok(())
            })
            .unwrap();
            assert_eq!(c.draw_count(), 2);
        }

        let leaf2 = list.items()[1].transform;
        assert!(leaf2.abs_diff_eq(Transform::identity().translate(b), EPS));
    }

    #[test]
    fn nested_branches_inherit_parent_frame() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        {
            let mut c = Canvas::new(&mut stack, &mut list);
            c.translate(vec2(0.5, 0.0));
            c.branch(|c| {
                c.scale(Vec3::new(2.0, 2.0, 1.0));
                c.branch(|c| {
                    c.translate(vec2(0.25, 0.0)).draw(PrimitiveKind::Square, Color::black());
                    Ok(())
                })
            })
            .unwrap();
        }

        let p = list.items()[0].transform.transform_point(Vec3::ZERO);
        assert!(p.abs_diff_eq(vec2(1.0, 0.0), EPS));
    }

    #[test]
    fn branch_pops_when_closure_fails() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        let result = {
            let mut c = Canvas::new(&mut stack, &mut list);
            c.branch(|c| {
                c.translate(vec2(9.0, 9.0));
                Err(TransformError::Underflow)
            })
        };

        assert_eq!(result, Err(TransformError::Underflow));
        assert!(stack.is_balanced());
        assert_eq!(stack.current(), Transform::IDENTITY);
    }

    #[test]
    fn pop_without_push_fails() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        let mut c = Canvas::new(&mut stack, &mut list);
        assert_eq!(c.pop(), Err(TransformError::Underflow));
    }
}
