use glam::Vec3;

use super::{Transform, TransformError};

/// Current transform plus a LIFO of saved transforms.
///
/// The current slot is the accumulator that `translate` / `scale` / `rotate` right-multiply
/// into. `push` stores a copy on the stack, `pop` restores the most recent copy as current.
///
/// Calls must be balanced per frame; [`TransformStack::finish_frame`] reports a leftover
/// depth as [`TransformError::Unbalanced`].
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl TransformStack {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stack with room for `depth` saved transforms.
    #[inline]
    pub fn with_capacity(depth: usize) -> Self {
        Self {
            current: Transform::IDENTITY,
            saved: Vec::with_capacity(depth),
        }
    }

    /// Drops all saved transforms and resets current to identity. Keeps capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.saved.clear();
        self.current = Transform::IDENTITY;
    }

    /// Resets the current transform to identity, leaving saved transforms untouched.
    ///
    /// Used to start a new independent top-level branch.
    #[inline]
    pub fn reset_current(&mut self) {
        self.current = Transform::IDENTITY;
    }

    #[inline]
    pub fn current(&self) -> Transform {
        self.current
    }

    #[inline]
    pub fn set_current(&mut self, t: Transform) {
        self.current = t;
    }

    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.current = self.current.translate(offset);
    }

    #[inline]
    pub fn scale(&mut self, factors: Vec3) {
        self.current = self.current.scale(factors);
    }

    #[inline]
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.current = self.current.rotate(angle, axis);
    }

    /// Saves a copy of `t`.
    #[inline]
    pub fn push(&mut self, t: Transform) {
        self.saved.push(t);
    }

    /// Saves a copy of the current transform.
    #[inline]
    pub fn push_current(&mut self) {
        self.saved.push(self.current);
    }

    /// Removes the most recently saved transform, makes it current and returns it.
    ///
    /// On an empty stack the current transform is left as-is and
    /// [`TransformError::Underflow`] is returned.
    pub fn pop(&mut self) -> Result<Transform, TransformError> {
        match self.saved.pop() {
            Some(t) => {
                self.current = t;
                Ok(t)
            }
            None => {
                log::warn!("transform stack is empty; pop without matching push");
                Err(TransformError::Underflow)
            }
        }
    }

    /// Most recently saved transform, if any.
    #[inline]
    pub fn peek(&self) -> Option<Transform> {
        self.saved.last().copied()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.saved.is_empty()
    }

    /// Checks the end-of-frame invariant (no live pushes).
    pub fn finish_frame(&self) -> Result<(), TransformError> {
        if self.is_balanced() {
            Ok(())
        } else {
            Err(TransformError::Unbalanced { depth: self.depth() })
        }
    }
}
