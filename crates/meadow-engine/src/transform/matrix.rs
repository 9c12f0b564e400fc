use glam::{Mat4, Vec3};

/// Local-to-world affine transform (4×4, column-major).
///
/// Values are immutable: every composition returns a new `Transform`, so a transform handed
/// to a renderer or saved on a stack can never be altered retroactively.
///
/// Composition convention: operations apply *inside* the existing transform
/// (`self * op`), i.e. in the local frame it establishes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(Mat4);

impl Transform {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub const fn to_mat4(self) -> Mat4 {
        self.0
    }

    /// Composes a translation by `offset` in the local frame.
    ///
    /// `offset.z` is applied as given; 2D callers pass 0.
    #[inline]
    #[must_use]
    pub fn translate(self, offset: Vec3) -> Self {
        Self(self.0 * Mat4::from_translation(offset))
    }

    /// Composes a per-axis scale in the local frame.
    ///
    /// Zero factors are legal and collapse the corresponding axis.
    #[inline]
    #[must_use]
    pub fn scale(self, factors: Vec3) -> Self {
        Self(self.0 * Mat4::from_scale(factors))
    }

    /// Composes a rotation of `angle` radians about `axis` in the local frame.
    ///
    /// The angle is used as-is (no wrapping to `[0, 2π)`); the axis is normalized.
    /// A zero-length axis has no defined rotation and leaves the transform unchanged.
    #[inline]
    #[must_use]
    pub fn rotate(self, angle: f32, axis: Vec3) -> Self {
        match axis.try_normalize() {
            Some(axis) => Self(self.0 * Mat4::from_axis_angle(axis, angle)),
            None => self,
        }
    }

    /// Shorthand for a rotation about +Z, the only axis a 2D scene uses.
    #[inline]
    #[must_use]
    pub fn rotate_z(self, angle: f32) -> Self {
        self.rotate(angle, Vec3::Z)
    }

    /// Composes an arbitrary child transform in the local frame.
    #[inline]
    #[must_use]
    pub fn then(self, child: Transform) -> Self {
        Self(self.0 * child.0)
    }

    /// Maps a local point to world space.
    #[inline]
    pub fn transform_point(self, p: Vec3) -> Vec3 {
        self.0.transform_point3(p)
    }

    /// Column-major array, ready for GPU upload.
    #[inline]
    pub fn to_cols_array(self) -> [f32; 16] {
        self.0.to_cols_array()
    }

    #[inline]
    pub fn to_cols_array_2d(self) -> [[f32; 4]; 4] {
        self.0.to_cols_array_2d()
    }

    #[inline]
    pub fn abs_diff_eq(self, other: Transform, max_abs_diff: f32) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Transform {
    #[inline]
    fn from(m: Mat4) -> Self {
        Self(m)
    }
}

impl From<Transform> for Mat4 {
    #[inline]
    fn from(t: Transform) -> Self {
        t.0
    }
}
