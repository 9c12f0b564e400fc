use crate::scene::{DisplayMode, PrimitiveKind};

/// Rasterization topology a primitive is drawn with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
    Points,
}

impl Topology {
    pub const ALL: [Topology; 3] = [Topology::Triangles, Topology::Lines, Topology::Points];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Topology::Triangles => 0,
            Topology::Lines => 1,
            Topology::Points => 2,
        }
    }

    #[inline]
    pub const fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Topology::Lines => wgpu::PrimitiveTopology::LineList,
            // Point sprites are quads; WGSL cannot size a point.
            Topology::Points => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

use Topology::{Lines as L, Points as P, Triangles as T};

// Rows follow `PrimitiveKind::index`, columns `DisplayMode::{Solid, Wireframe, Point}`.
// Rays have no area, so they stay lines in solid mode.
const TABLE: [[Topology; 3]; 5] = [
    [T, L, P], // Square
    [T, L, P], // Triangle
    [T, L, P], // Circle
    [L, L, P], // RayFan
    [T, L, P], // BladeFan
];

/// Topology used to draw `kind` under `mode`.
#[inline]
pub const fn topology(kind: PrimitiveKind, mode: DisplayMode) -> Topology {
    let col = match mode {
        DisplayMode::Solid => 0,
        DisplayMode::Wireframe => 1,
        DisplayMode::Point => 2,
    };
    TABLE[kind.index()][col]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fills_everything_but_rays() {
        for kind in PrimitiveKind::ALL {
            let expected = if kind == PrimitiveKind::RayFan { Topology::Lines } else { Topology::Triangles };
            assert_eq!(topology(kind, DisplayMode::Solid), expected, "{kind:?}");
        }
    }

    #[test]
    fn wireframe_is_always_lines() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(topology(kind, DisplayMode::Wireframe), Topology::Lines, "{kind:?}");
        }
    }

    #[test]
    fn point_mode_is_always_points() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(topology(kind, DisplayMode::Point), Topology::Points, "{kind:?}");
        }
    }

    #[test]
    fn points_rasterize_as_sprite_triangles() {
        assert_eq!(Topology::Points.to_wgpu(), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(Topology::Lines.to_wgpu(), wgpu::PrimitiveTopology::LineList);
    }

    #[test]
    fn topology_indices_are_dense() {
        for (i, t) in Topology::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }
}
