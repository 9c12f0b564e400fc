//! CPU geometry for the fixed primitive set.
//!
//! All meshes live in a local frame centered on the origin with unit extent; scene code
//! positions them exclusively through transforms.

use std::borrow::Cow;
use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

use crate::scene::PrimitiveKind;

use super::Topology;

/// Perimeter vertices of the circle.
pub const CIRCLE_SEGMENTS: u16 = 50;
/// Rays of the sun fan.
pub const RAY_COUNT: u16 = 8;
/// Spokes the blade fan is cut from; every fourth spoke starts a blade.
pub const BLADE_SPOKES: u16 = 16;
/// Edge length of a point sprite in physical pixels.
pub const POINT_SIZE: f32 = 6.0;

/// Sprite corners in units of half the point size, counter-clockwise.
const SPRITE_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const SPRITE_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { pos: [x, y] }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// One corner of a point sprite: the point's local position plus the corner offset the
/// vertex shader scales to pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub pos: [f32; 2],
    pub corner: [f32; 2],
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 6 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Point-mode geometry: one screen-aligned quad per drawn point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSprites {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u16>,
}

/// Vertices plus the index list a primitive is natively drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
    /// Topology `indices` describe: triangle triples or line pairs.
    pub native: Topology,
}

impl Mesh {
    pub fn for_kind(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Square => Self::square(),
            PrimitiveKind::Triangle => Self::triangle(),
            PrimitiveKind::Circle => Self::circle(CIRCLE_SEGMENTS),
            PrimitiveKind::RayFan => Self::ray_fan(RAY_COUNT),
            PrimitiveKind::BladeFan => Self::blade_fan(),
        }
    }

    pub fn square() -> Self {
        Self {
            vertices: vec![
                MeshVertex::new(0.5, 0.5),
                MeshVertex::new(-0.5, 0.5),
                MeshVertex::new(-0.5, -0.5),
                MeshVertex::new(0.5, -0.5),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            native: Topology::Triangles,
        }
    }

    pub fn triangle() -> Self {
        Self {
            vertices: vec![
                MeshVertex::new(0.0, 0.5),
                MeshVertex::new(-0.5, -0.5),
                MeshVertex::new(0.5, -0.5),
            ],
            indices: vec![0, 1, 2],
            native: Topology::Triangles,
        }
    }

    /// Center vertex followed by `segments` points on the unit circle.
    pub fn circle(segments: u16) -> Self {
        let vertices = fan_vertices(segments);

        // Closing triangle first, then one wedge per segment.
        let mut indices = vec![0, 1, segments];
        for i in 0..segments {
            indices.extend_from_slice(&[0, i, i + 1]);
        }

        Self { vertices, indices, native: Topology::Triangles }
    }

    /// Line segments from the center to `rays` evenly spaced points on the unit circle.
    pub fn ray_fan(rays: u16) -> Self {
        let vertices = fan_vertices(rays);
        let indices = (1..=rays).flat_map(|i| [0, i]).collect();
        Self { vertices, indices, native: Topology::Lines }
    }

    /// Four thin wedges, one starting at every fourth spoke.
    pub fn blade_fan() -> Self {
        let vertices = fan_vertices(BLADE_SPOKES);
        let indices = (1..BLADE_SPOKES).step_by(4).flat_map(|i| [0, i, i + 1]).collect();
        Self { vertices, indices, native: Topology::Triangles }
    }

    /// Index list for drawing this mesh with `topology`.
    ///
    /// Outlines of filled meshes are the closed loop through the native index list.
    pub fn indices_for(&self, topology: Topology) -> Cow<'_, [u16]> {
        match (topology, self.native) {
            (Topology::Lines, Topology::Triangles) => Cow::Owned(line_loop(&self.indices)),
            _ => Cow::Borrowed(&self.indices),
        }
    }

    /// Expands every point of `indices_for(Topology::Points)` into a two-triangle quad.
    ///
    /// All four corners carry the point's position; the shader pushes them apart by
    /// [`POINT_SIZE`] pixels.
    pub fn point_sprites(&self) -> PointSprites {
        let points = self.indices_for(Topology::Points);
        let mut vertices = Vec::with_capacity(points.len() * 4);
        let mut indices = Vec::with_capacity(points.len() * 6);

        for &i in points.iter() {
            let base = vertices.len() as u16;
            let pos = self.vertices[i as usize].pos;
            vertices.extend(SPRITE_CORNERS.iter().map(|&corner| SpriteVertex { pos, corner }));
            indices.extend(SPRITE_INDICES.iter().map(|&k| base + k));
        }

        PointSprites { vertices, indices }
    }
}

/// Center vertex plus `n` points on the unit circle, starting at angle 0.
fn fan_vertices(n: u16) -> Vec<MeshVertex> {
    let step = TAU / n as f32;
    std::iter::once(MeshVertex::new(0.0, 0.0))
        .chain((0..n).map(|i| {
            let angle = step * i as f32;
            MeshVertex::new(angle.cos(), angle.sin())
        }))
        .collect()
}

/// Expands `indices` into line-list pairs connecting consecutive entries, closing the loop.
pub fn line_loop(indices: &[u16]) -> Vec<u16> {
    match indices {
        [] | [_] => Vec::new(),
        _ => {
            let mut out = Vec::with_capacity(indices.len() * 2);
            for pair in indices.windows(2) {
                out.extend_from_slice(pair);
            }
            out.push(indices[indices.len() - 1]);
            out.push(indices[0]);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_index(mesh: &Mesh, topology: Topology) -> u16 {
        mesh.indices_for(topology).iter().copied().max().unwrap_or(0)
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn square_is_two_triangles() {
        let m = Mesh::square();
        assert_eq!(m.vertices.len(), 4);
        assert_eq!(m.indices, [0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn circle_has_center_and_perimeter() {
        let m = Mesh::circle(CIRCLE_SEGMENTS);
        assert_eq!(m.vertices.len(), 51);
        assert_eq!(m.vertices[0], MeshVertex::new(0.0, 0.0));
        assert_eq!(&m.indices[..3], &[0, 1, 50]);
        assert_eq!(m.indices.len(), 3 + 50 * 3);
        for v in &m.vertices[1..] {
            let r = (v.pos[0] * v.pos[0] + v.pos[1] * v.pos[1]).sqrt();
            assert!((r - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn ray_fan_pairs_center_with_each_tip() {
        let m = Mesh::ray_fan(RAY_COUNT);
        assert_eq!(m.vertices.len(), 9);
        assert_eq!(m.indices, [0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 0, 7, 0, 8]);
        assert_eq!(m.native, Topology::Lines);
    }

    #[test]
    fn blade_fan_has_four_blades() {
        let m = Mesh::blade_fan();
        assert_eq!(m.vertices.len(), 17);
        assert_eq!(m.indices, [0, 1, 2, 0, 5, 6, 0, 9, 10, 0, 13, 14]);
    }

    #[test]
    fn every_index_is_in_bounds() {
        for kind in PrimitiveKind::ALL {
            let m = Mesh::for_kind(kind);
            for topology in Topology::ALL {
                assert!(
                    (max_index(&m, topology) as usize) < m.vertices.len(),
                    "{kind:?} / {topology:?}"
                );
            }
        }
    }

    // ── topology index lists ──────────────────────────────────────────────

    #[test]
    fn line_loop_closes_the_path() {
        assert_eq!(line_loop(&[0, 1, 2]), [0, 1, 1, 2, 2, 0]);
        assert!(line_loop(&[7]).is_empty());
        assert!(line_loop(&[]).is_empty());
    }

    #[test]
    fn filled_meshes_outline_as_line_loop() {
        let m = Mesh::triangle();
        assert_eq!(m.indices_for(Topology::Lines).as_ref(), &[0, 1, 1, 2, 2, 0]);
        assert_eq!(m.indices_for(Topology::Triangles).as_ref(), &[0, 1, 2]);
    }

    #[test]
    fn rays_keep_their_segments_as_lines() {
        let m = Mesh::ray_fan(RAY_COUNT);
        assert_eq!(m.indices_for(Topology::Lines).as_ref(), m.indices.as_slice());
    }

    #[test]
    fn point_lists_reuse_native_indices() {
        let m = Mesh::square();
        assert_eq!(m.indices_for(Topology::Points).as_ref(), m.indices.as_slice());
    }

    #[test]
    fn point_sprites_expand_each_point_into_a_quad() {
        let m = Mesh::triangle();
        let sprites = m.point_sprites();

        assert_eq!(sprites.vertices.len(), 3 * 4);
        assert_eq!(&sprites.indices[..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(&sprites.indices[6..12], &[4, 5, 6, 4, 6, 7]);

        let second = &sprites.vertices[4..8];
        assert!(second.iter().all(|v| v.pos == m.vertices[1].pos));
        assert_eq!(second[0].corner, [-1.0, -1.0]);
        assert_eq!(second[2].corner, [1.0, 1.0]);
    }

    #[test]
    fn point_sprites_follow_native_indices() {
        for kind in PrimitiveKind::ALL {
            let m = Mesh::for_kind(kind);
            let sprites = m.point_sprites();
            assert_eq!(sprites.indices.len(), m.indices.len() * 6, "{kind:?}");
            assert!(
                sprites.indices.iter().all(|&i| (i as usize) < sprites.vertices.len()),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn line_lists_have_even_length() {
        for kind in PrimitiveKind::ALL {
            let m = Mesh::for_kind(kind);
            assert_eq!(m.indices_for(Topology::Lines).len() % 2, 0, "{kind:?}");
        }
    }
}
