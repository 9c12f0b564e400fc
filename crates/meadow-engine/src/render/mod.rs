//! GPU rendering subsystem.
//!
//! Consumes a recorded `scene::DrawList` and issues wgpu draws.
//!
//! Convention:
//! - mesh vertices live in each primitive's local frame (unit extent, origin-centered)
//! - the per-draw `Transform` maps them straight to clip space (+Y up, [-1, 1])
//! - `DisplayMode` only selects topology via `topology()`; transforms are untouched
//! - points are drawn as `POINT_SIZE` pixel quads sized against the viewport uniform

mod ctx;
mod mesh;
mod primitives;
mod topology;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{
    line_loop, Mesh, MeshVertex, PointSprites, SpriteVertex, BLADE_SPOKES, CIRCLE_SEGMENTS,
    POINT_SIZE, RAY_COUNT,
};
pub use primitives::PrimitiveRenderer;
pub use topology::{topology, Topology};
