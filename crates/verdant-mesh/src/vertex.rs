//! GPU-ready surface vertex.

/// One corner of a flat-shaded surface triangle.
///
/// Layout (36 bytes): position, normal and linear RGB color, each `[f32; 3]`.
/// Positions are chunk-local; add the chunk origin for world space.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 36]);

impl TerrainVertex {
    pub fn new(position: glam::Vec3, normal: glam::Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}
