use crate::error::Result;
use crate::math::{Matrix4, Vector3};
use bytemuck::{Pod, Zeroable};

/// Per-draw block: model matrix and the matrix that carries its normals.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelUniforms {
    pub model: Matrix4,
    pub normal: Matrix4,
}

impl ModelUniforms {
    pub fn from_model(model: &Matrix4) -> Result<Self> {
        let mut normal = model.inverse()?;
        normal.transpose();
        Ok(Self {
            model: *model,
            normal,
        })
    }
}

/// Per-frame block shared by every draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_projection: Matrix4,
    pub light_matrix: Matrix4,
    /// Eye position, `w = 1`.
    pub view_position: [f32; 4],
}

impl FrameUniforms {
    pub fn new(view_projection: Matrix4, light_matrix: Matrix4, eye: Vector3) -> Self {
        Self {
            view_projection,
            light_matrix,
            view_position: [eye.x, eye.y, eye.z, 1.0],
        }
    }
}

pub fn align_to(size: usize, alignment: usize) -> usize {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Packs `blocks` for a dynamic-offset uniform buffer: block `i` starts at
/// `i * align_to(size_of::<T>(), alignment)`.
pub fn pack_aligned<T: Pod>(blocks: &[T], alignment: usize) -> Vec<u8> {
    let stride = align_to(std::mem::size_of::<T>(), alignment);
    let mut data = vec![0u8; stride * blocks.len()];
    for (i, block) in blocks.iter().enumerate() {
        let bytes = bytemuck::bytes_of(block);
        let offset = i * stride;
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
    data
}
