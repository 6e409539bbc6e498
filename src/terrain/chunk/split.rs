// ============================================
// Chunk Split - Нарезка меша по чанкам
// ============================================

use std::collections::HashMap;

use ultraviolet::{Vec2, Vec3};

use crate::terrain::mesh::ChunkVertex;

/// Самодостаточный меш одного чанка (позиции относительно центра чанка)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    pub chunk_x: usize,
    pub chunk_z: usize,
    /// Центр чанка в мировых координатах
    pub center: Vec3,
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Чередующийся буфер для загрузки на GPU
    pub fn interleaved(&self) -> Vec<ChunkVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| ChunkVertex::new([p.x, p.y, p.z], [n.x, n.y, n.z], [uv.x, uv.y]))
            .collect()
    }
}

/// Исходные буферы сжатого меша
pub struct MeshBuffers<'a> {
    pub vertices: &'a [Vec3],
    pub uvs: &'a [Vec2],
    pub normals: &'a [Vec3],
    pub indices: &'a [u32],
}

/// Собрать чанк из квадов по их смещениям в буфере индексов.
/// Квад: [TL, BL, BR, TL, BR, TR].
pub fn split_quads(
    buffers: &MeshBuffers<'_>,
    quad_offsets: &[usize],
    chunk_x: usize,
    chunk_z: usize,
    center: Vec3,
) -> ChunkMesh {
    let mut chunk = ChunkMesh {
        chunk_x,
        chunk_z,
        center,
        vertices: Vec::with_capacity(quad_offsets.len() * 2),
        uvs: Vec::with_capacity(quad_offsets.len() * 2),
        normals: Vec::with_capacity(quad_offsets.len() * 2),
        indices: Vec::with_capacity(quad_offsets.len() * 6),
    };

    // Глобальный индекс -> локальный
    let mut local_by_global: HashMap<u32, u32> = HashMap::new();

    for &offset in quad_offsets {
        let quad = &buffers.indices[offset..offset + 6];
        // TL, BL, BR, TR
        let corners = [quad[0], quad[1], quad[2], quad[5]];
        let mut local = [0u32; 4];

        for (slot, &global) in local.iter_mut().zip(&corners) {
            *slot = *local_by_global.entry(global).or_insert_with(|| {
                let g = global as usize;
                chunk.vertices.push(buffers.vertices[g] - center);
                chunk.uvs.push(buffers.uvs[g]);
                chunk.normals.push(buffers.normals[g]);
                (chunk.vertices.len() - 1) as u32
            });
        }

        let [top_left, bottom_left, bottom_right, top_right] = local;
        chunk.indices.extend_from_slice(&[
            top_left, bottom_left, bottom_right,
            top_left, bottom_right, top_right,
        ]);
    }

    chunk
}
