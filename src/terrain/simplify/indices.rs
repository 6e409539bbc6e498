// ============================================
// Index Builder - Треугольники из регионов
// ============================================
//
// Каждая ячейка с углом BottomLeft начинает квад. Кварды всегда
// квадратные, поэтому длину достаточно найти по одной оси.

use crate::terrain::chunk::ChunkLookup;
use crate::terrain::quad::{Corner, QuadGrid};

/// Буфер индексов и распределение квадов по чанкам
pub struct QuadIndices {
    pub indices: Vec<u32>,
    pub lookup: ChunkLookup,
    /// Пропущенные незамкнутые регионы
    pub skipped: usize,
}

/// Сжатые индексы четырёх углов квада с началом в (x, z)
fn quad_corners(grid: &QuadGrid, x: usize, z: usize) -> Option<[u32; 4]> {
    let resolution = grid.resolution();
    let length = grid.region_length(x, z)?;
    if z + length >= resolution {
        return None;
    }

    Some([
        grid.get(x, z + length).compacted_index(Corner::TopLeft)?,
        grid.get(x + length, z + length).compacted_index(Corner::TopRight)?,
        grid.get(x, z).compacted_index(Corner::BottomLeft)?,
        grid.get(x + length, z).compacted_index(Corner::BottomRight)?,
    ])
}

/// Построить индексы (по два треугольника на регион)
pub fn build_indices(grid: &QuadGrid, chunk_resolution: usize, chunk_count: usize) -> QuadIndices {
    let resolution = grid.resolution();
    let mut indices = Vec::new();
    let mut lookup = ChunkLookup::new(chunk_count);
    let mut skipped = 0;

    for z in 0..resolution {
        for x in 0..resolution {
            if !grid.is_corner_vertex(x, z, Corner::BottomLeft) {
                continue;
            }

            let Some([top_left, top_right, bottom_left, bottom_right]) = quad_corners(grid, x, z) else {
                log::warn!("Region starting at cell ({}, {}) is not sealed, skipping", x, z);
                skipped += 1;
                continue;
            };

            lookup.record(x / chunk_resolution, z / chunk_resolution, indices.len());

            indices.extend_from_slice(&[
                top_left, bottom_left, bottom_right,
                top_left, bottom_right, top_right,
            ]);
        }
    }

    QuadIndices { indices, lookup, skipped }
}
