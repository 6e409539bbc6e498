// ============================================
// Vertex Compactor - Сжатие вершин по сетке ячеек
// ============================================
//
// Проход по (R+1)^2 позициям вершин в row-major порядке.
// Вершина попадает в сжатый меш, если хотя бы одна соседняя ячейка
// считает её своим реальным углом. Новый индекс записывается
// во все такие ячейки.

use ultraviolet::{Vec2, Vec3};

use crate::terrain::mesh::UniformMesh;
use crate::terrain::quad::{Corner, QuadGrid};

/// Ячейки вокруг вершины (x, z): смещение ячейки (-dx, -dz) и угол в ней
const NEIGHBOUR_CORNERS: [(usize, usize, Corner); 4] = [
    (0, 0, Corner::BottomLeft),
    (1, 0, Corner::BottomRight),
    (0, 1, Corner::TopLeft),
    (1, 1, Corner::TopRight),
];

/// Результат сжатия: только реальные вершины
pub struct CompactedVertices {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

/// Заполнить сжатые массивы и corner_index ячеек.
/// Вызывается строго после оптимизатора и до построения индексов.
pub fn compact_vertices(grid: &mut QuadGrid, uniform: &UniformMesh) -> CompactedVertices {
    let resolution = grid.resolution();
    let vertex_resolution = resolution + 1;

    let mut vertices = Vec::new();
    let mut uvs = Vec::new();

    for z in 0..vertex_resolution {
        for x in 0..vertex_resolution {
            let new_index = vertices.len() as u32;
            let mut source = None;

            for (dx, dz, corner) in NEIGHBOUR_CORNERS {
                if x < dx || z < dz {
                    continue;
                }
                let (cell_x, cell_z) = (x - dx, z - dz);
                if cell_x >= resolution || cell_z >= resolution {
                    continue;
                }

                let cell = grid.get_mut(cell_x, cell_z);
                if cell.is_corner_vertex(corner) {
                    cell.set_compacted_index(corner, new_index);
                    source = Some(cell.uniform_index(corner) as usize);
                }
            }

            if let Some(source) = source {
                vertices.push(uniform.vertices[source]);
                uvs.push(uniform.uvs[source]);
            }
        }
    }

    CompactedVertices { vertices, uvs }
}
