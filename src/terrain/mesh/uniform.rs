// ============================================
// Uniform Mesh - Полноразмерная сетка
// ============================================
//
// (R+1)^2 вершин row-major, по два CCW треугольника на ячейку,
// параллельно заполняется сетка квад-ячеек.

use ultraviolet::{Vec2, Vec3};

use crate::terrain::generation::{sample_height, Heightmap};
use crate::terrain::quad::{QuadCell, QuadGrid};

/// Равномерный (неупрощённый) меш
pub struct UniformMesh {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    resolution: usize,
}

impl UniformMesh {
    /// Построить сетку и квад-ячейки.
    ///
    /// `scale` - размер ячейки в мировых единицах, `amplitude` - вертикальный масштаб.
    pub fn build(
        heightmap: Option<&Heightmap>,
        resolution: usize,
        scale: Vec2,
        amplitude: f32,
    ) -> (Self, QuadGrid) {
        let vertex_resolution = resolution + 1;
        // Целочисленное деление: для степени двойки это R / 2, сетка центрирована
        let half = (vertex_resolution / 2) as f32;

        let mut vertices = Vec::with_capacity(vertex_resolution * vertex_resolution);
        let mut uvs = Vec::with_capacity(vertex_resolution * vertex_resolution);
        let mut indices = Vec::with_capacity(resolution * resolution * 6);
        let mut grid = QuadGrid::new(resolution);

        for z in 0..vertex_resolution {
            let position_z = (z as f32 - half) * scale.y;
            let v = z as f32 / vertex_resolution as f32;

            for x in 0..vertex_resolution {
                let position_x = (x as f32 - half) * scale.x;
                let uv = Vec2::new(x as f32 / vertex_resolution as f32, v);

                let height = sample_height(uv, heightmap) * amplitude;
                vertices.push(Vec3::new(position_x, height, position_z));
                uvs.push(uv);

                if x == 0 || z == 0 {
                    continue;
                }

                let top_left = (z * vertex_resolution + (x - 1)) as u32;
                let top_right = (z * vertex_resolution + x) as u32;
                let bottom_left = ((z - 1) * vertex_resolution + (x - 1)) as u32;
                let bottom_right = ((z - 1) * vertex_resolution + x) as u32;

                indices.extend_from_slice(&[
                    top_left, bottom_left, bottom_right,
                    top_left, bottom_right, top_right,
                ]);

                grid.set(x - 1, z - 1, QuadCell::new(top_left, top_right, bottom_left, bottom_right));
            }
        }

        (Self { vertices, uvs, indices, resolution }, grid)
    }

    #[inline]
    pub fn vertex_resolution(&self) -> usize {
        self.resolution + 1
    }

    /// Индекс вершины (x, z) в плоском массиве
    #[inline]
    pub fn vertex_index(&self, x: usize, z: usize) -> usize {
        z * self.vertex_resolution() + x
    }
}
