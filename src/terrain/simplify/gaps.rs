// ============================================
// Gap Corrector - Устранение T-соединений
// ============================================
//
// Вершины мелких регионов, лежащие на ребре крупного квада, сдвигаются
// по высоте (и нормали) на прямую между углами этого ребра.
// Обход от крупных квадов к мелким: мелкие исправления видят
// уже стабилизированные крупные границы. Связность не меняется.

use ultraviolet::Vec3;

use crate::terrain::error::TerrainError;
use crate::terrain::quad::{Corner, QuadGrid};

const MIN_SEARCH_SIZE: usize = 4;

/// Ось ребра: по ней считается вес интерполяции
#[derive(Clone, Copy)]
enum Axis {
    X,
    Z,
}

impl Axis {
    #[inline]
    fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }
}

/// Четыре угла квада в сжатом меше
#[derive(Clone, Copy)]
struct QuadCorners {
    top_left: u32,
    top_right: u32,
    bottom_left: u32,
    bottom_right: u32,
}

pub struct GapCorrector<'a> {
    grid: &'a QuadGrid,
    vertices: &'a mut [Vec3],
    normals: &'a mut [Vec3],
    /// Сколько вершин переинтерполировано
    corrected: usize,
}

impl<'a> GapCorrector<'a> {
    pub fn new(grid: &'a QuadGrid, vertices: &'a mut [Vec3], normals: &'a mut [Vec3]) -> Self {
        Self { grid, vertices, normals, corrected: 0 }
    }

    /// Полный проход от размера сетки вниз. Возвращает число исправленных вершин.
    pub fn run(mut self) -> Result<usize, TerrainError> {
        let resolution = self.grid.resolution();
        self.correct(resolution)?;
        Ok(self.corrected)
    }

    fn correct(&mut self, size: usize) -> Result<(), TerrainError> {
        if size < MIN_SEARCH_SIZE {
            return Ok(());
        }

        let resolution = self.grid.resolution();
        let half = size >> 1;

        for section_z in (0..resolution).step_by(half) {
            for section_x in (0..resolution).step_by(half) {
                if !self.grid.is_single_region(section_x, section_z, half) {
                    continue;
                }

                let Some(corners) = self.quad_corners(section_x, section_z, half) else {
                    log::warn!(
                        "Region of size {} at cell ({}, {}) has unindexed corners, skipping",
                        half, section_x, section_z
                    );
                    continue;
                };

                self.correct_quad(section_x, section_z, half, corners)?;
            }
        }

        self.correct(half)
    }

    fn quad_corners(&self, x: usize, z: usize, size: usize) -> Option<QuadCorners> {
        let last = size - 1;
        Some(QuadCorners {
            top_left: self.grid.get(x, z + last).compacted_index(Corner::TopLeft)?,
            top_right: self.grid.get(x + last, z + last).compacted_index(Corner::TopRight)?,
            bottom_left: self.grid.get(x, z).compacted_index(Corner::BottomLeft)?,
            bottom_right: self.grid.get(x + last, z).compacted_index(Corner::BottomRight)?,
        })
    }

    /// Проверить ячейки снаружи всех четырёх рёбер квада.
    /// Последняя ячейка каждого ряда пропускается: её вершина - угол самого квада.
    fn correct_quad(&mut self, x: usize, z: usize, size: usize, corners: QuadCorners) -> Result<(), TerrainError> {
        let resolution = self.grid.resolution();
        let quad = (x, z, size);

        // Нижнее ребро: углы TopRight ячеек снизу
        if z > 0 {
            for cell_x in x..x + size - 1 {
                let target = (cell_x, z - 1, Corner::TopRight);
                self.correct_vertex(quad, target, corners.bottom_left, corners.bottom_right, Axis::X)?;
            }
        }

        // Верхнее ребро: углы BottomRight ячеек сверху
        if z + size < resolution {
            for cell_x in x..x + size - 1 {
                let target = (cell_x, z + size, Corner::BottomRight);
                self.correct_vertex(quad, target, corners.top_left, corners.top_right, Axis::X)?;
            }
        }

        // Левое ребро: углы TopRight ячеек слева
        if x > 0 {
            for cell_z in z..z + size - 1 {
                let target = (x - 1, cell_z, Corner::TopRight);
                self.correct_vertex(quad, target, corners.bottom_left, corners.top_left, Axis::Z)?;
            }
        }

        // Правое ребро: углы TopLeft ячеек справа
        if x + size < resolution {
            for cell_z in z..z + size - 1 {
                let target = (x + size, cell_z, Corner::TopLeft);
                self.correct_vertex(quad, target, corners.bottom_right, corners.top_right, Axis::Z)?;
            }
        }

        Ok(())
    }

    /// Переинтерполировать угол ячейки target между вершинами start и end
    fn correct_vertex(
        &mut self,
        (quad_x, quad_z, size): (usize, usize, usize),
        (cell_x, cell_z, corner): (usize, usize, Corner),
        start: u32,
        end: u32,
        axis: Axis,
    ) -> Result<(), TerrainError> {
        let cell = self.grid.get(cell_x, cell_z);
        if !cell.is_corner_vertex(corner) {
            return Ok(());
        }
        let Some(index) = cell.compacted_index(corner) else {
            return Ok(());
        };

        let (index, start, end) = (index as usize, start as usize, end as usize);
        let start_pos = self.vertices[start];
        let end_pos = self.vertices[end];

        let length = axis.component(end_pos) - axis.component(start_pos);
        if length.abs() <= f32::EPSILON {
            return Err(TerrainError::DegenerateEdge { x: quad_x, z: quad_z, size });
        }

        let weight = (axis.component(self.vertices[index]) - axis.component(start_pos)) / length;

        self.vertices[index].y = start_pos.y + (end_pos.y - start_pos.y) * weight;
        self.normals[index] = self.normals[start] + (self.normals[end] - self.normals[start]) * weight;
        self.corrected += 1;

        Ok(())
    }
}

/// Исправить щели в сжатом меше
pub fn correct_gaps(grid: &QuadGrid, vertices: &mut [Vec3], normals: &mut [Vec3]) -> Result<usize, TerrainError> {
    GapCorrector::new(grid, vertices, normals).run()
}
