// ============================================
// Region Optimizer - Квадродерево слияния регионов
// ============================================
//
// Рекурсивно делим область на 4 квадранта. Если разброс нормалей
// квадранта меньше порога - квадрант становится одним квадом,
// иначе спускаемся глубже. Минимальный сливаемый блок - 2x2 ячейки.
// Регион никогда не пересекает границу чанка.

use ultraviolet::Vec3;

use crate::terrain::quad::{Edges, QuadGrid};

/// Минимальный размер области, которую ещё можно делить
const MIN_SEARCH_SIZE: usize = 4;

pub struct RegionOptimizer<'a> {
    /// Нормали равномерного меша, (R+1)^2
    normals: &'a [Vec3],
    vertex_resolution: usize,
    chunk_resolution: usize,
    threshold: f32,
}

impl<'a> RegionOptimizer<'a> {
    pub fn new(normals: &'a [Vec3], resolution: usize, chunk_resolution: usize, threshold: f32) -> Self {
        Self {
            normals,
            vertex_resolution: resolution + 1,
            chunk_resolution,
            threshold,
        }
    }

    /// Разметить сетку. Возвращает количество слитых регионов.
    pub fn run(&self, grid: &mut QuadGrid) -> usize {
        let resolution = grid.resolution();

        // Вся сетка целиком - если она помещается в один чанк
        if resolution <= self.chunk_resolution && self.is_flat(resolution, 0, 0) {
            merge_region(grid, resolution, 0, 0);
            return 1;
        }

        self.optimize(grid, resolution, 0, 0)
    }

    fn optimize(&self, grid: &mut QuadGrid, size: usize, origin_x: usize, origin_z: usize) -> usize {
        if size < MIN_SEARCH_SIZE {
            return 0;
        }

        let half = size >> 1;
        let mut merged = 0;

        for quadrant_z in [0, half] {
            for quadrant_x in [0, half] {
                let x = origin_x + quadrant_x;
                let z = origin_z + quadrant_z;

                if half <= self.chunk_resolution && self.is_flat(half, x, z) {
                    merge_region(grid, half, x, z);
                    merged += 1;
                    continue;
                }

                merged += self.optimize(grid, half, x, z);
            }
        }

        merged
    }

    #[inline]
    fn is_flat(&self, size: usize, origin_x: usize, origin_z: usize) -> bool {
        // Строгое сравнение: равенство порогу не сливает
        self.flatness(size, origin_x, origin_z) < self.threshold
    }

    /// Длина вектора дисперсии нормалей по (size+1)^2 вершинам области
    pub fn flatness(&self, size: usize, origin_x: usize, origin_z: usize) -> f32 {
        let span = size + 1;
        let count = (span * span) as f32;

        let normal_at = |dx: usize, dz: usize| {
            self.normals[(origin_z + dz) * self.vertex_resolution + origin_x + dx]
        };

        let mut mean = Vec3::zero();
        for dz in 0..span {
            for dx in 0..span {
                mean += normal_at(dx, dz);
            }
        }
        mean /= count;

        let mut variance = Vec3::zero();
        for dz in 0..span {
            for dx in 0..span {
                let deviation = normal_at(dx, dz) - mean;
                variance += deviation * deviation;
            }
        }
        variance /= count;

        variance.mag()
    }
}

/// Пометить область size x size как один регион: граничные ячейки получают
/// биты своих внешних сторон, внутренние - полную маску.
pub fn merge_region(grid: &mut QuadGrid, size: usize, origin_x: usize, origin_z: usize) {
    let last = size - 1;

    for dz in 0..size {
        for dx in 0..size {
            let mut edges = Edges::empty();
            if dx == 0 { edges |= Edges::LEFT; }
            if dx == last { edges |= Edges::RIGHT; }
            if dz == 0 { edges |= Edges::DOWN; }
            if dz == last { edges |= Edges::UP; }

            let cell = grid.get_mut(origin_x + dx, origin_z + dz);
            if edges.is_empty() {
                cell.absorb();
            } else {
                cell.set_external_edge(edges);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::quad::Corner;

    fn flat_normals(resolution: usize) -> Vec<Vec3> {
        vec![Vec3::unit_y(); (resolution + 1) * (resolution + 1)]
    }

    fn bottom_left_count(grid: &QuadGrid) -> usize {
        let r = grid.resolution();
        (0..r)
            .flat_map(|z| (0..r).map(move |x| (x, z)))
            .filter(|&(x, z)| grid.is_corner_vertex(x, z, Corner::BottomLeft))
            .count()
    }

    #[test]
    fn test_flat_single_chunk_merges_root() {
        let normals = flat_normals(8);
        let mut grid = QuadGrid::new(8);
        let merged = RegionOptimizer::new(&normals, 8, 8, 0.1).run(&mut grid);

        assert_eq!(merged, 1);
        assert_eq!(bottom_left_count(&grid), 1);
        assert_eq!(grid.region_length(0, 0), Some(7));
    }

    #[test]
    fn test_flat_respects_chunks() {
        let normals = flat_normals(16);
        let mut grid = QuadGrid::new(16);
        let merged = RegionOptimizer::new(&normals, 16, 4, 0.1).run(&mut grid);

        assert_eq!(merged, 16);
        for z in (0..16).step_by(4) {
            for x in (0..16).step_by(4) {
                assert!(grid.is_single_region(x, z, 4));
            }
        }
    }

    #[test]
    fn test_zero_threshold_never_merges() {
        let normals = flat_normals(8);
        let mut grid = QuadGrid::new(8);
        let merged = RegionOptimizer::new(&normals, 8, 8, 0.0).run(&mut grid);

        assert_eq!(merged, 0);
        assert!(grid.cells().iter().all(|c| c.is_single_quad()));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut normals = flat_normals(4);
        normals[0] = Vec3::unit_x();
        let optimizer = RegionOptimizer::new(&normals, 4, 4, 0.0);
        let score = optimizer.flatness(4, 0, 0);
        assert!(score > 0.0);

        let mut grid = QuadGrid::new(4);
        let merged = RegionOptimizer::new(&normals, 4, 4, score).run(&mut grid);
        // Корень и квадрант (0,0) содержат выброс и не сливаются, остальные плоские
        assert_eq!(merged, 3);
        assert!(grid.get(0, 0).is_single_quad());
    }

    #[test]
    fn test_bumpy_quadrant_recurses() {
        let mut normals = flat_normals(8);
        // Выброс в вершине (1, 1) - задевает только квадрант (0..4, 0..4)
        normals[9 + 1] = Vec3::unit_x();
        let mut grid = QuadGrid::new(8);
        RegionOptimizer::new(&normals, 8, 8, 0.01).run(&mut grid);

        assert!(grid.is_single_region(4, 0, 4));
        assert!(grid.is_single_region(0, 4, 4));
        assert!(grid.is_single_region(4, 4, 4));
        // Блок 2x2 с выбросом остаётся из квадов 1x1
        assert!(grid.get(0, 0).is_single_quad());
        assert!(grid.get(1, 1).is_single_quad());
        assert!(grid.is_single_region(2, 0, 2));
        assert!(grid.is_single_region(2, 2, 2));
    }
}
