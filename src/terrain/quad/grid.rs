// ============================================
// Quad Grid - Плоская сетка квад-ячеек
// ============================================
//
// R x R ячеек в одном Vec, адресация x + z * R.
// Сетка принадлежит одному проходу генерации.

use super::cell::{Corner, QuadCell};

pub struct QuadGrid {
    resolution: usize,
    cells: Vec<QuadCell>,
}

impl QuadGrid {
    /// Пустая сетка (все ячейки - самостоятельные кварды без индексов)
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            cells: vec![QuadCell::default(); resolution * resolution],
        }
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    fn index(&self, x: usize, z: usize) -> usize {
        debug_assert!(x < self.resolution && z < self.resolution);
        z * self.resolution + x
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> &QuadCell {
        &self.cells[self.index(x, z)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, z: usize) -> &mut QuadCell {
        let idx = self.index(x, z);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn set(&mut self, x: usize, z: usize, cell: QuadCell) {
        let idx = self.index(x, z);
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn is_corner_vertex(&self, x: usize, z: usize, corner: Corner) -> bool {
        self.get(x, z).is_corner_vertex(corner)
    }

    pub fn cells(&self) -> &[QuadCell] {
        &self.cells
    }

    /// Длина региона, начинающегося в (x, z): смещение до первой ячейки
    /// с углом BottomRight в той же строке. 0 для квада 1x1.
    pub fn region_length(&self, x: usize, z: usize) -> Option<usize> {
        (x..self.resolution)
            .find(|&search_x| self.is_corner_vertex(search_x, z, Corner::BottomRight))
            .map(|search_x| search_x - x)
    }

    /// Является ли выровненная секция size x size ровно одним регионом
    pub fn is_single_region(&self, x: usize, z: usize, size: usize) -> bool {
        if size == 0 || !self.is_corner_vertex(x, z, Corner::BottomLeft) {
            return false;
        }
        (0..size).all(|offset| {
            let is_bottom_right = self.is_corner_vertex(x + offset, z, Corner::BottomRight);
            is_bottom_right == (offset == size - 1)
        })
    }

    /// Текстовая карта сетки для отладки (сверху вниз по z)
    ///
    /// `' '` - квад 1x1, `.` - внутренняя ячейка, `R` - угол BottomRight, `#` - прочие
    pub fn debug_rows(&self) -> Vec<String> {
        (0..self.resolution)
            .rev()
            .map(|z| {
                let row: String = (0..self.resolution)
                    .map(|x| {
                        let cell = self.get(x, z);
                        if cell.is_single_quad() {
                            ' '
                        } else if cell.is_interior() {
                            '.'
                        } else if cell.is_corner_vertex(Corner::BottomRight) {
                            'R'
                        } else {
                            '#'
                        }
                    })
                    .collect();
                format!("Row {:04}: {}", z, row)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::quad::cell::Edges;

    /// Регион size x size в (ox, oz), как его размечает оптимизатор
    fn mark_region(grid: &mut QuadGrid, ox: usize, oz: usize, size: usize) {
        for z in 0..size {
            for x in 0..size {
                let cell = grid.get_mut(ox + x, oz + z);
                let mut edges = Edges::empty();
                if x == 0 { edges |= Edges::LEFT; }
                if x == size - 1 { edges |= Edges::RIGHT; }
                if z == 0 { edges |= Edges::DOWN; }
                if z == size - 1 { edges |= Edges::UP; }
                if edges.is_empty() { cell.absorb(); } else { cell.set_external_edge(edges); }
            }
        }
    }

    #[test]
    fn test_region_length_single_quads() {
        let grid = QuadGrid::new(4);
        assert_eq!(grid.region_length(0, 0), Some(0));
        assert_eq!(grid.region_length(3, 2), Some(0));
    }

    #[test]
    fn test_region_length_merged() {
        let mut grid = QuadGrid::new(8);
        mark_region(&mut grid, 0, 0, 4);
        assert_eq!(grid.region_length(0, 0), Some(3));
        assert!(grid.is_single_region(0, 0, 4));
        assert!(!grid.is_single_region(0, 0, 2));
        assert!(!grid.is_single_region(4, 0, 4));
    }

    #[test]
    fn test_region_length_unsealed() {
        let mut grid = QuadGrid::new(4);
        // Левый нижний угол без пары
        grid.get_mut(0, 0).set_external_edge(Edges::LEFT | Edges::DOWN);
        for x in 1..4 {
            grid.get_mut(x, 0).set_external_edge(Edges::DOWN);
        }
        assert_eq!(grid.region_length(0, 0), None);
    }

    #[test]
    fn test_debug_rows() {
        let mut grid = QuadGrid::new(4);
        mark_region(&mut grid, 0, 0, 4);
        let rows = grid.debug_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "Row 0003: ####");
        assert_eq!(rows[2], "Row 0001: #..#");
        assert_eq!(rows[3], "Row 0000: ###R");
    }
}
