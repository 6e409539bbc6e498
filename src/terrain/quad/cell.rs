// ============================================
// Quad Cell - Ячейка сетки упрощения
// ============================================
//
// Битовая маска рёбер кодирует роль ячейки в объединённом регионе:
// - 0b0000: самостоятельный квад 1x1, все углы - вершины
// - 0b1111: внутренняя ячейка региона, углов-вершин нет
// - частичная маска: ячейка на краю/углу региона; угол - вершина,
//   если оба соседних ему бита выставлены

use bitflags::bitflags;

bitflags! {
    /// Внешние (граничные) стороны ячейки
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        const UP    = 0b0001;
        const DOWN  = 0b0010;
        const LEFT  = 0b0100;
        const RIGHT = 0b1000;
    }
}

/// Угол ячейки. Down - сторона с меньшим z, Up - с большим.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Пара рёбер, образующих угол
    #[inline]
    pub const fn edges(self) -> Edges {
        match self {
            Corner::TopLeft => Edges::UP.union(Edges::LEFT),
            Corner::TopRight => Edges::UP.union(Edges::RIGHT),
            Corner::BottomLeft => Edges::DOWN.union(Edges::LEFT),
            Corner::BottomRight => Edges::DOWN.union(Edges::RIGHT),
        }
    }

    /// Смещение угла от ячейки (x, z) в координатах вершин
    #[inline]
    pub const fn vertex_offset(self) -> (usize, usize) {
        match self {
            Corner::TopLeft => (0, 1),
            Corner::TopRight => (1, 1),
            Corner::BottomLeft => (0, 0),
            Corner::BottomRight => (1, 0),
        }
    }
}

/// Является ли угол реальной вершиной при данной маске
#[inline]
pub fn is_corner_vertex(edges: Edges, corner: Corner) -> bool {
    if edges.is_empty() {
        return true;
    }
    if edges.is_all() {
        return false;
    }
    edges.contains(corner.edges())
}

/// Индекс не назначен
pub const UNSET_INDEX: u32 = u32::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadCell {
    /// Индексы углов в равномерном меше (фиксированы при создании)
    pub uniform_corner_index: [u32; 4],
    /// Индексы углов в сжатом меше (заполняются компактором)
    pub corner_index: [u32; 4],
    pub edges: Edges,
}

impl Default for QuadCell {
    fn default() -> Self {
        Self {
            uniform_corner_index: [UNSET_INDEX; 4],
            corner_index: [UNSET_INDEX; 4],
            edges: Edges::empty(),
        }
    }
}

impl QuadCell {
    pub fn new(top_left: u32, top_right: u32, bottom_left: u32, bottom_right: u32) -> Self {
        Self {
            uniform_corner_index: [top_left, top_right, bottom_left, bottom_right],
            corner_index: [UNSET_INDEX; 4],
            edges: Edges::empty(),
        }
    }

    #[inline]
    pub fn set_external_edge(&mut self, edge: Edges) {
        self.edges |= edge;
    }

    /// Пометить как внутреннюю ячейку региона
    #[inline]
    pub fn absorb(&mut self) {
        self.edges = Edges::all();
    }

    #[inline]
    pub fn is_single_quad(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn is_interior(&self) -> bool {
        self.edges.is_all()
    }

    #[inline]
    pub fn is_corner_vertex(&self, corner: Corner) -> bool {
        is_corner_vertex(self.edges, corner)
    }

    #[inline]
    pub fn uniform_index(&self, corner: Corner) -> u32 {
        self.uniform_corner_index[corner as usize]
    }

    /// Сжатый индекс угла, если компактор его назначил
    #[inline]
    pub fn compacted_index(&self, corner: Corner) -> Option<u32> {
        match self.corner_index[corner as usize] {
            UNSET_INDEX => None,
            index => Some(index),
        }
    }

    #[inline]
    pub fn set_compacted_index(&mut self, corner: Corner, index: u32) {
        self.corner_index[corner as usize] = index;
    }
}
