// ============================================
// Quad Module - Сетка квад-ячеек
// ============================================

pub mod cell;
pub mod grid;

pub use cell::{Corner, Edges, QuadCell, is_corner_vertex, UNSET_INDEX};
pub use grid::QuadGrid;
