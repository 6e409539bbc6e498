// ============================================
// Simplify Module - Упрощение плоских регионов
// ============================================
//
// Порядок проходов фиксирован:
// optimizer -> compactor -> indices -> (нормали) -> gaps

pub mod optimizer;
pub mod compactor;
pub mod indices;
pub mod gaps;

pub use optimizer::{RegionOptimizer, merge_region};
pub use compactor::{compact_vertices, CompactedVertices};
pub use indices::{build_indices, QuadIndices};
pub use gaps::{correct_gaps, GapCorrector};
