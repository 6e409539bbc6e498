// ============================================
// Generation Module - Источник высот
// ============================================

pub mod heightmap;
pub mod height;

pub use heightmap::Heightmap;
pub use height::{sample_height, fallback_height};
