// ============================================
// Terrain Module - Упрощение меша terrain
// ============================================
// Квадродерево над равномерной сеткой: плоские регионы сливаются,
// щели на T-стыках закрываются, результат режется на чанки.

pub mod config;
pub mod error;
pub mod generation;
pub mod mesh;
pub mod quad;
pub mod simplify;
pub mod chunk;
pub mod builder;

// Re-exports
pub use config::TerrainSettings;
pub use error::TerrainError;
pub use generation::Heightmap;
pub use mesh::ChunkVertex;
pub use chunk::{ChunkLookup, ChunkMesh};
pub use builder::{GenerationStats, TerrainMesh};
