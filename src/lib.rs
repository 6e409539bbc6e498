// ============================================
// terrain-lod - Генератор упрощённого terrain меша
// ============================================

pub mod bake;
pub mod terrain;

pub use bake::{BakeFile, LoadedBake};
pub use terrain::{
    ChunkMesh, ChunkVertex, GenerationStats, Heightmap, TerrainError, TerrainMesh, TerrainSettings,
};
