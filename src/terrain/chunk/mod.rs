// ============================================
// Chunk Module - Разбиение на чанки
// ============================================

pub mod lookup;
pub mod split;

pub use lookup::ChunkLookup;
pub use split::{ChunkMesh, MeshBuffers, split_quads};
