// ============================================
// Mesh Module - Построение меша
// ============================================

pub mod normals;
pub mod uniform;
pub mod vertex;

pub use normals::smooth_normals;
pub use uniform::UniformMesh;
pub use vertex::ChunkVertex;
