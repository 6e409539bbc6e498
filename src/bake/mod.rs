// ============================================
// Bake - Экспорт нарезанных чанков
// ============================================
// Формат *.bake: bincode заголовок + ZSTD сжатое тело

mod bake_file;
mod header;

pub use bake_file::{BakeFile, LoadedBake};
pub use header::{BakeHeader, BAKE_VERSION, MAGIC_NUMBER};
