// ============================================
// Bake Header - Заголовок bake-файла
// ============================================

use serde::{Deserialize, Serialize};

/// Магическое число "TQDM" в ASCII
pub const MAGIC_NUMBER: [u8; 4] = *b"TQDM";

/// Версия формата
pub const BAKE_VERSION: u32 = 1;

/// Заголовок bake-файла (фиксированный размер в bincode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub resolution: u32,
    pub chunk_count: u32,
}

impl BakeHeader {
    pub fn new(resolution: u32, chunk_count: u32) -> Self {
        Self {
            magic: MAGIC_NUMBER,
            version: BAKE_VERSION,
            resolution,
            chunk_count,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == MAGIC_NUMBER && self.version == BAKE_VERSION
    }
}

impl Default for BakeHeader {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
