// ============================================
// Terrain Errors - Ошибки генерации
// ============================================
// Ошибки конфигурации фатальны и не повторяются.
// Нарушения топологии (незамкнутый регион) сюда не попадают:
// они логируются через log::warn! и регион пропускается.

use std::fmt;

/// Ошибки генерации terrain
#[derive(Debug)]
pub enum TerrainError {
    /// Разрешение не степень двойки или вне допустимого диапазона
    InvalidResolution(u32),
    /// Количество чанков не степень двойки или больше resolution / 2
    InvalidChunkCount { chunk_count: u32, resolution: u32 },
    /// Размер мира не положителен по одной из осей
    InvalidSize([f32; 2]),
    /// Чанк вне диапазона [0, chunk_count)²
    ChunkOutOfRange { x: i32, z: i32, chunk_count: u32 },
    /// Ребро квада нулевой длины при коррекции щелей
    DegenerateEdge { x: usize, z: usize, size: usize },
    /// Некорректные данные карты высот
    InvalidHeightmap(String),
    /// Ошибка чтения/декодирования изображения
    Image(String),
    /// Ошибка разбора конфига
    Config(String),
    Io(std::io::Error),
    /// Ошибки bake-файла
    Serialize(String),
    Deserialize(String),
    Compression(String),
    InvalidMagic,
    UnsupportedVersion(u32),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::InvalidResolution(r) => {
                write!(f, "Invalid resolution {}: expected a power of two in the supported range", r)
            }
            TerrainError::InvalidChunkCount { chunk_count, resolution } => write!(
                f,
                "Invalid chunk count {} for resolution {}: expected a power of two no larger than {}",
                chunk_count,
                resolution,
                resolution / 2
            ),
            TerrainError::InvalidSize(size) => {
                write!(f, "Invalid terrain size [{}, {}]: both axes must be positive", size[0], size[1])
            }
            TerrainError::ChunkOutOfRange { x, z, chunk_count } => write!(
                f,
                "Chunk at ({}, {}) is out of bounds for a {}x{} chunk grid",
                x, z, chunk_count, chunk_count
            ),
            TerrainError::DegenerateEdge { x, z, size } => write!(
                f,
                "Quad of size {} at cell ({}, {}) has a zero-length edge",
                size, x, z
            ),
            TerrainError::InvalidHeightmap(msg) => write!(f, "Invalid heightmap: {}", msg),
            TerrainError::Image(msg) => write!(f, "Failed to load heightmap image: {}", msg),
            TerrainError::Config(msg) => write!(f, "Failed to parse terrain config: {}", msg),
            TerrainError::Io(e) => write!(f, "I/O error: {}", e),
            TerrainError::Serialize(msg) => write!(f, "Failed to serialize bake data: {}", msg),
            TerrainError::Deserialize(msg) => write!(f, "Failed to deserialize bake data: {}", msg),
            TerrainError::Compression(msg) => write!(f, "Compression error: {}", msg),
            TerrainError::InvalidMagic => write!(f, "Not a terrain bake file (bad magic number)"),
            TerrainError::UnsupportedVersion(v) => write!(f, "Unsupported bake file version {}", v),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<image::ImageError> for TerrainError {
    fn from(e: image::ImageError) -> Self {
        TerrainError::Image(e.to_string())
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Config(e.to_string())
    }
}
