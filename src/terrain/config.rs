// ============================================
// Terrain Settings - Параметры генерации
// ============================================
// Data-Driven: параметры читаются из JSON и приводятся
// к допустимым значениям через clamped().

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::TerrainError;

/// Минимальное разрешение после clamp
pub const MIN_RESOLUTION: u32 = 32;
/// Минимальное количество чанков по стороне после clamp
pub const MIN_CHUNK_COUNT: u32 = 2;
/// Максимальное разрешение (глубина рекурсии log2 = 13)
pub const MAX_RESOLUTION: u32 = 8192;
/// Минимальное разрешение, которое принимает сам генератор (один блок 4x4)
pub const MIN_GRID_RESOLUTION: u32 = 4;

/// Параметры генерации меша
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Размер terrain в мировых единицах (X, Z)
    pub size: [f32; 2],
    /// Количество квад-ячеек по стороне (степень двойки)
    pub resolution: u32,
    /// Количество чанков по стороне (степень двойки)
    pub chunk_count: u32,
    /// Вертикальный масштаб
    pub amplitude: f32,
    /// Порог "плоскости" для слияния регионов
    pub simplify_threshold: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            size: [32.0, 32.0],
            resolution: 128,
            chunk_count: 4,
            amplitude: 16.0,
            simplify_threshold: 0.005,
        }
    }
}

impl TerrainSettings {
    /// Загрузить настройки из JSON строки (отсутствующие поля берутся по умолчанию)
    pub fn load_from_json(json: &str) -> Result<Self, TerrainError> {
        let settings: TerrainSettings = serde_json::from_str(json)?;
        Ok(settings)
    }

    /// Загрузить настройки из файла
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::load_from_json(&content)
    }

    /// Привести параметры к допустимым значениям
    pub fn clamped(&self) -> Self {
        let resolution = clamp_power_of_two(self.resolution, MIN_RESOLUTION, MAX_RESOLUTION);
        let chunk_count = clamp_power_of_two(self.chunk_count, MIN_CHUNK_COUNT, resolution >> 1);

        Self {
            size: [self.size[0].max(1.0), self.size[1].max(1.0)],
            resolution,
            chunk_count,
            amplitude: self.amplitude,
            simplify_threshold: self.simplify_threshold.max(0.0),
        }
    }

    /// Проверка параметров без исправления (для генератора)
    pub fn validate(&self) -> Result<(), TerrainError> {
        let r = self.resolution;
        if !r.is_power_of_two() || r < MIN_GRID_RESOLUTION || r > MAX_RESOLUTION {
            return Err(TerrainError::InvalidResolution(r));
        }

        let c = self.chunk_count;
        if !c.is_power_of_two() || c > r >> 1 {
            return Err(TerrainError::InvalidChunkCount { chunk_count: c, resolution: r });
        }

        // NaN тоже отсекается
        if !(self.size[0] > 0.0 && self.size[1] > 0.0) {
            return Err(TerrainError::InvalidSize(self.size));
        }

        Ok(())
    }

    /// Количество квад-ячеек по стороне одного чанка
    #[inline]
    pub fn chunk_resolution(&self) -> u32 {
        self.resolution / self.chunk_count.max(1)
    }

    /// Размер одной квад-ячейки в мировых единицах
    #[inline]
    pub fn cell_scale(&self) -> [f32; 2] {
        let r = self.resolution as f32;
        [self.size[0] / r, self.size[1] / r]
    }

    /// Размер одного чанка в мировых единицах
    #[inline]
    pub fn chunk_size(&self) -> [f32; 2] {
        let c = self.chunk_count.max(1) as f32;
        [self.size[0] / c, self.size[1] / c]
    }
}

/// Ближайшая степень двойки >= value в пределах [min, max].
/// Сдвиг выполняется хотя бы один раз: от min / 2 до min.
fn clamp_power_of_two(value: u32, min: u32, max: u32) -> u32 {
    let mut result = (min >> 1).max(1);
    loop {
        result <<= 1;
        if result >= value || result >= max {
            break;
        }
    }
    result
}
