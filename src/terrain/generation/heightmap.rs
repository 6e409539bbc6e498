// ============================================
// Heightmap - Скалярное поле высот
// ============================================

use std::path::Path;

use image::DynamicImage;
use ultraviolet::Vec2;

use crate::terrain::error::TerrainError;

/// 2D поле высот (row-major, строка 0 соответствует v = 0)
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Heightmap {
    /// Создать из сырых значений
    pub fn from_raw(width: usize, height: usize, data: Vec<f32>) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidHeightmap(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if data.len() != width * height {
            return Err(TerrainError::InvalidHeightmap(format!(
                "expected {} samples for {}x{}, got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Постоянная высота
    pub fn flat(width: usize, height: usize, value: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self { width, height, data: vec![value; width * height] }
    }

    /// Заполнить функцией от нормализованных координат текселя
    pub fn from_fn(width: usize, height: usize, f: impl Fn(f32, f32) -> f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let du = (width - 1).max(1) as f32;
        let dv = (height - 1).max(1) as f32;

        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x as f32 / du, y as f32 / dv));
            }
        }
        Self { width, height, data }
    }

    /// Из изображения: берём красный канал, нормализованный в 0..1
    pub fn from_image(image: &DynamicImage) -> Result<Self, TerrainError> {
        let rgba = image.to_rgba32f();
        let (width, height) = rgba.dimensions();
        let data = rgba.pixels().map(|p| p.0[0]).collect();
        Self::from_raw(width as usize, height as usize, data)
    }

    /// Загрузить из файла (PNG, JPEG, ...)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TerrainError> {
        let image = image::open(path.as_ref())?;
        Self::from_image(&image)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Билинейная выборка; края клампятся, без заворачивания
    pub fn sample_bilinear(&self, uv: Vec2) -> f32 {
        let max_x = self.width - 1;
        let max_y = self.height - 1;

        let fx = uv.x.clamp(0.0, 1.0) * max_x as f32;
        let fy = uv.y.clamp(0.0, 1.0) * max_y as f32;

        let min_px = (fx.floor() as usize).min(max_x);
        let min_py = (fy.floor() as usize).min(max_y);
        let max_px = (min_px + 1).min(max_x);
        let max_py = (min_py + 1).min(max_y);

        let tx = fx - min_px as f32;
        let ty = fy - min_py as f32;

        let top_left = self.texel(min_px, max_py);
        let top_right = self.texel(max_px, max_py);
        let bottom_left = self.texel(min_px, min_py);
        let bottom_right = self.texel(max_px, min_py);

        let top = top_left + (top_right - top_left) * tx;
        let bottom = bottom_left + (bottom_right - bottom_left) * tx;

        bottom + (top - bottom) * ty
    }
}
