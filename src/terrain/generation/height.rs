// ============================================
// Height Sampler - Выборка высоты по UV
// ============================================

use std::f32::consts::TAU;

use ultraviolet::Vec2;

use super::heightmap::Heightmap;

/// Высота в точке uv (0..1). Без карты высот - аналитическая волна.
#[inline]
pub fn sample_height(uv: Vec2, heightmap: Option<&Heightmap>) -> f32 {
    match heightmap {
        Some(map) => map.sample_bilinear(uv),
        None => fallback_height(uv),
    }
}

/// Детерминированная поверхность по умолчанию
#[inline]
pub fn fallback_height(uv: Vec2) -> f32 {
    (uv.x * TAU).sin() * (uv.y * TAU).cos()
}
