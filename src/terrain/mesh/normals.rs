// ============================================
// Smooth Normals - Накопление нормалей граней
// ============================================

use ultraviolet::Vec3;

/// Гладкие нормали вершин: сумма ненормированных (взвешенных по площади)
/// нормалей треугольников, затем нормализация и инверсия под обход CCW.
/// Вершины без треугольников получают нулевую нормаль.
pub fn smooth_normals(vertices: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::zero(); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let a = triangle[0] as usize;
        let b = triangle[1] as usize;
        let c = triangle[2] as usize;

        let face = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);

        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for normal in normals.iter_mut() {
        if normal.mag_sq() > 0.0 {
            *normal = -normal.normalized();
        }
    }

    normals
}
