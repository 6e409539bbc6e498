// ============================================
// Terrain Mesh - Полный проход генерации
// ============================================
//
// heightmap -> равномерный меш -> нормали -> квадродерево ->
// сжатие вершин -> индексы -> нормали -> коррекция щелей.
// Все промежуточные буферы живут только внутри generate().

use rayon::prelude::*;
use ultraviolet::{Vec2, Vec3};

use super::chunk::{split_quads, ChunkLookup, ChunkMesh, MeshBuffers};
use super::config::TerrainSettings;
use super::error::TerrainError;
use super::generation::Heightmap;
use super::mesh::{smooth_normals, UniformMesh};
use super::simplify::{build_indices, compact_vertices, correct_gaps, RegionOptimizer};

/// Статистика прохода генерации
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub uniform_vertices: usize,
    pub uniform_triangles: usize,
    pub merged_regions: usize,
    pub vertices: usize,
    pub triangles: usize,
    /// Незамкнутые регионы, пропущенные построителем индексов
    pub skipped_regions: usize,
    /// Вершины, сдвинутые коррекцией щелей
    pub corrected_vertices: usize,
}

/// Упрощённый меш terrain, готовый к нарезке на чанки
pub struct TerrainMesh {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    lookup: ChunkLookup,
    settings: TerrainSettings,
    stats: GenerationStats,
}

impl TerrainMesh {
    /// Сгенерировать меш. Настройки проверяются, но не исправляются:
    /// для пользовательского ввода сначала вызвать TerrainSettings::clamped().
    pub fn generate(heightmap: Option<&Heightmap>, settings: &TerrainSettings) -> Result<Self, TerrainError> {
        settings.validate()?;

        let resolution = settings.resolution as usize;
        let chunk_count = settings.chunk_count as usize;
        let chunk_resolution = settings.chunk_resolution() as usize;
        let [scale_x, scale_z] = settings.cell_scale();

        if heightmap.is_none() {
            log::debug!("No heightmap supplied, using analytic fallback surface");
        }

        // 1. Равномерная сетка и её нормали
        let (uniform, mut grid) = UniformMesh::build(
            heightmap,
            resolution,
            Vec2::new(scale_x, scale_z),
            settings.amplitude,
        );
        let uniform_normals = smooth_normals(&uniform.vertices, &uniform.indices);

        // 2. Слияние плоских регионов
        let merged_regions = RegionOptimizer::new(
            &uniform_normals,
            resolution,
            chunk_resolution,
            settings.simplify_threshold,
        )
        .run(&mut grid);

        if log::log_enabled!(log::Level::Trace) {
            for row in grid.debug_rows() {
                log::trace!("{}", row);
            }
        }

        // 3. Сжатие и индексы
        let compacted = compact_vertices(&mut grid, &uniform);
        let quads = build_indices(&grid, chunk_resolution, chunk_count);

        // 4. Нормали упрощённого меша и коррекция щелей
        let mut vertices = compacted.vertices;
        let mut normals = smooth_normals(&vertices, &quads.indices);
        let corrected_vertices = correct_gaps(&grid, &mut vertices, &mut normals)?;

        let stats = GenerationStats {
            uniform_vertices: uniform.vertices.len(),
            uniform_triangles: uniform.indices.len() / 3,
            merged_regions,
            vertices: vertices.len(),
            triangles: quads.indices.len() / 3,
            skipped_regions: quads.skipped,
            corrected_vertices,
        };

        log::info!(
            "Terrain {}x{} simplified: {} -> {} vertices, {} -> {} triangles ({} regions merged, {} seam vertices corrected)",
            resolution,
            resolution,
            stats.uniform_vertices,
            stats.vertices,
            stats.uniform_triangles,
            stats.triangles,
            stats.merged_regions,
            stats.corrected_vertices,
        );
        if stats.skipped_regions > 0 {
            log::warn!("{} unsealed regions were skipped", stats.skipped_regions);
        }

        Ok(Self {
            vertices,
            uvs: compacted.uvs,
            normals,
            indices: quads.indices,
            lookup: quads.lookup,
            settings: settings.clone(),
            stats,
        })
    }

    #[inline]
    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    #[inline]
    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.lookup.chunk_count()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn lookup(&self) -> &ChunkLookup {
        &self.lookup
    }

    /// Центр чанка в мировых координатах (сетка центрирована в начале координат)
    pub fn chunk_center(&self, chunk_x: usize, chunk_z: usize) -> Vec3 {
        let [size_x, size_z] = self.settings.size;
        let [chunk_size_x, chunk_size_z] = self.settings.chunk_size();
        Vec3::new(
            -size_x * 0.5 + (chunk_x as f32 + 0.5) * chunk_size_x,
            0.0,
            -size_z * 0.5 + (chunk_z as f32 + 0.5) * chunk_size_z,
        )
    }

    /// Вырезать чанк (chunk_x, chunk_z) в самостоятельный меш
    pub fn split_chunk(&self, chunk_x: i32, chunk_z: i32) -> Result<ChunkMesh, TerrainError> {
        let count = self.chunk_count();
        let out_of_range = TerrainError::ChunkOutOfRange { x: chunk_x, z: chunk_z, chunk_count: count as u32 };

        if chunk_x < 0 || chunk_z < 0 {
            return Err(out_of_range);
        }
        let (cx, cz) = (chunk_x as usize, chunk_z as usize);
        let Some(quads) = self.lookup.quads(cx, cz) else {
            return Err(out_of_range);
        };

        let chunk = split_quads(&self.buffers(), quads, cx, cz, self.chunk_center(cx, cz));
        log::debug!(
            "Chunk ({}, {}): {} vertices, {} triangles",
            cx,
            cz,
            chunk.vertices.len(),
            chunk.triangle_count()
        );
        Ok(chunk)
    }

    /// Все чанки, упорядоченные по chunk_id. Нарезка только читает меш,
    /// поэтому чанки собираются параллельно.
    pub fn split_all_chunks(&self) -> Vec<ChunkMesh> {
        let count = self.chunk_count();
        let buffers = self.buffers();

        (0..count * count)
            .into_par_iter()
            .map(|id| {
                let (cx, cz) = (id % count, id / count);
                let quads = self.lookup.quads(cx, cz).unwrap_or(&[]);
                split_quads(&buffers, quads, cx, cz, self.chunk_center(cx, cz))
            })
            .collect()
    }

    fn buffers(&self) -> MeshBuffers<'_> {
        MeshBuffers {
            vertices: &self.vertices,
            uvs: &self.uvs,
            normals: &self.normals,
            indices: &self.indices,
        }
    }
}
