// ============================================
// Bake File - Запись/чтение нарезанных чанков
// ============================================
// [заголовок bincode][тело bincode, сжатое ZSTD]
//
// Тело хранит вершины чанков в локальных координатах,
// хост может загрузить их в GPU буферы без повторной генерации.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use ultraviolet::{Vec2, Vec3};

use crate::terrain::{ChunkMesh, TerrainError, TerrainSettings};

use super::header::{BakeHeader, BAKE_VERSION, MAGIC_NUMBER};

const COMPRESSION_LEVEL: i32 = 3;

#[derive(Debug, Serialize, Deserialize)]
struct SavedChunk {
    chunk_x: u32,
    chunk_z: u32,
    center: [f32; 3],
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl SavedChunk {
    fn from_mesh(mesh: &ChunkMesh) -> Self {
        Self {
            chunk_x: mesh.chunk_x as u32,
            chunk_z: mesh.chunk_z as u32,
            center: mesh.center.into(),
            positions: mesh.vertices.iter().map(|&v| v.into()).collect(),
            normals: mesh.normals.iter().map(|&n| n.into()).collect(),
            uvs: mesh.uvs.iter().map(|&uv| uv.into()).collect(),
            indices: mesh.indices.clone(),
        }
    }

    fn into_mesh(self) -> ChunkMesh {
        ChunkMesh {
            chunk_x: self.chunk_x as usize,
            chunk_z: self.chunk_z as usize,
            center: Vec3::from(self.center),
            vertices: self.positions.into_iter().map(Vec3::from).collect(),
            uvs: self.uvs.into_iter().map(Vec2::from).collect(),
            normals: self.normals.into_iter().map(Vec3::from).collect(),
            indices: self.indices,
        }
    }
}

/// Тело файла (сжимается ZSTD)
#[derive(Debug, Serialize, Deserialize)]
struct BakeBody {
    settings: TerrainSettings,
    chunks: Vec<SavedChunk>,
}

/// Результат загрузки
#[derive(Debug)]
pub struct LoadedBake {
    pub header: BakeHeader,
    pub settings: TerrainSettings,
    pub chunks: Vec<ChunkMesh>,
}

impl LoadedBake {
    pub fn vertex_count(&self) -> usize {
        self.chunks.iter().map(|c| c.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.chunks.iter().map(|c| c.triangle_count()).sum()
    }
}

pub struct BakeFile;

fn serialize_error(e: bincode::Error) -> TerrainError {
    TerrainError::Serialize(e.to_string())
}

fn deserialize_error(e: bincode::Error) -> TerrainError {
    TerrainError::Deserialize(e.to_string())
}

impl BakeFile {
    /// Записать чанки в файл. Тело сжимается потоково, без промежуточного буфера.
    pub fn save(
        path: impl AsRef<Path>,
        settings: &TerrainSettings,
        chunks: &[ChunkMesh],
    ) -> Result<(), TerrainError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);

        let header = BakeHeader::new(settings.resolution, settings.chunk_count);
        bincode::serialize_into(&mut writer, &header).map_err(serialize_error)?;

        let body = BakeBody {
            settings: settings.clone(),
            chunks: chunks.iter().map(SavedChunk::from_mesh).collect(),
        };
        let mut encoder = zstd::Encoder::new(writer, COMPRESSION_LEVEL)
            .map_err(|e| TerrainError::Compression(e.to_string()))?;
        bincode::serialize_into(&mut encoder, &body).map_err(serialize_error)?;

        let mut writer = encoder
            .finish()
            .map_err(|e| TerrainError::Compression(e.to_string()))?;
        writer.flush()?;

        log::debug!("Baked {} chunks to {:?}", chunks.len(), path);
        Ok(())
    }

    /// Загрузить чанки из файла. Заголовок проверяется до распаковки тела.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedBake, TerrainError> {
        let mut reader = BufReader::new(File::open(path)?);

        let header: BakeHeader = bincode::deserialize_from(&mut reader).map_err(deserialize_error)?;
        if header.magic != MAGIC_NUMBER {
            return Err(TerrainError::InvalidMagic);
        }
        if header.version != BAKE_VERSION {
            return Err(TerrainError::UnsupportedVersion(header.version));
        }

        let decoder = zstd::Decoder::with_buffer(reader)
            .map_err(|e| TerrainError::Compression(e.to_string()))?;
        let body: BakeBody = bincode::deserialize_from(decoder).map_err(deserialize_error)?;

        Ok(LoadedBake {
            header,
            settings: body.settings,
            chunks: body.chunks.into_iter().map(SavedChunk::into_mesh).collect(),
        })
    }
}
