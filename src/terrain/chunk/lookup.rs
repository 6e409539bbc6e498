// ============================================
// Chunk Lookup - Кварды по чанкам
// ============================================

/// chunk_id = chunk_z * chunk_count + chunk_x -> смещения квадов в буфере индексов.
/// Каждый квад - 6 индексов, смещение кратно 6.
#[derive(Debug, Clone, Default)]
pub struct ChunkLookup {
    chunk_count: usize,
    quads: Vec<Vec<usize>>,
}

impl ChunkLookup {
    pub fn new(chunk_count: usize) -> Self {
        Self {
            chunk_count,
            quads: vec![Vec::new(); chunk_count * chunk_count],
        }
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    #[inline]
    pub fn chunk_id(&self, chunk_x: usize, chunk_z: usize) -> usize {
        chunk_z * self.chunk_count + chunk_x
    }

    pub fn record(&mut self, chunk_x: usize, chunk_z: usize, offset: usize) {
        let id = self.chunk_id(chunk_x, chunk_z);
        self.quads[id].push(offset);
    }

    /// Смещения квадов чанка, None если чанк вне сетки
    pub fn quads(&self, chunk_x: usize, chunk_z: usize) -> Option<&[usize]> {
        if chunk_x >= self.chunk_count || chunk_z >= self.chunk_count {
            return None;
        }
        Some(&self.quads[self.chunk_id(chunk_x, chunk_z)])
    }

    /// Общее количество квадов во всех чанках
    pub fn quad_count(&self) -> usize {
        self.quads.iter().map(Vec::len).sum()
    }
}
