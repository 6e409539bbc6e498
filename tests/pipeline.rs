// ============================================
// Pipeline tests - Полный проход генерации
// ============================================

use std::collections::HashSet;

use terrain_lod::terrain::mesh::UniformMesh;
use terrain_lod::{Heightmap, TerrainError, TerrainMesh, TerrainSettings};
use ultraviolet::{Vec2, Vec3};

const EPSILON: f32 = 1e-4;

fn settings(resolution: u32, chunk_count: u32, amplitude: f32, threshold: f32) -> TerrainSettings {
    TerrainSettings {
        size: [resolution as f32, resolution as f32],
        resolution,
        chunk_count,
        amplitude,
        simplify_threshold: threshold,
    }
}

/// Плоскость с гауссовым холмом в квадранте (0.75, 0.75)
fn bump_heightmap() -> Heightmap {
    Heightmap::from_fn(129, 129, |u, v| {
        let du = u - 0.75;
        let dv = v - 0.75;
        (-(du * du + dv * dv) / (2.0 * 0.05 * 0.05)).exp()
    })
}

/// Плоская вершина в центре, линейный склон до нуля по краям
fn plateau_heightmap() -> Heightmap {
    Heightmap::from_fn(129, 129, |u, v| {
        let r = (u - 0.5).abs().max((v - 0.5).abs());
        ((0.3 - r) / 0.15).clamp(0.0, 1.0)
    })
}

/// Квады меша как [TL, BL, BR, TR]
fn quads(indices: &[u32]) -> Vec<[usize; 4]> {
    indices
        .chunks_exact(6)
        .map(|q| [q[0] as usize, q[1] as usize, q[2] as usize, q[5] as usize])
        .collect()
}

fn xz_area(vertices: &[Vec3], indices: &[u32]) -> f32 {
    indices
        .chunks_exact(3)
        .map(|t| {
            let a = vertices[t[0] as usize];
            let ab = vertices[t[1] as usize] - a;
            let ac = vertices[t[2] as usize] - a;
            (ab.x * ac.z - ab.z * ac.x).abs() * 0.5
        })
        .sum()
}

#[test]
fn flat_four_by_four_becomes_one_quad() {
    let map = Heightmap::flat(16, 16, 0.0);
    let mesh = TerrainMesh::generate(Some(&map), &settings(4, 1, 1.0, 1.0)).unwrap();

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
    assert_eq!(mesh.stats().merged_regions, 1);
}

#[test]
fn zero_threshold_keeps_uniform_mesh() {
    let settings = settings(16, 2, 3.0, 0.0);
    let mesh = TerrainMesh::generate(None, &settings).unwrap();

    let [scale_x, scale_z] = settings.cell_scale();
    let (uniform, _) = UniformMesh::build(None, 16, Vec2::new(scale_x, scale_z), 3.0);

    assert_eq!(mesh.vertices.len(), 17 * 17);
    assert_eq!(mesh.vertices, uniform.vertices);
    assert_eq!(mesh.uvs, uniform.uvs);
    assert_eq!(mesh.triangle_count(), 16 * 16 * 2);

    let stats = mesh.stats();
    assert_eq!(stats.merged_regions, 0);
    assert_eq!(stats.corrected_vertices, 0);
}

#[test]
fn flat_terrain_collapses_to_chunk_quads() {
    let map = Heightmap::flat(8, 8, 0.5);
    let mesh = TerrainMesh::generate(Some(&map), &settings(32, 4, 10.0, 0.01)).unwrap();

    // Один квад на чанк: 4x4 квада, 5x5 вершин
    assert_eq!(mesh.triangle_count(), 16 * 2);
    assert_eq!(mesh.vertices.len(), 25);
    assert_eq!(mesh.stats().corrected_vertices, 0);
    for v in &mesh.vertices {
        assert!((v.y - 5.0).abs() < EPSILON);
    }
}

#[test]
fn simplified_mesh_is_closed() {
    let map = bump_heightmap();
    let mesh = TerrainMesh::generate(Some(&map), &settings(32, 1, 4.0, 0.001)).unwrap();

    assert_eq!(mesh.stats().skipped_regions, 0);
    assert!(mesh.vertices.len() < 33 * 33);
    assert_eq!(mesh.normals.len(), mesh.vertices.len());
    assert_eq!(mesh.uvs.len(), mesh.vertices.len());

    // Каждая вершина используется, индексы в диапазоне
    let used: HashSet<u32> = mesh.indices.iter().copied().collect();
    assert_eq!(used.len(), mesh.vertices.len());
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));

    // Квады покрывают площадь ровно один раз
    assert!((xz_area(&mesh.vertices, &mesh.indices) - 32.0 * 32.0).abs() < 1e-2);
}

/// Все вершины, лежащие внутри ребра квада, лежат на прямой между его углами
fn assert_no_t_junctions(mesh: &TerrainMesh) {
    let vertices = &mesh.vertices;
    for [tl, bl, br, tr] in quads(&mesh.indices) {
        // (начало, конец, ось вдоль ребра: true = x)
        let edges = [(bl, br, true), (tl, tr, true), (bl, tl, false), (br, tr, false)];

        for (start, end, along_x) in edges {
            let a = vertices[start];
            let b = vertices[end];

            for p in vertices.iter() {
                let (pa, pb, pp, fixed_a, fixed_p) = if along_x {
                    (a.x, b.x, p.x, a.z, p.z)
                } else {
                    (a.z, b.z, p.z, a.x, p.x)
                };
                if (fixed_p - fixed_a).abs() > EPSILON {
                    continue;
                }
                let (lo, hi) = if pa < pb { (pa, pb) } else { (pb, pa) };
                if pp <= lo + EPSILON || pp >= hi - EPSILON {
                    continue;
                }

                let weight = (pp - pa) / (pb - pa);
                let expected = a.y + (b.y - a.y) * weight;
                assert!(
                    (p.y - expected).abs() < EPSILON,
                    "T-junction at {:?} off edge {:?} -> {:?}",
                    p,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn seam_vertices_lie_on_neighbour_edges() {
    let map = bump_heightmap();
    let mesh = TerrainMesh::generate(Some(&map), &settings(32, 1, 4.0, 0.001)).unwrap();

    assert!(mesh.stats().corrected_vertices > 0);
    assert_no_t_junctions(&mesh);
}

#[test]
fn plateau_ramp_seams_are_closed() {
    let map = plateau_heightmap();
    let mesh = TerrainMesh::generate(Some(&map), &settings(32, 1, 4.0, 0.001)).unwrap();

    let stats = mesh.stats();
    assert_eq!(stats.skipped_regions, 0);
    assert!(stats.merged_regions > 0);
    assert!(stats.corrected_vertices > 0);

    // Слитые регионы есть и на вершине плато, и на склоне
    let mut plateau_regions = 0;
    let mut ramp_regions = 0;
    for [tl, bl, br, tr] in quads(&mesh.indices) {
        if mesh.vertices[br].x - mesh.vertices[bl].x < 2.0 - EPSILON {
            continue;
        }
        let heights = [tl, bl, br, tr].map(|i| mesh.vertices[i].y);
        let low = heights.iter().copied().fold(f32::MAX, f32::min);
        let high = heights.iter().copied().fold(f32::MIN, f32::max);
        if low > 4.0 - EPSILON {
            plateau_regions += 1;
        } else if high - low > 0.1 {
            ramp_regions += 1;
        }
    }
    assert!(plateau_regions > 0);
    assert!(ramp_regions > 0);

    assert_no_t_junctions(&mesh);
}

#[test]
fn chunks_partition_the_mesh() {
    let map = bump_heightmap();
    let mesh = TerrainMesh::generate(Some(&map), &settings(32, 4, 4.0, 0.001)).unwrap();
    let chunks = mesh.split_all_chunks();

    assert_eq!(chunks.len(), 16);
    let total: usize = chunks.iter().map(|c| c.triangle_count()).sum();
    assert_eq!(total, mesh.triangle_count());

    // Каждый квад ровно в одном чанке
    let mut offsets = HashSet::new();
    for cz in 0..4 {
        for cx in 0..4 {
            for &offset in mesh.lookup().quads(cx, cz).unwrap() {
                assert_eq!(offset % 6, 0);
                assert!(offsets.insert(offset));
            }
        }
    }
    assert_eq!(offsets.len() * 6, mesh.indices.len());

    // Вершины чанка в локальных координатах не выходят за его границы
    let half_chunk = 32.0 / 4.0 * 0.5;
    for chunk in &chunks {
        assert!(!chunk.is_empty());
        assert_eq!(chunk.center, mesh.chunk_center(chunk.chunk_x, chunk.chunk_z));
        for v in &chunk.vertices {
            assert!(v.x.abs() <= half_chunk + EPSILON, "{:?} in chunk {:?}", v, (chunk.chunk_x, chunk.chunk_z));
            assert!(v.z.abs() <= half_chunk + EPSILON, "{:?} in chunk {:?}", v, (chunk.chunk_x, chunk.chunk_z));
        }
        assert!(chunk.indices.iter().all(|&i| (i as usize) < chunk.vertices.len()));
    }
}

#[test]
fn generation_is_deterministic() {
    let map = bump_heightmap();
    let settings = settings(32, 2, 4.0, 0.001);

    let first = TerrainMesh::generate(Some(&map), &settings).unwrap();
    let second = TerrainMesh::generate(Some(&map), &settings).unwrap();

    assert_eq!(first.vertices, second.vertices);
    assert_eq!(first.normals, second.normals);
    assert_eq!(first.indices, second.indices);
    assert_eq!(first.split_all_chunks(), second.split_all_chunks());
}

#[test]
fn out_of_range_chunk_is_an_error() {
    let mesh = TerrainMesh::generate(None, &settings(16, 2, 1.0, 0.01)).unwrap();

    assert!(matches!(
        mesh.split_chunk(2, 1),
        Err(TerrainError::ChunkOutOfRange { x: 2, z: 1, chunk_count: 2 })
    ));
    assert!(matches!(mesh.split_chunk(-1, 0), Err(TerrainError::ChunkOutOfRange { .. })));
}

#[test]
fn clamped_settings_always_generate() {
    let raw = TerrainSettings {
        size: [0.0, -5.0],
        resolution: 20,
        chunk_count: 100,
        amplitude: 1.0,
        simplify_threshold: -1.0,
    };
    assert!(TerrainMesh::generate(None, &raw).is_err());

    let clamped = raw.clamped();
    assert_eq!(clamped.resolution, 32);
    assert_eq!(clamped.chunk_count, 16);

    let mesh = TerrainMesh::generate(None, &clamped).unwrap();
    assert_eq!(mesh.chunk_count(), 16);
    assert_eq!(mesh.stats().merged_regions, 0);
}
