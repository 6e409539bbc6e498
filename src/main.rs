// ============================================
// terrain-lod CLI
// ============================================
// RUST_LOG=debug terrain-lod generate --heightmap height.png --output terrain.bake

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use terrain_lod::{BakeFile, Heightmap, TerrainError, TerrainMesh, TerrainSettings};

#[derive(Parser)]
#[command(
    name = "terrain-lod",
    about = "Build simplified, chunked terrain meshes from heightmaps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a simplified terrain mesh and split it into chunks
    Generate {
        /// JSON file with terrain settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Heightmap image (red channel is used); analytic surface if omitted
        #[arg(long)]
        heightmap: Option<PathBuf>,
        /// Quads per side (rounded up to a power of two)
        #[arg(long)]
        resolution: Option<u32>,
        /// Chunks per side (rounded up to a power of two)
        #[arg(long)]
        chunks: Option<u32>,
        /// Vertical scale applied to sampled heights
        #[arg(long)]
        amplitude: Option<f32>,
        /// Flatness threshold below which regions are merged
        #[arg(long)]
        threshold: Option<f32>,
        /// Output .bake file path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print a summary of a .bake file
    Inspect {
        /// Input .bake file path
        input: PathBuf,
    },
}

struct GenerateArgs {
    config: Option<PathBuf>,
    heightmap: Option<PathBuf>,
    resolution: Option<u32>,
    chunks: Option<u32>,
    amplitude: Option<f32>,
    threshold: Option<f32>,
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate { config, heightmap, resolution, chunks, amplitude, threshold, output } => {
            generate(GenerateArgs { config, heightmap, resolution, chunks, amplitude, threshold, output })
        }
        Command::Inspect { input } => inspect(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn generate(args: GenerateArgs) -> Result<(), TerrainError> {
    let mut settings = match &args.config {
        Some(path) => TerrainSettings::load_from_file(path)?,
        None => TerrainSettings::default(),
    };

    // Аргументы командной строки перекрывают конфиг
    if let Some(resolution) = args.resolution {
        settings.resolution = resolution;
    }
    if let Some(chunks) = args.chunks {
        settings.chunk_count = chunks;
    }
    if let Some(amplitude) = args.amplitude {
        settings.amplitude = amplitude;
    }
    if let Some(threshold) = args.threshold {
        settings.simplify_threshold = threshold;
    }

    let clamped = settings.clamped();
    if clamped != settings {
        log::warn!("Settings adjusted to supported values: {:?}", clamped);
    }
    let settings = clamped;

    let heightmap = match &args.heightmap {
        Some(path) => {
            let map = Heightmap::load(path)?;
            log::info!("Loaded heightmap {:?} ({}x{})", path, map.width(), map.height());
            Some(map)
        }
        None => None,
    };

    let start = Instant::now();
    let mesh = TerrainMesh::generate(heightmap.as_ref(), &settings)?;
    let chunks = mesh.split_all_chunks();
    log::info!(
        "Generated {} chunks in {:.1} ms",
        chunks.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    for chunk in &chunks {
        log::info!(
            "  chunk ({}, {}): {} vertices, {} triangles, center {:?}",
            chunk.chunk_x,
            chunk.chunk_z,
            chunk.vertices.len(),
            chunk.triangle_count(),
            chunk.center
        );
    }

    if let Some(output) = &args.output {
        BakeFile::save(output, &settings, &chunks)?;
        log::info!("Saved {} chunks to {:?}", chunks.len(), output);
    }

    Ok(())
}

fn inspect(input: &Path) -> Result<(), TerrainError> {
    let bake = BakeFile::load(input)?;

    log::info!(
        "{:?}: format v{}, resolution {}, {}x{} chunks",
        input,
        bake.header.version,
        bake.header.resolution,
        bake.header.chunk_count,
        bake.header.chunk_count
    );
    log::info!("Settings: {:?}", bake.settings);
    log::info!(
        "Total: {} vertices, {} triangles",
        bake.vertex_count(),
        bake.triangle_count()
    );

    for chunk in &bake.chunks {
        log::info!(
            "  chunk ({}, {}): {} vertices, {} triangles",
            chunk.chunk_x,
            chunk.chunk_z,
            chunk.vertices.len(),
            chunk.triangle_count()
        );
    }

    Ok(())
}
