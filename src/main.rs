use std::path::PathBuf;

use clap::Parser;

use dome_generator::config::{load_model_defs, MapConfig, ModelDef};
use dome_generator::error::GeneratorError;
use dome_generator::generator::generate_map;
use dome_generator::preview::export_preview;

#[derive(Parser, Debug)]
#[command(name = "dome_generator")]
#[command(about = "Generate a domed voxel arena map from parametric noise fields")]
struct Args {
    /// World disk radius in columns
    #[arg(short, long, default_value = "50")]
    radius: i32,

    /// Minimum terrain height
    #[arg(long, default_value = "1")]
    min_height: i32,

    /// Maximum terrain height
    #[arg(long, default_value = "8")]
    max_height: i32,

    /// Fine elevation noise scale (lower = broader features)
    #[arg(long, default_value = "0.05")]
    micro_scale: f64,

    /// Fine elevation octave count
    #[arg(long, default_value = "4")]
    micro_octaves: u32,

    /// Broad elevation noise scale
    #[arg(long, default_value = "0.012")]
    macro_scale: f64,

    /// Broad elevation octave count
    #[arg(long, default_value = "2")]
    macro_octaves: u32,

    /// Weight of the broad field added to the fine field
    #[arg(long, default_value = "0.6")]
    macro_influence: f64,

    /// Amplitude decay per octave
    #[arg(long, default_value = "0.5")]
    persistence: f64,

    /// Frequency multiplier per octave
    #[arg(long, default_value = "2.0")]
    lacunarity: f64,

    /// Columns below this height flood up to it
    #[arg(long, default_value = "2")]
    water_threshold: i32,

    /// Dome apex height above the terrain ceiling
    #[arg(long, default_value = "50")]
    dome_height: i32,

    /// Rows of boundary wall above each rim column
    #[arg(long, default_value = "4")]
    wall_height: i32,

    /// Clearance rows between the wall top and the lowest panel voxel
    #[arg(long, default_value = "12")]
    skip_rows: i32,

    /// Minimum ceiling panel count
    #[arg(long, default_value = "20")]
    min_panels: u32,

    /// Maximum ceiling panel count
    #[arg(long, default_value = "25")]
    max_panels: u32,

    /// Minimum panel footprint radius
    #[arg(long, default_value = "8")]
    min_panel_size: i32,

    /// Maximum panel footprint radius
    #[arg(long, default_value = "12")]
    max_panel_size: i32,

    /// Surface patch noise scale (vegetated vs bare top layer)
    #[arg(long, default_value = "0.1")]
    patch_scale: f64,

    /// Base probability of placing an entity on an eligible cell
    #[arg(long, default_value = "0.02")]
    placement_density: f64,

    /// Clustering noise scale for entity placement
    #[arg(long, default_value = "0.08")]
    clustering_scale: f64,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with candidate model definitions for entity scattering
    #[arg(long)]
    models: Option<PathBuf>,

    /// Output path for the map artifact
    #[arg(short, long, default_value = "dome_map.json")]
    output: PathBuf,

    /// Optional top-down PNG preview of the generated terrain
    #[arg(long)]
    preview: Option<PathBuf>,
}

impl Args {
    fn to_config(&self) -> MapConfig {
        MapConfig {
            radius: self.radius,
            min_height: self.min_height,
            max_height: self.max_height,
            micro_scale: self.micro_scale,
            micro_octaves: self.micro_octaves,
            macro_scale: self.macro_scale,
            macro_octaves: self.macro_octaves,
            macro_influence: self.macro_influence,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            water_threshold: self.water_threshold,
            dome_height: self.dome_height,
            wall_height: self.wall_height,
            skip_rows: self.skip_rows,
            min_panels: self.min_panels,
            max_panels: self.max_panels,
            min_panel_size: self.min_panel_size,
            max_panel_size: self.max_panel_size,
            patch_scale: self.patch_scale,
            placement_density: self.placement_density,
            clustering_scale: self.clustering_scale,
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("map generation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), GeneratorError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = args.to_config();

    let models: Vec<ModelDef> = match &args.models {
        Some(path) => load_model_defs(path)?,
        None => Vec::new(),
    };

    println!("Generating domed map with seed: {}", seed);
    println!(
        "World disk: radius {}, heights {}..{}, water below {}",
        config.radius, config.min_height, config.max_height, config.water_threshold
    );
    println!(
        "Dome: height {}, {}-{} panels of radius {}-{}",
        config.dome_height,
        config.min_panels,
        config.max_panels,
        config.min_panel_size,
        config.max_panel_size
    );
    if models.is_empty() {
        println!("No model definitions supplied; skipping entity scattering");
    } else {
        println!("Loaded {} model definitions", models.len());
    }

    let map = generate_map(&config, &models, seed)?;

    let land = map
        .heights
        .iter()
        .filter(|&(_, h)| h >= config.water_threshold)
        .count();
    println!(
        "Terrain: {} columns ({:.1}% land)",
        map.heights.len(),
        100.0 * land as f64 / map.heights.len() as f64
    );
    println!(
        "Map contains {} blocks and {} entities",
        map.artifact.blocks.len(),
        map.artifact.entities.len()
    );

    map.artifact.save(&args.output)?;
    println!("Saved map to: {}", args.output.display());

    if let Some(preview_path) = &args.preview {
        match export_preview(&map.heights, &config, &preview_path.display().to_string()) {
            Ok(()) => println!("Saved preview to: {}", preview_path.display()),
            Err(e) => eprintln!("Failed to export preview: {}", e),
        }
    }

    Ok(())
}
