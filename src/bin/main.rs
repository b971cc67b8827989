//! imgpacker CLI
//!
//! Build texture atlases from images and inspect atlas files.

use clap::{Parser, Subcommand, ValueEnum};
use imgpacker::{export_manifest, Atlas, AtlasBuilder, AtlasConfig, AtlasManifest, ShelfPacker, SkylinePacker};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "imgpacker")]
#[command(author, version, about = "Pack images into a texture atlas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an atlas from image files
    Build {
        /// Source images
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output atlas file
        #[arg(short, long, default_value = "texture_atlas.bin")]
        output: PathBuf,

        /// JSON config file (initial_size, padding, max_size)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Initial atlas size
        #[arg(long)]
        size: Option<u32>,

        /// Padding around each image
        #[arg(long)]
        padding: Option<u32>,

        /// Maximum atlas size
        #[arg(long)]
        max_size: Option<u32>,

        /// Packing algorithm
        #[arg(long, value_enum, default_value = "skyline")]
        packer: PackerKind,

        /// Also write the atlas as PNG
        #[arg(long)]
        png: Option<PathBuf>,

        /// Also write a JSON manifest of the regions
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Add the files to an existing output atlas instead of replacing it
        #[arg(long)]
        append: bool,
    },

    /// Show information about an atlas file
    Info {
        /// Atlas file
        #[arg(short, long)]
        input: PathBuf,

        /// Print the manifest as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export an atlas file as PNG
    Png {
        /// Atlas file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "output_atlas.png")]
        output: PathBuf,
    },

    /// Look up one region by name
    Region {
        /// Atlas file
        #[arg(short, long)]
        input: PathBuf,

        /// Region name (the source path used at build time)
        name: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PackerKind {
    /// Skyline bottom-left
    Skyline,
    /// Rows, tallest first
    Shelf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            files,
            output,
            config,
            size,
            padding,
            max_size,
            packer,
            png,
            manifest,
            append,
        } => {
            let mut config = match config {
                Some(path) => AtlasConfig::from_json_file(path)?,
                None => AtlasConfig::default(),
            };
            if let Some(size) = size {
                config.initial_size = size;
            }
            if let Some(padding) = padding {
                config.padding = padding;
            }
            if let Some(max_size) = max_size {
                config.max_size = max_size;
            }

            let atlas = build_atlas(&files, &output, config, packer, append)?;

            if let Some(png_path) = png {
                atlas.export_png(&png_path)?;
                println!("  PNG: {:?}", png_path);
            }
            if let Some(manifest_path) = manifest {
                export_manifest(&atlas, &manifest_path)?;
                println!("  Manifest: {:?}", manifest_path);
            }
        }
        Commands::Info { input, json } => {
            show_atlas_info(&input, json)?;
        }
        Commands::Png { input, output } => {
            println!("Loading atlas from {:?}...", input);
            let atlas = Atlas::open_existing(&input)?;
            atlas.export_png(&output)?;
            println!("Exported {}x{} PNG to {:?}", atlas.size(), atlas.size(), output);
        }
        Commands::Region { input, name } => {
            let atlas = Atlas::open_existing(&input)?;
            let region = atlas.region_for(&name)?;
            println!(
                "{}: x={} y={} width={} height={}",
                name, region.x, region.y, region.width, region.height
            );
        }
    }

    Ok(())
}

fn build_atlas(
    files: &[PathBuf],
    output: &Path,
    config: AtlasConfig,
    packer: PackerKind,
    append: bool,
) -> Result<Atlas, Box<dyn std::error::Error>> {
    println!("Building atlas from {} images...", files.len());
    println!("  - Packer: {:?}", packer);
    println!("  - Padding: {}", config.padding);

    let atlas = if append && output.exists() {
        println!("Appending to existing atlas {:?}...", output);
        let mut atlas = Atlas::open_existing(output)?;
        let config = config.with_initial_size(atlas.size());
        atlas.append_with(&make_builder(config, packer), files)?;
        atlas
    } else {
        println!("  - Initial size: {}", config.initial_size);
        let mut atlas = Atlas::from_config(&config);
        atlas.build_with(&make_builder(config, packer), files)?;
        atlas
    };

    println!(
        "  Atlas: {}x{} with {} regions",
        atlas.size(),
        atlas.size(),
        atlas.regions().len()
    );

    atlas.export_binary(output)?;
    println!("Exported atlas to {:?}", output);

    Ok(atlas)
}

fn make_builder(config: AtlasConfig, packer: PackerKind) -> AtlasBuilder {
    let builder = AtlasBuilder::from_config(config);
    match packer {
        PackerKind::Skyline => builder.with_packer(SkylinePacker),
        PackerKind::Shelf => builder.with_packer(ShelfPacker),
    }
}

fn show_atlas_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let atlas = Atlas::open_existing(input)?;

    if json {
        println!("{}", AtlasManifest::from_atlas(&atlas).to_json()?);
        return Ok(());
    }

    println!("\nAtlas Info:");
    println!("  Size: {}x{}", atlas.size(), atlas.size());
    println!("  Regions: {}", atlas.regions().len());
    for (name, region) in atlas.regions() {
        println!(
            "    {} -> ({}, {}) {}x{}",
            name, region.x, region.y, region.width, region.height
        );
    }

    Ok(())
}
