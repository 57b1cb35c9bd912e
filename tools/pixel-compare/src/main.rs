// Pixel-perfect comparison CLI for rectangle-decomposed polylines.
//
// Usage:
//   pixel-compare render <scene> <width> <height> [--reference] [--seed N] -o <output.bmp>
//   pixel-compare compare <file_a> <file_b> [-d <diff.bmp>] [-s <sidebyside.bmp>]
//   pixel-compare verify <scene> <width> <height> [--seed N] [--max-rectangles N]
//   pixel-compare list

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use pixel_compare::render::{self, DrawPath, BACKGROUND};
use pixel_compare::{compare_buffers, generate_diff_image, generate_sidebyside, load_bmp, save_bmp};
use polyline_rects::poly_lines::PolyLineOptions;

#[derive(Parser, Debug)]
#[command(about = "Pixel-perfect comparison of rectangle-decomposed polylines")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene to a BMP file.
    Render {
        scene: String,
        width: u32,
        height: u32,
        /// Draw with the per-pixel reference rasterizer instead of rectangles.
        #[arg(long)]
        reference: bool,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare two BMP files pixel by pixel.
    Compare {
        file_a: PathBuf,
        file_b: PathBuf,
        /// Write a diff image here.
        #[arg(short)]
        diff: Option<PathBuf>,
        /// Write an [A | diff | B] image here.
        #[arg(short)]
        sidebyside: Option<PathBuf>,
    },
    /// Render a scene both ways and compare.
    Verify {
        scene: String,
        width: u32,
        height: u32,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Cap the rectangles per polyline, forcing fallbacks past it.
        #[arg(long)]
        max_rectangles: Option<usize>,
        #[arg(short)]
        diff: Option<PathBuf>,
    },
    /// List available scene names.
    List,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let identical = match run(args.command) {
        Ok(identical) => identical,
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(2);
        }
    };
    if !identical {
        process::exit(1);
    }
}

/// Returns false when a comparison found differences.
fn run(command: Command) -> Result<bool> {
    match command {
        Command::List => {
            println!("Available scenes:");
            for name in render::available_scenes() {
                println!("  {}", name);
            }
            Ok(true)
        }
        Command::Render {
            scene,
            width,
            height,
            reference,
            seed,
            output,
        } => {
            let path = if reference {
                DrawPath::Reference
            } else {
                DrawPath::Rectangles
            };
            let output = output
                .unwrap_or_else(|| PathBuf::from(format!("{scene}_{width}x{height}.bmp")));
            println!("Rendering '{scene}' at {width}x{height} ({path:?})...");

            let options = PolyLineOptions::default();
            let (buf, stats) = render_named(&scene, width, height, seed, path, options)?;
            if path == DrawPath::Rectangles {
                println!(
                    "  {} polylines, {} rectangles, {} fallbacks",
                    stats.polylines, stats.rectangles, stats.fallbacks
                );
            }
            save(&output, &buf)?;
            Ok(true)
        }
        Command::Compare {
            file_a,
            file_b,
            diff,
            sidebyside,
        } => {
            let a = load_bmp(&file_a).with_context(|| format!("loading {}", file_a.display()))?;
            let b = load_bmp(&file_b).with_context(|| format!("loading {}", file_b.display()))?;
            if (a.width, a.height) != (b.width, b.height) {
                return Err(anyhow!(
                    "size mismatch: {}x{} vs {}x{}",
                    a.width,
                    a.height,
                    b.width,
                    b.height
                ));
            }
            let bg = BACKGROUND.to_array();
            let result = compare_buffers(&a, &b, bg);
            println!("{}", result);

            if let Some(dp) = diff {
                save(&dp, &generate_diff_image(&a, &b, bg))?;
            }
            if let Some(sp) = sidebyside {
                save(&sp, &generate_sidebyside(&a, &b, bg))?;
            }
            Ok(result.identical)
        }
        Command::Verify {
            scene,
            width,
            height,
            seed,
            max_rectangles,
            diff,
        } => {
            let mut options = PolyLineOptions::default();
            if let Some(limit) = max_rectangles {
                options = options.with_max_rectangles(limit);
            }

            println!("Rendering '{}' with rectangles...", scene);
            let (fast, stats) =
                render_named(&scene, width, height, seed, DrawPath::Rectangles, options)?;
            println!(
                "  {} polylines, {} rectangles, {} fallbacks",
                stats.polylines, stats.rectangles, stats.fallbacks
            );
            println!("Rendering '{}' per pixel...", scene);
            let (slow, _) =
                render_named(&scene, width, height, seed, DrawPath::Reference, options)?;

            let bg = BACKGROUND.to_array();
            let result = compare_buffers(&fast, &slow, bg);
            println!("\n{}", result);

            if let Some(dp) = diff {
                save(&dp, &generate_diff_image(&fast, &slow, bg))?;
            }
            if !result.identical {
                let sbs_path = format!("{}_sidebyside_{}x{}.bmp", scene, width, height);
                save(Path::new(&sbs_path), &generate_sidebyside(&fast, &slow, bg))?;
                return Ok(false);
            }
            println!("\nPIXEL-PERFECT MATCH!");
            Ok(true)
        }
    }
}

fn render_named(
    scene: &str,
    width: u32,
    height: u32,
    seed: u64,
    path: DrawPath,
    options: PolyLineOptions,
) -> Result<(pixel_compare::PixelBuffer, render::RenderStats)> {
    render::render_scene(scene, width, height, seed, path, options)
        .ok_or_else(|| anyhow!("unknown scene '{scene}', use 'list' to see available scenes"))
}

fn save(path: &Path, buf: &pixel_compare::PixelBuffer) -> Result<()> {
    save_bmp(path, buf).with_context(|| format!("saving {}", path.display()))?;
    println!("Saved: {}", path.display());
    Ok(())
}
