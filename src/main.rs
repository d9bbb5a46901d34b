use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use prismatic::output::{render_scene, save_image_as_png};
use prismatic::scene::{Scene, Selection};
use prismatic::spectrum::{visible_spectrum, BaseRay};
use prismatic::tracer::{Outcome, TracedRay, Tracer};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("Prismatic - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let scene = match &args.config {
        Some(path) => Scene::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => {
            info!("No scene file given, using the built-in two-prism bench");
            Scene::demo()
        }
    };
    info!(
        "Source at ({:.1}, {:.1}) aiming {:.1}°, {} prisms",
        scene.source.pos.x,
        scene.source.pos.y,
        scene.source.angle.to_degrees(),
        scene.prisms.len()
    );

    let selection = scene.resolve(args.select.0);
    if selection != args.select.0 {
        warn!("Selection {:?} does not name an object in the scene, ignoring it", args.select.0);
    }

    let base_rays = visible_spectrum(args.rays);
    let mut tracer = Tracer::new();
    tracer.max_bounces = args.max_bounces;
    info!(
        "Tracing {} wavelengths, up to {} surface crossings each",
        base_rays.len(),
        tracer.max_bounces
    );

    match args.sweep {
        Some(frames) => run_sweep(scene, &tracer, &base_rays, selection, &args, frames),
        None => {
            let rays = tracer.trace(&scene, &base_rays);
            log_summary(&rays);
            let image = render_scene(&scene, &rays, selection, args.width, args.height);
            save_image_as_png(&image, &args.output)
                .with_context(|| format!("writing {}", args.output.display()))
        }
    }
}

/// Render `frames` images, turning every prism through one full rotation.
///
/// Each frame is traced from scratch with the edited rotations.
fn run_sweep(
    mut scene: Scene,
    tracer: &Tracer,
    base_rays: &[BaseRay],
    selection: Selection,
    args: &Args,
    frames: u32,
) -> Result<()> {
    info!("Sweeping {} frames", frames);
    let start_rotations: Vec<f32> = scene.prisms.iter().map(|p| p.rotation).collect();

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}")?);

    for frame in 0..frames {
        let turn = TAU * frame as f32 / frames as f32;
        for (prism, start) in scene.prisms.iter_mut().zip(&start_rotations) {
            prism.rotation = (start + turn) % TAU;
        }

        let rays = tracer.trace(&scene, base_rays);
        let image = render_scene(&scene, &rays, selection, args.width, args.height);
        let path = frame_path(&args.output, frame);
        save_image_as_png(&image, &path).with_context(|| format!("writing {}", path.display()))?;
        pb.inc(1);
    }

    pb.finish();
    Ok(())
}

/// `out.png` → `out_0007.png`.
fn frame_path(output: &Path, frame: u32) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    output.with_file_name(format!("{stem}_{frame:04}.png"))
}

fn log_summary(rays: &[TracedRay]) {
    let escaped = rays.iter().filter(|r| r.outcome == Outcome::Escaped).count();
    let tir = rays
        .iter()
        .filter(|r| r.outcome == Outcome::TotalInternalReflection)
        .count();
    info!(
        "{} of {} rays escaped, {} stopped by total internal reflection, {} out of bounces",
        escaped,
        rays.len(),
        tir,
        rays.len() - escaped - tir
    );
}
