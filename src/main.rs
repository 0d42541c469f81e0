//! Headless driver: builds every configured model from the procedural mesh
//! library, writes the packed textures to disk and sweeps the scroll range
//! to log the uniforms a particle shader would receive.
//!
//! Usage: `pointmorph [options.toml] [output-dir]`

use std::fs;
use std::path::{Path, PathBuf};

use pointmorph::animation::AnimationController;
use pointmorph::camera::Camera;
use pointmorph::error::MorphError;
use pointmorph::geometry::MeshLibrary;
use pointmorph::options::Options;
use pointmorph::pipeline::{JoinStatus, MorphSet, ParticleSystem};
use pointmorph::util::frame_timing::FrameClock;
use serde::Serialize;
use web_time::{Duration, Instant};

const DEFAULT_OUTPUT_DIR: &str = "pointmorph-out";
const VIEWPORT: (f32, f32) = (1280.0, 720.0);
const DOCUMENT_HEIGHT: f32 = 5.0 * VIEWPORT.1;
const SWEEP_FRAMES: u32 = 240;
const FRAME_RATE: u32 = 60;

#[derive(Serialize)]
struct Manifest<'a> {
    side: u32,
    particle_count: usize,
    models: Vec<ManifestEntry<'a>>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    name: &'a str,
    sample_count: usize,
    fallback_count: usize,
    positions: String,
    colors: String,
}

fn load_options(path: Option<&Path>) -> Result<Options, MorphError> {
    path.map_or_else(
        || Ok(Options::default()),
        |path| {
            log::info!("loading options from {}", path.display());
            Options::load(path)
        },
    )
}

fn export(system: &ParticleSystem<'_>, dir: &Path) -> Result<(), MorphError> {
    fs::create_dir_all(dir)?;

    let mut entries = Vec::with_capacity(system.model_count());
    for (name, packed) in system.models() {
        let positions = format!("{name}_positions.f32");
        let colors = format!("{name}_colors.f32");
        fs::write(dir.join(&positions), packed.positions.as_bytes())?;
        fs::write(dir.join(&colors), packed.colors.as_bytes())?;
        entries.push(ManifestEntry {
            name,
            sample_count: packed.sample_count,
            fallback_count: packed.fallback_count,
            positions,
            colors,
        });
    }

    let manifest = Manifest {
        side: system.side(),
        particle_count: system.particle_count(),
        models: entries,
    };
    let json = serde_json::to_string_pretty(&manifest)
        .map_err(std::io::Error::from)?;
    fs::write(dir.join("manifest.json"), json)?;
    log::info!(
        "wrote {} texture pairs ({side}x{side}) to {}",
        system.model_count(),
        dir.display(),
        side = system.side()
    );
    Ok(())
}

/// Scroll from top to bottom with a simulated 60 fps clock, the pointer
/// parked at the viewport center.
fn sweep(options: &Options, model_count: usize) {
    let mut controller =
        AnimationController::new(model_count, &options.animation);
    let camera =
        Camera::from_options(&options.camera, VIEWPORT.0 / VIEWPORT.1);
    controller.set_mouse(camera.pointer_to_world(
        VIEWPORT.0 * 0.5,
        VIEWPORT.1 * 0.5,
        VIEWPORT.0,
        VIEWPORT.1,
    ));

    let start = Instant::now();
    let frame = Duration::from_secs(1) / FRAME_RATE;
    let mut clock = FrameClock::starting_at(
        start,
        FRAME_RATE,
        options.animation.max_frame_delta,
    );
    let scroll_range = DOCUMENT_HEIGHT - VIEWPORT.1;

    for i in 1..=SWEEP_FRAMES {
        let scroll_y = scroll_range * i as f32 / SWEEP_FRAMES as f32;
        controller.set_scroll(scroll_y, DOCUMENT_HEIGHT, VIEWPORT.1);
        let dt = clock.tick_at(start + frame * i);
        let _ = controller.update(dt);

        if i % FRAME_RATE == 0 || i == SWEEP_FRAMES {
            let pair = controller.pair();
            let uniforms = controller.uniforms();
            log::info!(
                "scroll {scroll_y:>6.0}px: models {}->{} blend {:.3} \
                 (transition {:.3}, time {:.2}s)",
                pair.from,
                pair.to,
                pair.blend,
                uniforms.transition,
                uniforms.time
            );
        }
    }
    log::debug!("sweep clock settled at {:.1} fps", clock.fps());
}

fn run() -> Result<(), MorphError> {
    let mut args = std::env::args_os().skip(1);
    let options_path = args.next().map(PathBuf::from);
    let out_dir = args
        .next()
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    let options = load_options(options_path.as_deref())?;
    let mut set = MorphSet::new(&options)?;
    let library = MeshLibrary::with_primitives();

    if let JoinStatus::Waiting { completed, total } = set.load_all(&library) {
        log::warn!("only {completed}/{total} models reported in");
    }
    let system = set.particle_system()?;
    export(&system, &out_dir)?;
    sweep(&options, system.model_count());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
