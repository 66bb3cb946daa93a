//! texpaint - headless host for the painting engine
//!
//! Replays a scripted stroke through the selected projection, saves the drawing
//! to a file-backed store, restores it into a fresh surface and exports a PNG.

mod config;
mod export;
mod logging;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, bail};
use texpaint_config::PaintConfig;
use texpaint_painting::{FileStore, RasterSurface, SurfaceCodec};
use tracing::info;

use config::HostOptions;

const STROKE_SAMPLES: usize = 96;

fn main() -> anyhow::Result<()> {
    let options = HostOptions::from_args(std::env::args().skip(1));
    let config = PaintConfig::load(&options.settings)
        .with_context(|| format!("failed to load {}", options.settings.display()))?;

    logging::init(config.debug);
    info!(
        "Starting texpaint with {:?} projection on a {}x{} surface",
        options.mode, config.width, config.height
    );

    let png = run(&options, &config)?;
    info!("Wrote {}", png.display());
    Ok(())
}

/// Paint, persist, restore, verify and export; returns the PNG path
fn run(options: &HostOptions, config: &PaintConfig) -> anyhow::Result<PathBuf> {
    let (mut pipeline, rig) = scene::build(options.mode, config)?;
    rig.replay(&mut pipeline, &scene::scripted_stroke(STROKE_SAMPLES));
    let painted = pipeline.into_surface();

    let store = FileStore::new(&options.out_dir)?;
    let mut codec = SurfaceCodec::with_key(store, config.storage_key.as_str());
    codec.save(&painted)?;

    let mut restored = RasterSurface::new(config.width, config.height)?;
    if !codec.restore(&mut restored) {
        bail!("saved drawing could not be restored from {}", options.out_dir.display());
    }
    verify_rgb(&painted, &restored)?;

    let png = options.out_dir.join("drawing.png");
    export::write_png(&restored, &png)?;
    Ok(png)
}

/// Persisted payloads carry RGB only; alpha is not compared
fn verify_rgb(expected: &RasterSurface, actual: &RasterSurface) -> anyhow::Result<()> {
    let (Some(expected), Some(actual)) = (expected.buffer(), actual.buffer()) else {
        bail!("surface has no pixel buffer");
    };
    if let Some(index) = expected
        .iter()
        .zip(actual)
        .position(|(a, b)| a.rgb() != b.rgb())
    {
        bail!("restored pixel {index} differs from the painted surface");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectionMode;
    use texpaint_painting::{KeyValueStore, Rgba8};

    fn options(out_dir: PathBuf, mode: ProjectionMode) -> HostOptions {
        HostOptions {
            settings: out_dir.join("missing.json"),
            out_dir,
            mode,
        }
    }

    #[test]
    fn test_run_writes_payload_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = PaintConfig::new(40, 30);
        let png = run(&options(dir.path().to_path_buf(), ProjectionMode::Canvas), &config).unwrap();

        assert!(png.exists());
        let store = FileStore::new(dir.path()).unwrap();
        let json = store.get("draw").unwrap().unwrap();
        assert!(json.starts_with("{\"Width\":40,\"Height\":30,\"Pixels\":["));
    }

    #[test]
    fn test_run_every_mode() {
        for mode in [ProjectionMode::Canvas, ProjectionMode::Mesh, ProjectionMode::Fingertip] {
            let dir = tempfile::tempdir().unwrap();
            let mut config = PaintConfig::new(32, 32);
            config.storage_key = "custom".to_string();
            run(&options(dir.path().to_path_buf(), mode), &config).unwrap();
            assert!(dir.path().join("custom.json").exists(), "{mode:?}");
        }
    }

    #[test]
    fn test_verify_rgb_ignores_alpha() {
        let mut a = RasterSurface::new(2, 2).unwrap();
        let mut b = RasterSurface::new(2, 2).unwrap();
        a.set_background(Rgba8::new(10, 20, 30, 0));
        b.set_background(Rgba8::new(10, 20, 30, 255));
        assert!(verify_rgb(&a, &b).is_ok());

        b.set_background(Rgba8::BLACK);
        assert!(verify_rgb(&a, &b).is_err());
    }
}
