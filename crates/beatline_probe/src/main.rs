// SPDX-License-Identifier: MIT OR Apache-2.0
//! Beatline probe - headless playback of a scene file.
//!
//! Loads a RON scene, builds its tempo timeline, and steps playback frame
//! by frame, logging tempo changes, slider durations and sprite values.
//!
//! ```text
//! beatline_probe path/to/scene.ron
//! RUST_LOG=beatline_probe=debug beatline_probe path/to/scene.ron
//! ```

mod playback;
mod scene;

use playback::Playback;
use scene::Scene;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beatline_probe=info,beatline_timing=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        tracing::error!("Usage: beatline_probe <scene.ron>");
        return ExitCode::FAILURE;
    };

    tracing::info!("Starting Beatline probe v{}", env!("CARGO_PKG_VERSION"));

    let scene = match Scene::load(&path) {
        Ok(scene) => scene,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "Loaded {:?}: {} timing points, {} sprites, {} transformations",
        path,
        scene.timing_points.len(),
        scene.sprites.len(),
        scene.transformation_count()
    );

    let playback = Playback::new(&scene);
    tracing::debug!(
        "Timeline ready at {}ms: {} points, anchor tempo {}",
        playback.time_ms(),
        playback.timings().len(),
        playback.timings().anchor_bpm()
    );

    let report = playback.run();
    tracing::info!(
        "Done: {} frames, {} tempo changes, {} sliders, final tempo {}",
        report.frames,
        report.tempo_changes,
        report.sliders_measured,
        report.final_bpm
    );
    ExitCode::SUCCESS
}
