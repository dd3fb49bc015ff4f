mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use lux_renderer::{render_with_progress, CancelToken, SceneDescription};
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lux");

    let mut description = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => SceneDescription::reference(),
    };
    args.apply(&mut description.render);

    let start = Instant::now();
    let (camera, scene) = description.build().context("Invalid scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    // Ctrl-C stops after the current pass; the partial image is still saved
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).context("Failed to install Ctrl-C handler")?;
    }

    let passes = description.render.passes;
    let rendered = render_with_progress(&camera, &scene, &description.render, &cancel, |done| {
        log::info!("Pass {}/{} done", done, passes);
    })?;
    let mut image = rendered.image;
    image.gamma_correct(description.render.gamma);

    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
