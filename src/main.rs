// src/main.rs
use anyhow::{Context, Result};
use log::info;

use laserclock::{
    config::{Config, DeviceKind},
    controllers::{DumpDevice, LaserDevice, OscController, OscDevice, Projector},
    services::SystemClock,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // config file first, then `-size 350` style flags on top
    let config = Config::from_env_args().context("Failed to load configuration")?;

    let device: Box<dyn LaserDevice> = match config.device.kind {
        DeviceKind::Osc => Box::new(OscDevice::new(
            &config.device.osc_host,
            config.device.osc_port,
        )),
        DeviceKind::Dump => Box::new(
            DumpDevice::new(&config.resolve_dump_dir(), config.output.frame_limit)
                .context("Failed to set up frame dump")?,
        ),
        DeviceKind::Preview => return run_preview(),
    };

    let mut projector = Projector::new(
        device,
        Box::new(SystemClock),
        config.render.clone(),
        &config.device,
    );

    if let Some(port) = config.osc.rx_port {
        let controller = OscController::new(port)
            .with_context(|| format!("Failed to listen for OSC on port {}", port))?;
        projector = projector.with_controller(controller);
    }

    let stats = projector.run_until(|_| true)?;
    info!(
        "Projected {} frames in {} transmissions",
        stats.frames_composed, stats.transmissions
    );
    Ok(())
}

#[cfg(feature = "preview")]
fn run_preview() -> Result<()> {
    laserclock::views::run_preview();
    Ok(())
}

#[cfg(not(feature = "preview"))]
fn run_preview() -> Result<()> {
    anyhow::bail!("this build has no preview window; rebuild with `--features preview`")
}
