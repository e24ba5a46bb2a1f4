use clap::{ArgAction, Parser};
use log::info;

mod backend;
mod config;
mod draw;
mod input;
mod ui;
mod util;

#[derive(Parser, Debug)]
#[command(name = "glassmarker")]
#[command(
    version,
    about = "Transparent screen annotation overlay for Wayland compositors"
)]
struct Cli {
    /// Start with click-through enabled (toggle back with F6 or SIGUSR1)
    #[arg(long, short = 't', action = ArgAction::SetTrue)]
    click_through: bool,

    /// Override the pen color (red, green, blue, yellow, orange, pink, white, black)
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,

    /// Override the stroke width in pixels (1-20)
    #[arg(long, value_name = "PX")]
    width: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Check for Wayland environment
    if std::env::var("WAYLAND_DISPLAY").is_err() {
        log::error!("WAYLAND_DISPLAY not set - glassmarker requires a Wayland session.");
        log::error!("Run under a wlr-layer-shell compositor (Hyprland, Sway, etc.).");
        return Err(anyhow::anyhow!("Wayland environment required"));
    }

    let color = cli
        .color
        .as_deref()
        .map(|name| {
            util::name_to_color(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown color '{name}'"))
        })
        .transpose()?;

    let width = cli.width.map(|w| {
        let clamped = w.clamp(1.0, 20.0);
        if clamped != w {
            log::warn!("Stroke width {w} out of range, clamped to {clamped}");
        }
        clamped
    });

    info!(
        "glassmarker {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GLASSMARKER_GIT_HASH")
    );
    info!("Controls:");
    info!("  - Draw: drag with the left mouse button");
    info!("  - Pen / eraser: A / S");
    info!("  - Clear everything: Z");
    info!("  - Stroke width: + / - or scroll");
    info!("  - Smoothing quality: Q (Shift+Q to lower)");
    info!("  - Click-through: F6 (or send SIGUSR1, e.g. pkill -SIGUSR1 glassmarker)");
    info!("  - Colors: R G B Y O P W K");
    info!("  - Exit: Escape");

    backend::run_wayland(backend::OverlayOptions {
        click_through: cli.click_through,
        color,
        width,
    })?;

    info!("Annotation overlay closed.");
    Ok(())
}
