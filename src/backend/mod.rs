use anyhow::Result;

use crate::draw::Color;

pub mod wayland;

/// Startup options resolved from the CLI, applied on top of the config file.
#[derive(Debug, Default, Clone)]
pub struct OverlayOptions {
    /// Begin with click-through enabled (the overlay draws but does not
    /// intercept input until toggled back)
    pub click_through: bool,
    /// Pen color override
    pub color: Option<Color>,
    /// Stroke width override in pixels
    pub width: Option<f64>,
}

/// Run the Wayland backend with the full event loop.
pub fn run_wayland(options: OverlayOptions) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(options);
    backend.run()
}
