// Coordinates backend startup/shutdown and drives the calloop event loop
// while delegating rendering & protocol state to `WaylandState` and its
// handler modules.
use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    reexports::{
        calloop::{
            EventLoop,
            signals::{Signal, Signals},
        },
        calloop_wayland_source::WaylandSource,
    },
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell},
    },
    shm::Shm,
};
use std::time::{Duration, Instant};
use wayland_client::{Connection, globals::registry_queue_init};

use super::state::WaylandState;
use crate::backend::OverlayOptions;
use crate::config::Config;
use crate::input::InputState;
use crate::ui::Toolbar;

/// Give up after this many back-to-back failed frames.
const MAX_RENDER_FAILURES: u32 = 10;

/// Wayland backend: owns startup options and runs the event loop.
pub struct WaylandBackend {
    options: OverlayOptions,
}

impl WaylandBackend {
    pub fn new(options: OverlayOptions) -> Self {
        Self { options }
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");

        // Connect to the Wayland compositor
        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        // Initialize registry and event queue
        let (globals, event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        // Bind global interfaces
        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        debug!("Bound compositor");

        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        debug!("Bound layer shell");

        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        debug!("Bound shared memory");

        let output_state = OutputState::new(&globals, &qh);
        let seat_state = SeatState::new(&globals, &qh);
        let registry_state = RegistryState::new(&globals);

        // Load configuration
        let config = match Config::load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        };
        info!("Configuration loaded");
        debug!("  Color: {:?}", config.drawing.default_color);
        debug!("  Width: {:.1}px", config.drawing.default_width);
        debug!("  Quality: {:.1}", config.drawing.default_quality);
        debug!("  Buffer count: {}", config.performance.buffer_count);
        debug!("  VSync: {}", config.performance.enable_vsync);

        // Build keybinding command map
        let command_map = config
            .keybindings
            .build_command_map()
            .context("Invalid keybindings in config")?;

        // CLI overrides take precedence over config defaults
        let color = self
            .options
            .color
            .unwrap_or_else(|| config.drawing.default_color.to_color());
        let width = self.options.width.unwrap_or(config.drawing.default_width);

        let input_state =
            InputState::with_defaults(color, width, config.drawing.default_quality, command_map);

        let toolbar = Toolbar::new(
            config.ui.toolbar_x,
            config.ui.toolbar_y,
            config.ui.toolbar_collapsed,
            config.ui.show_toolbar,
        );

        // Create application state
        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            config,
            input_state,
            toolbar,
        );

        // Create the fullscreen overlay surface. Anchoring to all edges with
        // size (0, 0) makes the compositor size and place it to cover the
        // current monitor.
        info!("Creating layer shell surface");
        let wl_surface = state.compositor_state.create_surface(&qh);
        let layer_surface = state.layer_shell.create_layer_surface(
            &qh,
            wl_surface,
            Layer::Overlay,
            Some("glassmarker"),
            None, // Default output
        );

        layer_surface.set_anchor(Anchor::all());
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
        layer_surface.set_size(0, 0);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.commit();

        state.surface.set_layer_surface(layer_surface);
        info!("Layer shell surface created");

        if self.options.click_through {
            state.set_click_through(true);
        }

        // Event loop: the Wayland queue plus a SIGUSR1 source. The signal is
        // the way back from click-through mode, where the surface itself
        // receives no input at all.
        let mut event_loop: EventLoop<WaylandState> =
            EventLoop::try_new().context("Failed to create event loop")?;

        WaylandSource::new(conn.clone(), event_queue)
            .insert(event_loop.handle())
            .map_err(|e| anyhow::anyhow!("Failed to insert Wayland source: {e}"))?;

        let signals = Signals::new(&[Signal::SIGUSR1])
            .context("Failed to register SIGUSR1 handler")?;
        event_loop
            .handle()
            .insert_source(signals, |event, _, state: &mut WaylandState| {
                info!("Received {:?} - toggling click-through", event.signal());
                state.click_through_signal = true;
            })
            .map_err(|e| anyhow::anyhow!("Failed to insert signal source: {e}"))?;

        let mut consecutive_render_failures = 0u32;

        loop {
            if state.input_state.should_exit {
                info!("Exit requested, breaking event loop");
                break;
            }

            // Block until events arrive, except while the toolbar animation
            // needs steady frames.
            let timeout = if state.toolbar.is_animating() {
                Some(Duration::from_millis(16))
            } else {
                None
            };

            event_loop
                .dispatch(timeout, &mut state)
                .context("Wayland event loop error")?;

            if state.input_state.should_exit {
                info!("Exit requested after dispatch, breaking event loop");
                break;
            }

            // Click-through toggles arrive from two directions: the F6
            // binding (while we still have the keyboard) and SIGUSR1.
            let signal_toggle = std::mem::take(&mut state.click_through_signal);
            if signal_toggle || state.input_state.take_click_through_request() {
                state.toggle_click_through();
            }

            if state.toolbar.tick(Instant::now()) {
                state.input_state.needs_redraw = true;
            }

            // Render when something changed, throttled by frame callbacks
            // when vsync is enabled.
            let can_render = state.surface.is_configured()
                && state.surface.width() > 0
                && state.surface.height() > 0
                && state.input_state.needs_redraw
                && (!state.surface.frame_callback_pending()
                    || !state.config.performance.enable_vsync);

            if can_render {
                match state.render(&qh) {
                    Ok(()) => {
                        consecutive_render_failures = 0;
                        state.input_state.needs_redraw = false;
                        if state.config.performance.enable_vsync {
                            state.surface.set_frame_callback_pending(true);
                        }
                    }
                    Err(e) => {
                        consecutive_render_failures += 1;
                        warn!(
                            "Rendering error (attempt {}/{}): {}",
                            consecutive_render_failures, MAX_RENDER_FAILURES, e
                        );

                        if consecutive_render_failures >= MAX_RENDER_FAILURES {
                            return Err(anyhow::anyhow!(
                                "Too many consecutive render failures ({}), exiting: {}",
                                consecutive_render_failures,
                                e
                            ));
                        }

                        // Clear the flag to avoid an error-render loop; the
                        // next input event will request a fresh frame.
                        state.input_state.needs_redraw = false;
                    }
                }
            }
        }

        info!("Wayland backend exiting");
        Ok(())
    }
}
