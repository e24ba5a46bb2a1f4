// Holds the live Wayland protocol state shared by the backend loop and the
// handler submodules; provides rendering and click-through helpers.
use log::debug;
use smithay_client_toolkit::{
    compositor::{CompositorState, Region},
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{KeyboardInteractivity, LayerShell},
    },
    shm::Shm,
};
use wayland_client::QueueHandle;

use crate::{
    config::Config,
    draw,
    input::{GestureState, InputState, Tool},
    ui::Toolbar,
};

use super::surface::{OverlaySurface, RenderError};

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management
    pub(super) surface: OverlaySurface,

    // Configuration
    pub(super) config: Config,

    // Input state (the drawing pipeline)
    pub(super) input_state: InputState,

    // Toolbar (owns the pointer while dragging or pressed)
    pub(super) toolbar: Toolbar,

    // Click-through
    pub(super) click_through: bool,
    /// Set by the SIGUSR1 source; drained by the event loop
    pub(super) click_through_signal: bool,
    /// Keeps the empty input region alive while click-through is active
    input_region: Option<Region>,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        config: Config,
        input_state: InputState,
        toolbar: Toolbar,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: OverlaySurface::new(),
            config,
            input_state,
            toolbar,
            click_through: false,
            click_through_signal: false,
            input_region: None,
        }
    }

    /// Renders one frame: full history replay, then the live gesture
    /// preview, then the toolbar.
    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<(), RenderError> {
        let buffer_count = self.config.performance.buffer_count as usize;
        let width = self.surface.width();
        let height = self.surface.height();

        let (buffer, canvas) = self.surface.acquire_frame(&self.shm, buffer_count)?;

        // SAFETY: `canvas` is a mutable slice of exactly width * height * 4
        // bytes leased from the slot pool; the stride matches the
        // allocation, and both the Cairo surface and context are dropped
        // before the buffer is attached and committed, so Cairo never
        // touches the memory after the lease ends.
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )?
        };

        let ctx = cairo::Context::new(&cairo_surface)?;

        // Authoritative image: replay every committed action in commit
        // order. Smoothing runs inside the replay, never from a cache.
        draw::replay(&ctx, self.input_state.history.actions());

        // Optimistic preview of the gesture in progress: raw samples only,
        // drawn on top of the replay. The committed stroke is re-rendered
        // through the smoother on release.
        if self.input_state.gesture == GestureState::Active {
            let points = self.input_state.capture.points();
            match self.input_state.current_tool {
                Tool::Pen => draw::render::render_pen_preview(
                    &ctx,
                    points,
                    self.input_state.current_color,
                    self.input_state.current_width,
                ),
                Tool::Eraser => draw::render::render_eraser_preview(
                    &ctx,
                    points,
                    self.input_state.current_width,
                ),
            }
        }

        self.toolbar.render(&ctx, &self.input_state);

        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        let layer_surface = self
            .surface
            .layer_surface()
            .ok_or(RenderError::SurfaceMissing)?;
        let wl_surface = layer_surface.wl_surface();

        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);

        if self.config.performance.enable_vsync {
            wl_surface.frame(qh, wl_surface.clone());
        }

        wl_surface.commit();
        debug!(
            "Rendered frame ({} actions, gesture {:?})",
            self.input_state.history.len(),
            self.input_state.gesture
        );

        Ok(())
    }

    /// Toggles click-through mode.
    pub(super) fn toggle_click_through(&mut self) {
        self.set_click_through(!self.click_through);
    }

    /// Enables or disables click-through.
    ///
    /// Click-through is an empty input region plus released keyboard
    /// interactivity: the overlay keeps drawing its annotations but the
    /// compositor routes all input to the windows below. Because the surface
    /// then receives no keyboard events, the toggle back is driven by
    /// SIGUSR1 (bind a compositor hotkey to `pkill -SIGUSR1 glassmarker`).
    pub(super) fn set_click_through(&mut self, enabled: bool) {
        let Some(layer_surface) = self.surface.layer_surface() else {
            log::warn!("Cannot toggle click-through before the surface exists");
            return;
        };

        if enabled {
            match Region::new(&self.compositor_state) {
                Ok(region) => {
                    layer_surface
                        .wl_surface()
                        .set_input_region(Some(region.wl_region()));
                    // The region object must outlive the double-buffered
                    // state that references it.
                    self.input_region = Some(region);
                    layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
                }
                Err(err) => {
                    log::warn!("Click-through unavailable: {err}");
                    return;
                }
            }
        } else {
            layer_surface.wl_surface().set_input_region(None);
            self.input_region = None;
            layer_surface.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
        }

        layer_surface.wl_surface().commit();
        self.click_through = enabled;
        log::info!(
            "Click-through {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }
}
