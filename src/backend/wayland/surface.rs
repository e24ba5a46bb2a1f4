//! Layer-surface bookkeeping and shared-memory frame acquisition.

use log::info;
use smithay_client_toolkit::{
    shell::wlr_layer::LayerSurface,
    shm::{
        Shm,
        slot::{Buffer, SlotPool},
    },
};
use thiserror::Error;
use wayland_client::protocol::wl_shm;

/// Errors on the render path. Every variant degrades to a skipped frame -
/// the event loop logs it and tries again on the next redraw request.
#[derive(Debug, Error)]
pub(super) enum RenderError {
    /// The compositor has not given the surface a size yet.
    #[error("surface not configured by the compositor")]
    NotConfigured,
    /// The layer surface was never created (startup failed part-way).
    #[error("layer surface not created")]
    SurfaceMissing,
    /// A shared-memory buffer could not be created or leased.
    #[error("shm buffer unavailable: {0}")]
    BufferUnavailable(String),
    /// Cairo could not wrap the buffer as a rendering target.
    #[error("rendering target unavailable: {0}")]
    TargetUnavailable(#[from] cairo::Error),
}

/// Tracks the layer surface, its buffer pool, and configure/frame state.
///
/// The pool is (re)created lazily: a resize invalidates it and the next
/// [`acquire_frame`] builds a fresh one at the new dimensions.
///
/// [`acquire_frame`]: OverlaySurface::acquire_frame
pub(super) struct OverlaySurface {
    layer_surface: Option<LayerSurface>,
    pool: Option<SlotPool>,
    width: u32,
    height: u32,
    configured: bool,
    frame_callback_pending: bool,
}

impl OverlaySurface {
    /// Creates a new, unconfigured surface state.
    pub(super) fn new() -> Self {
        Self {
            layer_surface: None,
            pool: None,
            width: 0,
            height: 0,
            configured: false,
            frame_callback_pending: false,
        }
    }

    /// Assigns the layer surface produced during startup.
    pub(super) fn set_layer_surface(&mut self, surface: LayerSurface) {
        self.layer_surface = Some(surface);
    }

    /// Returns the current layer surface, if initialized.
    pub(super) fn layer_surface(&self) -> Option<&LayerSurface> {
        self.layer_surface.as_ref()
    }

    /// Updates the surface dimensions, returning `true` if the size changed.
    ///
    /// A size change invalidates the existing buffer pool.
    pub(super) fn update_dimensions(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        if changed {
            self.pool = None;
        }
        changed
    }

    /// Current surface width in pixels.
    pub(super) fn width(&self) -> u32 {
        self.width
    }

    /// Current surface height in pixels.
    pub(super) fn height(&self) -> u32 {
        self.height
    }

    /// Marks the surface as configured by the compositor.
    pub(super) fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    /// Returns whether the surface has completed its initial configure.
    pub(super) fn is_configured(&self) -> bool {
        self.configured
    }

    /// Sets the frame callback pending flag.
    pub(super) fn set_frame_callback_pending(&mut self, pending: bool) {
        self.frame_callback_pending = pending;
    }

    /// Returns whether a frame callback is currently outstanding.
    pub(super) fn frame_callback_pending(&self) -> bool {
        self.frame_callback_pending
    }

    /// Leases one shm buffer for the next frame, creating the pool first if
    /// needed. Returns the buffer handle and its writable pixel memory.
    pub(super) fn acquire_frame(
        &mut self,
        shm: &Shm,
        buffer_count: usize,
    ) -> Result<(Buffer, &mut [u8]), RenderError> {
        if !self.configured || self.width == 0 || self.height == 0 {
            return Err(RenderError::NotConfigured);
        }

        if self.pool.is_none() {
            let frame_bytes = (self.width * self.height * 4) as usize;
            let pool_size = frame_bytes * buffer_count;
            info!(
                "Creating shm pool ({}x{}, {} bytes, {} buffers)",
                self.width, self.height, pool_size, buffer_count
            );
            let pool = SlotPool::new(pool_size, shm)
                .map_err(|e| RenderError::BufferUnavailable(e.to_string()))?;
            self.pool = Some(pool);
        }

        let pool = self
            .pool
            .as_mut()
            .ok_or_else(|| RenderError::BufferUnavailable("pool missing".into()))?;

        pool.create_buffer(
            self.width as i32,
            self.height as i32,
            (self.width * 4) as i32,
            wl_shm::Format::Argb8888,
        )
        .map_err(|e| RenderError::BufferUnavailable(e.to_string()))
    }
}
