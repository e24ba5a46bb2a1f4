//! Drawing pipeline: colors, stroke smoothing, committed actions, and the
//! replay compositor (Cairo-based).
//!
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`catmullrom_spline`]: raw pointer samples -> dense smooth curve
//! - [`Action`] / [`ActionHistory`]: committed gestures in an append-only log
//! - [`render`]: full-history replay and live gesture previews

pub mod action;
pub mod color;
pub mod render;
pub mod spline;

// Re-export commonly used types at module level
pub use action::{Action, ActionHistory};
pub use color::Color;
pub use render::{BlendMode, clear_surface, render_action, replay};
pub use spline::catmullrom_spline;

// Re-export color constants for public API
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
