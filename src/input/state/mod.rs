//! Input state: tool settings, the gesture state machine, and command
//! handling, split across focused submodules.

mod commands;
mod core;
mod mouse;

#[cfg(test)]
mod tests;

pub use core::{GestureState, InputState};
