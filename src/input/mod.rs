//! Input processing: event types, the gesture capture buffer, and the
//! drawing state machine.

pub mod capture;
pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use capture::InputCapture;
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::{GestureState, InputState};
pub use tool::Tool;
