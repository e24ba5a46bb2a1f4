//! Drawing tool selection.

/// The active annotation tool.
///
/// Selected with keybindings (`A` for pen, `S` for eraser by default) or the
/// toolbar buttons. The tool is sampled when a gesture commits, so switching
/// mid-gesture affects the committed action, not the samples already
/// captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Freehand pen - smoothed stroke in the current color
    Pen,
    /// Eraser - removes previously drawn pixels along the pointer path
    Eraser,
}

impl Tool {
    /// Human-readable tool name for the toolbar.
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
        }
    }
}
