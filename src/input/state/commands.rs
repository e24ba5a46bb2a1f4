use crate::config::Command;
use crate::draw::color;
use crate::input::{events::Key, tool::Tool};
use crate::util;

use super::InputState;

impl InputState {
    /// Processes a key press event.
    ///
    /// Modifier keys update the modifier state; everything else is matched
    /// against the configured keybindings and dispatched as a [`Command`].
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        let key_str = match key {
            Key::Char(c) => c.to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Plus => "+".to_string(),
            Key::Minus => "-".to_string(),
            Key::F6 => "F6".to_string(),
            _ => return,
        };

        if let Some(command) = self.find_command(&key_str) {
            self.handle_command(command);
        }
    }

    /// Processes a key release event (modifier tracking only).
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Applies a command triggered by a keybinding or a toolbar button.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Exit => {
                self.should_exit = true;
            }
            Command::SelectPen => {
                self.select_tool(Tool::Pen);
            }
            Command::SelectEraser => {
                self.select_tool(Tool::Eraser);
            }
            Command::ClearBoard => {
                self.history.clear();
                self.needs_redraw = true;
                log::info!("Cleared the board");
            }
            Command::IncreaseWidth => {
                self.adjust_width(1.0);
            }
            Command::DecreaseWidth => {
                self.adjust_width(-1.0);
            }
            Command::IncreaseQuality => {
                self.adjust_quality(1.0);
            }
            Command::DecreaseQuality => {
                self.adjust_quality(-1.0);
            }
            Command::ToggleClickThrough => {
                self.request_click_through_toggle();
            }
            Command::SetColorRed => self.set_color(color::RED),
            Command::SetColorGreen => self.set_color(color::GREEN),
            Command::SetColorBlue => self.set_color(color::BLUE),
            Command::SetColorYellow => self.set_color(color::YELLOW),
            Command::SetColorOrange => self.set_color(color::ORANGE),
            Command::SetColorPink => self.set_color(color::PINK),
            Command::SetColorWhite => self.set_color(color::WHITE),
            Command::SetColorBlack => self.set_color(color::BLACK),
        }
    }

    fn select_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
        self.needs_redraw = true;
        log::info!("Switched to {} mode", tool.label());
    }

    fn set_color(&mut self, color: crate::draw::Color) {
        self.current_color = color;
        self.needs_redraw = true;
        log::info!("Color set to {}", util::color_to_name(&color));
    }
}
