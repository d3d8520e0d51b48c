use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Key-driven adjustments of the sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Shrink,
    Grow,
    Quit,
}

impl Command {
    /// Map a key press to a command. Unbound keys yield `None`.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Command::Up),
            's' => Some(Command::Down),
            'a' => Some(Command::Left),
            'd' => Some(Command::Right),
            '1' => Some(Command::Shrink),
            '2' => Some(Command::Grow),
            '4' => Some(Command::Quit),
            _ => None,
        }
    }

    /// Parse a key script, one entry per frame. `.` and spaces mean "no key
    /// pressed on this frame".
    pub fn parse_script(script: &str) -> Result<Vec<Option<Command>>> {
        let mut commands = Vec::with_capacity(script.len());
        for (idx, key) in script.chars().enumerate() {
            if key == '.' || key == ' ' {
                commands.push(None);
                continue;
            }
            match Command::from_key(key) {
                Some(cmd) => commands.push(Some(cmd)),
                None => bail!("Unbound key '{}' at position {} of control script", key, idx),
            }
        }
        Ok(commands)
    }
}

/// Position and size of the sampling window, owned by the control loop and
/// handed to the classifier by reference each frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    pub rect_size: u32,
    pub pos_x: i32,
    pub pos_y: i32,
    /// Pixels moved per position unit.
    pub step: u32,
    pub size_step: u32,
    /// Size restored when shrinking would reach zero.
    pub reset_size: u32,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            rect_size: 100,
            pos_x: 0,
            pos_y: 0,
            step: 10,
            size_step: 4,
            reset_size: 20,
        }
    }
}

impl WindowState {
    pub fn new(rect_size: u32) -> Self {
        Self {
            rect_size,
            ..Default::default()
        }
    }

    /// Apply a command. Returns `true` when `rect_size` changed and the
    /// shape templates must be regenerated.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Up => self.pos_y -= 1,
            Command::Down => self.pos_y += 1,
            Command::Left => self.pos_x -= 1,
            Command::Right => self.pos_x += 1,
            Command::Shrink => {
                let shrunk = self.rect_size as i64 - self.size_step as i64;
                self.rect_size = if shrunk <= 0 {
                    self.reset_size.max(1)
                } else {
                    shrunk as u32
                };
                return true;
            }
            Command::Grow => {
                self.rect_size = self.rect_size.saturating_add(self.size_step);
                return true;
            }
            Command::Quit => {}
        }
        false
    }

    /// Side length of the square window and of every template.
    pub fn side(&self) -> usize {
        self.rect_size as usize + 1
    }
}
