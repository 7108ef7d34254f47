use crate::config::ConfigUpdate;
use nalgebra as na;
use tracing::info;

pub const LINES_HINT: &str = "press s to change line position";
pub const ZONE_HINT: &str = "press r to make restricted parking";

pub const KEY_LINES: char = 's';
pub const KEY_ZONE: char = 'r';
pub const KEY_QUIT: char = 'q';

/// Which selection the user is in the middle of.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Idle,
    SettingLines(Vec<f32>),
    SettingZone(Vec<na::Point2<f32>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    None,
    Update(ConfigUpdate),
    Quit,
}

/// Turns key presses and clicks into whole configuration updates. The scene
/// only hears about a selection once it is complete.
#[derive(Debug, Default)]
pub struct InputController {
    mode: InputMode,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    /// Starting a mode abandons any unfinished selection.
    pub fn handle_key(&mut self, key: char) -> InputAction {
        match key.to_ascii_lowercase() {
            KEY_QUIT => InputAction::Quit,
            KEY_LINES => {
                info!("line setting mode: click the entry line, then the exit line");
                self.mode = InputMode::SettingLines(Vec::with_capacity(2));
                InputAction::None
            }
            KEY_ZONE => {
                info!("zone selection mode: click 4 points");
                self.mode = InputMode::SettingZone(Vec::with_capacity(4));
                InputAction::None
            }
            _ => InputAction::None,
        }
    }

    pub fn handle_click(&mut self, x: f32, y: f32) -> InputAction {
        match &mut self.mode {
            InputMode::Idle => InputAction::None,
            InputMode::SettingLines(rows) => {
                rows.push(y);
                info!("line {} set at y = {}", rows.len(), y);

                if let [entry_y, exit_y] = rows[..] {
                    self.mode = InputMode::Idle;
                    InputAction::Update(ConfigUpdate::Lines { entry_y, exit_y })
                } else {
                    InputAction::None
                }
            }
            InputMode::SettingZone(points) => {
                points.push(na::Point2::new(x, y));
                info!("point {} set at ({}, {})", points.len(), x, y);

                if points.len() == 4 {
                    let points = std::mem::take(points);
                    self.mode = InputMode::Idle;
                    info!("zone selection complete");
                    InputAction::Update(ConfigUpdate::Zone(points))
                } else {
                    InputAction::None
                }
            }
        }
    }
}
