//! Actions that can be triggered by keybindings
//!
//! Each action is a single transport or array operation on the visualizer.

/// All mappable UI actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Play or pause; arms a fresh run when nothing is in progress
    TogglePlay,
    /// Apply exactly one step
    Step,
    /// Re-arm from the current array and start playing
    Restart,
    /// Generate a new random array
    NewArray,
    /// Increase playback speed
    SpeedUp,
    /// Decrease playback speed
    SpeedDown,
    /// Grow the array and regenerate
    SizeUp,
    /// Shrink the array and regenerate
    SizeDown,
}

impl Action {
    /// Actions in the order they appear in the footer
    pub const ALL: [Action; 9] = [
        Action::TogglePlay,
        Action::Step,
        Action::Restart,
        Action::NewArray,
        Action::SpeedDown,
        Action::SpeedUp,
        Action::SizeDown,
        Action::SizeUp,
        Action::Quit,
    ];

    /// Config name of the action (`[keys]` table)
    pub fn name(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::TogglePlay => "toggle_play",
            Action::Step => "step",
            Action::Restart => "restart",
            Action::NewArray => "new_array",
            Action::SpeedUp => "speed_up",
            Action::SpeedDown => "speed_down",
            Action::SizeUp => "size_up",
            Action::SizeDown => "size_down",
        }
    }

    /// Short label for key hints
    pub fn hint(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::TogglePlay => "play/pause",
            Action::Step => "step",
            Action::Restart => "restart",
            Action::NewArray => "new array",
            Action::SpeedUp => "faster",
            Action::SpeedDown => "slower",
            Action::SizeUp => "bigger",
            Action::SizeDown => "smaller",
        }
    }

    /// Parse an action name from the config file
    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.name() == name)
    }
}
