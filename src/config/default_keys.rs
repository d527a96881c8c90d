//! Default keybindings
//!
//! Used when the config file has no `[keys]` table, and as the base that
//! user bindings are merged onto.

use crossterm::event::{KeyCode, KeyModifiers};

use super::keys::{KeyCombo, KeybindingConfig};
use crate::ui::action::Action;

/// Helper to insert a keybinding
fn bind(config: &mut KeybindingConfig, key: &str, action: Action) {
    if let Ok(combo) = key.parse() {
        config.bind(combo, action);
    }
}

/// Create the default keybindings configuration
pub fn default_keybindings() -> KeybindingConfig {
    let mut config = KeybindingConfig::new();

    bind(&mut config, "q", Action::Quit);
    bind(&mut config, "C-c", Action::Quit);
    bind(&mut config, "<Esc>", Action::Quit);

    // Transport
    bind(&mut config, "<Space>", Action::TogglePlay);
    bind(&mut config, "p", Action::TogglePlay);
    bind(&mut config, "s", Action::Step);
    config.bind(KeyCombo::new(KeyCode::Right, KeyModifiers::NONE), Action::Step);
    bind(&mut config, "r", Action::Restart);
    bind(&mut config, "n", Action::NewArray);

    // Speed
    bind(&mut config, "+", Action::SpeedUp);
    bind(&mut config, "=", Action::SpeedUp);
    bind(&mut config, "-", Action::SpeedDown);

    // Array size
    bind(&mut config, "]", Action::SizeUp);
    bind(&mut config, "[", Action::SizeDown);

    config
}
