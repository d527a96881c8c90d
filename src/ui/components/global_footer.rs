use ratatui::{buffer::Buffer, layout::Rect};

use super::key_hints::{render_key_hints, KeyHintBarStyle};
use super::theme::{FOOTER_BG, KEY_HINT_BG};
use crate::config::KeybindingConfig;
use crate::ui::action::Action;

/// Footer listing the bound key for every action
pub struct GlobalFooter {
    hints: Vec<(String, &'static str)>,
}

impl GlobalFooter {
    /// Build hints from the active keybindings; unbound actions are skipped
    pub fn from_keybindings(keybindings: &KeybindingConfig) -> Self {
        let hints = Action::ALL
            .into_iter()
            .filter_map(|action| {
                keybindings
                    .key_for(action)
                    .map(|combo| (combo.to_string(), action.hint()))
            })
            .collect();
        Self { hints }
    }

    pub fn hints(&self) -> &[(String, &'static str)] {
        &self.hints
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        render_key_hints(
            area,
            buf,
            &self.hints,
            KeyHintBarStyle::footer_bar(KEY_HINT_BG, FOOTER_BG),
        );
    }
}
