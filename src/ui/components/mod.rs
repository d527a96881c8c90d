mod bar_canvas;
mod global_footer;
mod key_hints;
mod stats_bar;
pub mod theme;

pub use bar_canvas::BarCanvas;
pub use global_footer::GlobalFooter;
pub use key_hints::{render_key_hints, KeyHintBarStyle};
pub use stats_bar::StatsBar;
pub use theme::{parse_hex_color, BarPalette};
