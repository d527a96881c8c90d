pub mod algorithms;
pub mod config;
pub mod trace;
pub mod ui;
pub mod util;
pub mod viz;

pub use algorithms::{merge_sort, MergeSort, StepCounts};
pub use config::Config;
pub use trace::{run_trace, TraceSummary};
pub use ui::App;
pub use util::random_array;
pub use viz::{
    Active, Instrumentation, PlaybackState, Player, Renderer, SetupError, Step, VizState,
};
