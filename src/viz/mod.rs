pub mod player;
pub mod renderer;
pub mod types;

pub use player::{PlaybackState, Player, StepSequence, BASE_INTERVAL, MAX_SPEED, MIN_SPEED};
pub use renderer::{Renderer, SetupError};
pub use types::{Active, Instrumentation, Step, VizState};
