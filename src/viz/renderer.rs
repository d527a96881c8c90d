//! Rendering boundary for the playback engine

use thiserror::Error;

use super::types::VizState;

/// The rendering surface could not be prepared
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Rendering surface has no drawable area ({width}x{height})")]
    EmptySurface { width: u16, height: u16 },
}

/// Draws the visualization state.
///
/// The player calls `setup` once during construction, then `draw` once right
/// after setup and again synchronously after every applied step.
pub trait Renderer {
    /// Validate and prepare the surface
    fn setup(&mut self) -> Result<(), SetupError> {
        Ok(())
    }

    fn draw(&mut self, state: &VizState);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn setup(&mut self) -> Result<(), SetupError> {
        (**self).setup()
    }

    fn draw(&mut self, state: &VizState) {
        (**self).draw(state)
    }
}
