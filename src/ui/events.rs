/// Application-level events delivered over the app channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The player reported completion of the current run
    SortFinished,
}
