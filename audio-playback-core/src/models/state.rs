/// Transport state reported by a native playback session.
///
/// Engine-level state machine:
/// ```text
/// none → opening → buffering → playing ↔ paused
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No media assigned to the session yet.
    None,
    /// The engine is opening the source.
    Opening,
    /// The engine is buffering and will resume on its own.
    Buffering,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Whether the engine is mid-transition (opening or buffering).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Opening | Self::Buffering)
    }
}
