use crate::models::state::PlaybackState;

/// Callback invoked when the native engine reports end of media.
///
/// Fires on the engine's own thread/context. Keep work minimal; marshal in
/// the observer if the host needs a particular context.
pub type MediaEndedCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Interface to one native media-player handle.
///
/// Implemented by:
/// - `WindowsMediaPlayer` (Windows, `Windows.Media.Playback`)
/// - Future: `AvPlayerBackend` (macOS/iOS), `ExoPlayerBackend` (Android)
///
/// The handle owns the loaded source; transport state lives behind
/// [`PlaybackBackend::session`]. Reads return `None` when the native layer
/// cannot produce a value; mutators are fire-and-forget.
pub trait PlaybackBackend: Send {
    type Session: PlaybackSession;

    /// The transport session, or `None` when the native layer cannot
    /// currently produce one.
    fn session(&self) -> Option<Self::Session>;

    /// Whether a source has been assigned to the handle.
    fn has_source(&self) -> bool;

    fn play(&mut self);

    fn pause(&mut self);

    fn volume(&self) -> Option<f64>;

    fn balance(&self) -> Option<f64>;

    /// Write volume and balance to the handle as one pair.
    ///
    /// Callers must pass already-clamped values; the backend applies them
    /// verbatim.
    fn set_volume_balance(&mut self, volume: f64, balance: f64);

    fn looping(&self) -> Option<bool>;

    fn set_looping(&mut self, enabled: bool);

    /// Register the end-of-media notification callback.
    fn set_ended_callback(&mut self, callback: MediaEndedCallback);

    /// Unregister the end-of-media notification callback.
    fn clear_ended_callback(&mut self);

    /// Free the native handle. Called exactly once, from teardown.
    fn release(&mut self);
}

/// Transport state of a loaded handle.
///
/// Reads substitute the documented default (0 / false) when the native
/// layer fails, rather than signaling an error.
pub trait PlaybackSession {
    /// Current position in seconds.
    fn position(&self) -> f64;

    /// Move the position, in seconds, converted to the native time domain.
    fn set_position(&mut self, seconds: f64);

    /// Natural duration of the loaded source, in seconds.
    fn duration(&self) -> f64;

    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    /// Whether the current source supports seeking.
    fn can_seek(&self) -> bool;

    fn state(&self) -> PlaybackState;
}
