/// Event sink for player notifications.
///
/// Methods are called from whatever context the native engine raises its
/// notifications on; the adapter performs no marshaling of its own.
/// Implementations should marshal to the UI thread if needed.
pub trait PlaybackObserver: Send + Sync {
    /// Playback reached the end of the source, or `stop()` was called
    /// explicitly.
    fn on_playback_ended(&self);

    /// Reserved for backends that report volume transitions; the Windows
    /// backend never raises this.
    fn on_volume_changed(&self, _volume: f64) {}

    /// Reserved for backends that report position transitions; the Windows
    /// backend never raises this.
    fn on_time_changed(&self, _position: f64) {}
}
