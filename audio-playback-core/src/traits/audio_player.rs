use std::sync::Arc;

use super::playback_observer::PlaybackObserver;

/// Lowest playback rate accepted by [`AudioPlayer::set_speed`].
pub const MIN_PLAYBACK_RATE: f64 = 0.0;

/// Highest playback rate accepted by [`AudioPlayer::set_speed`].
pub const MAX_PLAYBACK_RATE: f64 = 8.0;

/// Public playback contract, one implementation per platform engine.
///
/// Every operation is best-effort: mutating calls on a missing session or a
/// disposed player are silent no-ops, and accessors fall back to 0 / false
/// instead of erroring. Construction of the backing handle is the only
/// fallible step.
pub trait AudioPlayer {
    /// Current position in seconds; 0 when unavailable.
    fn current_position(&self) -> f64;

    /// Natural duration in seconds; 0 when unavailable.
    fn duration(&self) -> f64;

    fn volume(&self) -> f64;

    /// Set volume; input is clamped to [0, 1].
    fn set_volume(&mut self, volume: f64);

    /// Left/right channel gain skew, independent of overall volume.
    fn balance(&self) -> f64;

    /// Set balance; input is clamped to [-1, 1].
    fn set_balance(&mut self, balance: f64);

    fn speed(&self) -> f64;

    /// Set playback rate; input is clamped to the
    /// [`minimum_speed`](Self::minimum_speed)..[`maximum_speed`](Self::maximum_speed)
    /// range.
    fn set_speed(&mut self, speed: f64);

    fn minimum_speed(&self) -> f64;

    fn maximum_speed(&self) -> f64;

    fn can_set_speed(&self) -> bool;

    fn is_playing(&self) -> bool;

    fn loop_enabled(&self) -> bool;

    fn set_loop(&mut self, enabled: bool);

    fn can_seek(&self) -> bool;

    /// Begin playback. Calling this on an already-playing player restarts
    /// the track from the beginning rather than being a no-op.
    fn play(&mut self);

    /// Pause playback; safe to call when not playing.
    fn pause(&mut self);

    /// Pause, rewind to 0, and announce completion to the observer.
    fn stop(&mut self);

    /// Move to `position` seconds; ignored when the source is not seekable.
    fn seek(&mut self, position: f64);

    /// Subscribe to playback events. Replaces any previous observer.
    fn set_observer(&mut self, observer: Arc<dyn PlaybackObserver>);

    /// Tear down the native handle. Idempotent; also runs on drop.
    fn dispose(&mut self);
}
