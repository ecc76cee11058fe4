use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::audio_player::{AudioPlayer, MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE};
use crate::traits::playback_backend::{PlaybackBackend, PlaybackSession};
use crate::traits::playback_observer::PlaybackObserver;

/// Observer slot shared with the backend's end-of-media callback.
type ObserverSlot = Arc<Mutex<Option<Arc<dyn PlaybackObserver>>>>;

/// Audio player backed by one native media-engine handle.
///
/// The adapter owns the handle for its whole life: created by the backend
/// constructor, torn down exactly once by [`dispose`](AudioPlayer::dispose)
/// or on drop. Everything in between is parameter clamping, null-guarding,
/// and event forwarding; decode, buffering, and device output stay inside
/// the wrapped engine.
pub struct NativeAudioPlayer<B: PlaybackBackend> {
    backend: Option<B>,
    observer: ObserverSlot,
    disposed: bool,
}

impl<B: PlaybackBackend> NativeAudioPlayer<B> {
    /// Wrap a freshly constructed backend handle.
    ///
    /// Registers the end-of-media callback and normalizes the playback rate
    /// to 1.0 through the regular clamp path.
    pub fn new(mut backend: B) -> Self {
        let observer: ObserverSlot = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&observer);
        backend.set_ended_callback(Box::new(move || {
            let observer = slot.lock().clone();
            if let Some(observer) = observer {
                observer.on_playback_ended();
            }
        }));

        let mut player = Self {
            backend: Some(backend),
            observer,
            disposed: false,
        };
        player.set_speed(1.0);
        player
    }

    fn session(&self) -> Option<B::Session> {
        self.backend.as_ref().and_then(|b| b.session())
    }

    /// Single write path for volume and balance.
    ///
    /// Clamps both values and applies them to the handle as one pair; the
    /// two settings share one native write, so setting either requires the
    /// other's current value. Refuses to act once disposed or handle-less.
    fn apply_volume_balance(&mut self, volume: f64, balance: f64) {
        if self.disposed {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.set_volume_balance(volume.clamp(0.0, 1.0), balance.clamp(-1.0, 1.0));
        }
    }

    fn notify_ended(&self) {
        let observer = self.observer.lock().clone();
        if let Some(observer) = observer {
            observer.on_playback_ended();
        }
    }
}

impl<B: PlaybackBackend> AudioPlayer for NativeAudioPlayer<B> {
    fn current_position(&self) -> f64 {
        self.session().map(|s| s.position()).unwrap_or(0.0)
    }

    fn duration(&self) -> f64 {
        self.session().map(|s| s.duration()).unwrap_or(0.0)
    }

    fn volume(&self) -> f64 {
        self.backend.as_ref().and_then(|b| b.volume()).unwrap_or(0.0)
    }

    fn set_volume(&mut self, volume: f64) {
        let balance = self.balance();
        self.apply_volume_balance(volume, balance);
    }

    fn balance(&self) -> f64 {
        self.backend.as_ref().and_then(|b| b.balance()).unwrap_or(0.0)
    }

    fn set_balance(&mut self, balance: f64) {
        let volume = self.volume();
        self.apply_volume_balance(volume, balance);
    }

    fn speed(&self) -> f64 {
        self.session().map(|s| s.playback_rate()).unwrap_or(0.0)
    }

    fn set_speed(&mut self, speed: f64) {
        if let Some(mut session) = self.session() {
            session.set_playback_rate(speed.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE));
        }
    }

    fn minimum_speed(&self) -> f64 {
        MIN_PLAYBACK_RATE
    }

    fn maximum_speed(&self) -> f64 {
        MAX_PLAYBACK_RATE
    }

    fn can_set_speed(&self) -> bool {
        true
    }

    fn is_playing(&self) -> bool {
        self.session().map(|s| s.state().is_playing()).unwrap_or(false)
    }

    fn loop_enabled(&self) -> bool {
        self.backend.as_ref().and_then(|b| b.looping()).unwrap_or(false)
    }

    fn set_loop(&mut self, enabled: bool) {
        if let Some(backend) = self.backend.as_mut() {
            backend.set_looping(enabled);
        }
    }

    fn can_seek(&self) -> bool {
        self.session().map(|s| s.can_seek()).unwrap_or(false)
    }

    fn play(&mut self) {
        let has_source = self.backend.as_ref().map(|b| b.has_source()).unwrap_or(false);
        if !has_source || self.session().is_none() {
            return;
        }

        // Play on an already-playing handle restarts the track.
        if self.is_playing() {
            self.pause();
            self.seek(0.0);
        }

        if let Some(backend) = self.backend.as_mut() {
            backend.play();
        }
    }

    fn pause(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.pause();
        }
    }

    fn stop(&mut self) {
        if self.backend.is_none() {
            return;
        }

        self.pause();
        self.seek(0.0);
        // Explicit stop announces completion even though the engine's
        // end-of-media notification never fired.
        self.notify_ended();
    }

    fn seek(&mut self, position: f64) {
        let Some(mut session) = self.session() else {
            return;
        };
        if session.can_seek() {
            session.set_position(position);
        }
    }

    fn set_observer(&mut self, observer: Arc<dyn PlaybackObserver>) {
        *self.observer.lock() = Some(observer);
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        if let Some(mut backend) = self.backend.take() {
            backend.pause();
            backend.clear_ended_callback();
            backend.release();
            log::debug!("released native media player handle");
        }

        self.disposed = true;
    }
}

impl<B: PlaybackBackend> Drop for NativeAudioPlayer<B> {
    fn drop(&mut self) {
        // Teardown for owners that never called dispose(); the disposed
        // flag makes a prior explicit dispose suppress this pass.
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use approx::assert_relative_eq;

    use super::*;
    use crate::models::state::PlaybackState;
    use crate::traits::playback_backend::MediaEndedCallback;

    /// Mutable state of the fake engine, shared between backend, session,
    /// and the test body.
    struct EngineState {
        position: f64,
        duration: f64,
        rate: f64,
        volume: f64,
        balance: f64,
        looping: bool,
        state: PlaybackState,
        can_seek: bool,
        volume_writes: usize,
        release_count: usize,
    }

    impl Default for EngineState {
        fn default() -> Self {
            Self {
                position: 0.0,
                duration: 180.0,
                rate: 0.0,
                volume: 1.0,
                balance: 0.0,
                looping: false,
                state: PlaybackState::Paused,
                can_seek: true,
                volume_writes: 0,
                release_count: 0,
            }
        }
    }

    struct FakeSession(Arc<Mutex<EngineState>>);

    impl PlaybackSession for FakeSession {
        fn position(&self) -> f64 {
            self.0.lock().position
        }

        fn set_position(&mut self, seconds: f64) {
            self.0.lock().position = seconds;
        }

        fn duration(&self) -> f64 {
            self.0.lock().duration
        }

        fn playback_rate(&self) -> f64 {
            self.0.lock().rate
        }

        fn set_playback_rate(&mut self, rate: f64) {
            self.0.lock().rate = rate;
        }

        fn can_seek(&self) -> bool {
            self.0.lock().can_seek
        }

        fn state(&self) -> PlaybackState {
            self.0.lock().state
        }
    }

    struct FakeBackend {
        engine: Arc<Mutex<EngineState>>,
        ended: Arc<Mutex<Option<MediaEndedCallback>>>,
        session_available: Arc<AtomicBool>,
        has_source: bool,
    }

    impl PlaybackBackend for FakeBackend {
        type Session = FakeSession;

        fn session(&self) -> Option<FakeSession> {
            if !self.session_available.load(Ordering::SeqCst) {
                return None;
            }
            Some(FakeSession(Arc::clone(&self.engine)))
        }

        fn has_source(&self) -> bool {
            self.has_source
        }

        fn play(&mut self) {
            self.engine.lock().state = PlaybackState::Playing;
        }

        fn pause(&mut self) {
            self.engine.lock().state = PlaybackState::Paused;
        }

        fn volume(&self) -> Option<f64> {
            Some(self.engine.lock().volume)
        }

        fn balance(&self) -> Option<f64> {
            Some(self.engine.lock().balance)
        }

        fn set_volume_balance(&mut self, volume: f64, balance: f64) {
            let mut engine = self.engine.lock();
            engine.volume = volume;
            engine.balance = balance;
            engine.volume_writes += 1;
        }

        fn looping(&self) -> Option<bool> {
            Some(self.engine.lock().looping)
        }

        fn set_looping(&mut self, enabled: bool) {
            self.engine.lock().looping = enabled;
        }

        fn set_ended_callback(&mut self, callback: MediaEndedCallback) {
            *self.ended.lock() = Some(callback);
        }

        fn clear_ended_callback(&mut self) {
            *self.ended.lock() = None;
        }

        fn release(&mut self) {
            self.engine.lock().release_count += 1;
        }
    }

    /// Handles the test keeps after the player takes ownership of the
    /// backend.
    struct Harness {
        engine: Arc<Mutex<EngineState>>,
        ended: Arc<Mutex<Option<MediaEndedCallback>>>,
        session_available: Arc<AtomicBool>,
    }

    impl Harness {
        fn fire_native_ended(&self) {
            let guard = self.ended.lock();
            let callback = guard.as_ref().expect("ended callback registered");
            callback();
        }
    }

    fn rig_with(
        configure: impl FnOnce(&mut FakeBackend),
    ) -> (NativeAudioPlayer<FakeBackend>, Harness) {
        let engine = Arc::new(Mutex::new(EngineState::default()));
        let ended = Arc::new(Mutex::new(None));
        let session_available = Arc::new(AtomicBool::new(true));

        let mut backend = FakeBackend {
            engine: Arc::clone(&engine),
            ended: Arc::clone(&ended),
            session_available: Arc::clone(&session_available),
            has_source: true,
        };
        configure(&mut backend);

        let player = NativeAudioPlayer::new(backend);
        (
            player,
            Harness {
                engine,
                ended,
                session_available,
            },
        )
    }

    fn rig() -> (NativeAudioPlayer<FakeBackend>, Harness) {
        rig_with(|_| {})
    }

    #[derive(Default)]
    struct CountingObserver {
        ended: AtomicUsize,
    }

    impl PlaybackObserver for CountingObserver {
        fn on_playback_ended(&self) {
            self.ended.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn construction_normalizes_speed_to_one() {
        let (player, harness) = rig();

        assert_relative_eq!(harness.engine.lock().rate, 1.0);
        assert_relative_eq!(player.speed(), 1.0);
    }

    #[test]
    fn volume_round_trips_clamped() {
        let (mut player, _harness) = rig();

        player.set_volume(1.5);
        assert_relative_eq!(player.volume(), 1.0);

        player.set_volume(-0.2);
        assert_relative_eq!(player.volume(), 0.0);

        player.set_volume(0.4);
        assert_relative_eq!(player.volume(), 0.4);
    }

    #[test]
    fn balance_round_trips_clamped() {
        let (mut player, _harness) = rig();

        player.set_balance(2.0);
        assert_relative_eq!(player.balance(), 1.0);

        player.set_balance(-3.0);
        assert_relative_eq!(player.balance(), -1.0);

        player.set_balance(-0.25);
        assert_relative_eq!(player.balance(), -0.25);
    }

    #[test]
    fn volume_and_balance_write_as_a_pair() {
        let (mut player, harness) = rig();

        player.set_balance(-0.5);
        player.set_volume(0.3);

        let engine = harness.engine.lock();
        // Each setter wrote both values through the shared routine.
        assert_eq!(engine.volume_writes, 2);
        assert_relative_eq!(engine.volume, 0.3);
        assert_relative_eq!(engine.balance, -0.5);
    }

    #[test]
    fn speed_round_trips_clamped() {
        let (mut player, _harness) = rig();

        player.set_speed(12.0);
        assert_relative_eq!(player.speed(), 8.0);

        player.set_speed(-1.0);
        assert_relative_eq!(player.speed(), 0.0);

        player.set_speed(2.5);
        assert_relative_eq!(player.speed(), 2.5);
    }

    #[test]
    fn speed_limits_are_fixed() {
        let (player, _harness) = rig();

        assert_relative_eq!(player.minimum_speed(), 0.0);
        assert_relative_eq!(player.maximum_speed(), 8.0);
        assert!(player.can_set_speed());
    }

    #[test]
    fn play_is_a_noop_without_a_source() {
        let (mut player, harness) = rig_with(|backend| backend.has_source = false);

        player.play();

        assert_eq!(harness.engine.lock().state, PlaybackState::Paused);
    }

    #[test]
    fn play_is_a_noop_without_a_session() {
        let (mut player, harness) = rig();
        harness.session_available.store(false, Ordering::SeqCst);

        player.play();

        assert_eq!(harness.engine.lock().state, PlaybackState::Paused);
    }

    #[test]
    fn play_while_playing_restarts_from_zero() {
        let (mut player, harness) = rig();

        player.play();
        harness.engine.lock().position = 42.0;

        player.play();

        let engine = harness.engine.lock();
        assert_relative_eq!(engine.position, 0.0);
        assert_eq!(engine.state, PlaybackState::Playing);
    }

    #[test]
    fn stop_announces_completion_and_rewinds() {
        let (mut player, harness) = rig();
        let observer = Arc::new(CountingObserver::default());
        player.set_observer(observer.clone());

        player.play();
        harness.engine.lock().position = 30.0;

        player.stop();

        assert_eq!(observer.ended.load(Ordering::SeqCst), 1);
        let engine = harness.engine.lock();
        assert_relative_eq!(engine.position, 0.0);
        assert_eq!(engine.state, PlaybackState::Paused);
    }

    #[test]
    fn stop_announces_completion_even_when_not_playing() {
        let (mut player, _harness) = rig();
        let observer = Arc::new(CountingObserver::default());
        player.set_observer(observer.clone());

        player.stop();

        assert_eq!(observer.ended.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn native_completion_forwards_to_observer() {
        let (mut player, harness) = rig();
        let observer = Arc::new(CountingObserver::default());
        player.set_observer(observer.clone());

        harness.fire_native_ended();

        assert_eq!(observer.ended.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn seek_is_ignored_when_source_is_not_seekable() {
        let (mut player, harness) = rig();
        {
            let mut engine = harness.engine.lock();
            engine.can_seek = false;
            engine.position = 10.0;
        }

        player.seek(99.0);

        assert_relative_eq!(harness.engine.lock().position, 10.0);
    }

    #[test]
    fn session_backed_reads_fail_soft_to_defaults() {
        let (player, harness) = rig();
        harness.session_available.store(false, Ordering::SeqCst);

        assert_relative_eq!(player.current_position(), 0.0);
        assert_relative_eq!(player.duration(), 0.0);
        assert_relative_eq!(player.speed(), 0.0);
        assert!(!player.is_playing());
        assert!(!player.can_seek());
    }

    #[test]
    fn loop_flag_round_trips() {
        let (mut player, _harness) = rig();

        assert!(!player.loop_enabled());
        player.set_loop(true);
        assert!(player.loop_enabled());
    }

    #[test]
    fn dispose_tears_down_exactly_once() {
        let (mut player, harness) = rig();

        player.dispose();
        player.dispose();

        let engine = harness.engine.lock();
        assert_eq!(engine.release_count, 1);
        assert_eq!(engine.state, PlaybackState::Paused);
        drop(engine);
        assert!(harness.ended.lock().is_none());
    }

    #[test]
    fn reads_return_defaults_after_dispose() {
        let (mut player, _harness) = rig();

        player.dispose();

        assert_relative_eq!(player.current_position(), 0.0);
        assert_relative_eq!(player.duration(), 0.0);
        assert_relative_eq!(player.volume(), 0.0);
        assert_relative_eq!(player.balance(), 0.0);
        assert_relative_eq!(player.speed(), 0.0);
        assert!(!player.is_playing());
        assert!(!player.loop_enabled());
        assert!(!player.can_seek());
    }

    #[test]
    fn mutations_are_noops_after_dispose() {
        let (mut player, harness) = rig();
        let observer = Arc::new(CountingObserver::default());
        player.set_observer(observer.clone());

        player.dispose();
        let writes_before = harness.engine.lock().volume_writes;

        player.play();
        player.pause();
        player.stop();
        player.seek(5.0);
        player.set_speed(3.0);
        player.set_volume(0.5);
        player.set_balance(0.5);
        player.set_loop(true);

        let engine = harness.engine.lock();
        assert_eq!(engine.volume_writes, writes_before);
        assert_eq!(engine.state, PlaybackState::Paused);
        assert!(!engine.looping);
        // A disposed player raises nothing, not even on stop().
        assert_eq!(observer.ended.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_runs_the_teardown_routine() {
        let (player, harness) = rig();

        drop(player);

        assert_eq!(harness.engine.lock().release_count, 1);
    }

    #[test]
    fn explicit_dispose_suppresses_the_drop_pass() {
        let (mut player, harness) = rig();

        player.dispose();
        drop(player);

        assert_eq!(harness.engine.lock().release_count, 1);
    }
}
