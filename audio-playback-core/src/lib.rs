//! # audio-playback-core
//!
//! Platform-agnostic audio playback contract.
//!
//! One adapter, [`NativeAudioPlayer`], wraps one native media-engine handle
//! behind the [`PlaybackBackend`] trait and exposes the public
//! [`AudioPlayer`] contract: play, pause, stop, seek, volume, balance,
//! speed, looping, completion events, and idempotent teardown. Decoding,
//! buffering, timing, and device output all stay inside the wrapped engine;
//! this crate only clamps parameters, guards missing handles, and forwards
//! events. Platform backends (Windows `Media.Playback`, future AVPlayer /
//! ExoPlayer) implement `PlaybackBackend` and plug into the generic
//! adapter.
//!
//! ## Architecture
//!
//! ```text
//! audio-playback-core (this crate)
//! ├── traits/   ← AudioPlayer, PlaybackBackend, PlaybackSession, PlaybackObserver
//! ├── models/   ← AudioPlayerError, AudioPlayerOptions, AudioSource, PlaybackState
//! └── player/   ← NativeAudioPlayer<B> (generic adapter)
//! ```

pub mod models;
pub mod player;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::error::AudioPlayerError;
pub use models::options::AudioPlayerOptions;
pub use models::source::AudioSource;
pub use models::state::PlaybackState;
pub use player::native::NativeAudioPlayer;
pub use traits::audio_player::{AudioPlayer, MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE};
pub use traits::playback_backend::{MediaEndedCallback, PlaybackBackend, PlaybackSession};
pub use traits::playback_observer::PlaybackObserver;
