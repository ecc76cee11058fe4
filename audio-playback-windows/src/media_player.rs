//! Playback backend over `Windows.Media.Playback.MediaPlayer`.
//!
//! The OS media stack owns decoding, buffering, render timing, and device
//! output; this module only creates the handle, assigns the source, and
//! translates the backend trait onto the WinRT ABI.

use std::sync::Arc;

use parking_lot::Mutex;
use windows::core::{IInspectable, HSTRING};
use windows::Foundation::{TimeSpan, TypedEventHandler, Uri};
use windows::Media::Core::MediaSource;
use windows::Media::Playback::{MediaPlaybackSession, MediaPlaybackState, MediaPlayer};

use audio_playback_core::models::error::AudioPlayerError;
use audio_playback_core::models::options::AudioPlayerOptions;
use audio_playback_core::models::source::AudioSource;
use audio_playback_core::models::state::PlaybackState;
use audio_playback_core::player::native::NativeAudioPlayer;
use audio_playback_core::traits::playback_backend::{
    MediaEndedCallback, PlaybackBackend, PlaybackSession,
};

use crate::stream::random_access_stream_from_bytes;

/// Root the platform resolves asset file names against.
const ASSET_ROOT: &str = "ms-appx:///Assets/";

/// `TimeSpan` counts 100-nanosecond ticks.
const TICKS_PER_SECOND: f64 = 10_000_000.0;

type SharedEndedCallback = Arc<Mutex<Option<MediaEndedCallback>>>;

/// One native `MediaPlayer` handle.
///
/// Created with autoplay off, looping off, and the system transport-control
/// integration disabled; the source is assigned exactly once, at
/// construction.
pub struct WindowsMediaPlayer {
    player: Option<MediaPlayer>,
    ended_callback: SharedEndedCallback,
    ended_token: Option<i64>,
}

// SAFETY: MediaPlayer and MediaPlaybackSession are agile WinRT objects;
// every call goes through their thread-safe ABI. The remaining fields are
// Mutex-protected or plain data.
unsafe impl Send for WindowsMediaPlayer {}

impl WindowsMediaPlayer {
    /// Create a handle for a source held entirely in memory.
    pub fn from_stream(
        data: &[u8],
        options: &AudioPlayerOptions,
    ) -> Result<Self, AudioPlayerError> {
        Self::new(&AudioSource::from_bytes(data), options)
    }

    /// Create a handle for a file under the app package's `Assets/` root.
    pub fn from_asset(
        file_name: &str,
        options: &AudioPlayerOptions,
    ) -> Result<Self, AudioPlayerError> {
        Self::new(&AudioSource::from_asset(file_name), options)
    }

    /// Create a handle for `source`.
    ///
    /// `_options` is accepted for signature parity across platform
    /// backends; this backend does not consume it. Failure here is the
    /// kit's single checked error: no usable handle, or a source the OS
    /// cannot materialize, leaves nothing allocated and returns
    /// [`AudioPlayerError::FailedToLoadAudio`].
    pub fn new(
        source: &AudioSource,
        _options: &AudioPlayerOptions,
    ) -> Result<Self, AudioPlayerError> {
        let player = create_player().map_err(|e| {
            AudioPlayerError::FailedToLoadAudio(format!(
                "failed to create MediaPlayer instance: {e}"
            ))
        })?;

        let media_source = materialize_source(source)?;
        player.SetSource(&media_source).map_err(|e| {
            AudioPlayerError::FailedToLoadAudio(format!("failed to assign source: {e}"))
        })?;

        Ok(Self {
            player: Some(player),
            ended_callback: Arc::new(Mutex::new(None)),
            ended_token: None,
        })
    }
}

impl PlaybackBackend for WindowsMediaPlayer {
    type Session = WindowsPlaybackSession;

    fn session(&self) -> Option<WindowsPlaybackSession> {
        let player = self.player.as_ref()?;
        player.PlaybackSession().ok().map(WindowsPlaybackSession)
    }

    fn has_source(&self) -> bool {
        self.player
            .as_ref()
            .map(|p| p.Source().is_ok())
            .unwrap_or(false)
    }

    fn play(&mut self) {
        if let Some(player) = self.player.as_ref() {
            if let Err(e) = player.Play() {
                log::warn!("MediaPlayer::Play failed: {e}");
            }
        }
    }

    fn pause(&mut self) {
        if let Some(player) = self.player.as_ref() {
            if let Err(e) = player.Pause() {
                log::warn!("MediaPlayer::Pause failed: {e}");
            }
        }
    }

    fn volume(&self) -> Option<f64> {
        self.player.as_ref().and_then(|p| p.Volume().ok())
    }

    fn balance(&self) -> Option<f64> {
        self.player.as_ref().and_then(|p| p.AudioBalance().ok())
    }

    fn set_volume_balance(&mut self, volume: f64, balance: f64) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        if let Err(e) = player.SetVolume(volume) {
            log::warn!("MediaPlayer::SetVolume failed: {e}");
        }
        if let Err(e) = player.SetAudioBalance(balance) {
            log::warn!("MediaPlayer::SetAudioBalance failed: {e}");
        }
    }

    fn looping(&self) -> Option<bool> {
        self.player.as_ref().and_then(|p| p.IsLoopingEnabled().ok())
    }

    fn set_looping(&mut self, enabled: bool) {
        if let Some(player) = self.player.as_ref() {
            let _ = player.SetIsLoopingEnabled(enabled);
        }
    }

    fn set_ended_callback(&mut self, callback: MediaEndedCallback) {
        *self.ended_callback.lock() = Some(callback);

        // The WinRT handler is registered once and reads the slot, so a
        // replaced callback needs no re-registration.
        if self.ended_token.is_some() {
            return;
        }
        let Some(player) = self.player.as_ref() else {
            return;
        };

        let slot = Arc::clone(&self.ended_callback);
        let handler = TypedEventHandler::new(
            move |_sender: &Option<MediaPlayer>, _args: &Option<IInspectable>| {
                if let Some(callback) = slot.lock().as_ref() {
                    callback();
                }
                Ok(())
            },
        );

        match player.MediaEnded(&handler) {
            Ok(token) => self.ended_token = Some(token),
            Err(e) => log::warn!("failed to register MediaEnded handler: {e}"),
        }
    }

    fn clear_ended_callback(&mut self) {
        if let (Some(player), Some(token)) = (self.player.as_ref(), self.ended_token.take()) {
            let _ = player.RemoveMediaEnded(token);
        }
        *self.ended_callback.lock() = None;
    }

    fn release(&mut self) {
        if let Some(player) = self.player.take() {
            let _ = player.Close();
        }
    }
}

/// Transport session over `MediaPlaybackSession`.
///
/// Every native read maps failure to the documented default instead of
/// propagating.
pub struct WindowsPlaybackSession(MediaPlaybackSession);

impl PlaybackSession for WindowsPlaybackSession {
    fn position(&self) -> f64 {
        self.0.Position().map(timespan_to_secs).unwrap_or(0.0)
    }

    fn set_position(&mut self, seconds: f64) {
        let _ = self.0.SetPosition(secs_to_timespan(seconds));
    }

    fn duration(&self) -> f64 {
        self.0.NaturalDuration().map(timespan_to_secs).unwrap_or(0.0)
    }

    fn playback_rate(&self) -> f64 {
        self.0.PlaybackRate().unwrap_or(0.0)
    }

    fn set_playback_rate(&mut self, rate: f64) {
        let _ = self.0.SetPlaybackRate(rate);
    }

    fn can_seek(&self) -> bool {
        self.0.CanSeek().unwrap_or(false)
    }

    fn state(&self) -> PlaybackState {
        match self.0.PlaybackState() {
            Ok(MediaPlaybackState::Opening) => PlaybackState::Opening,
            Ok(MediaPlaybackState::Buffering) => PlaybackState::Buffering,
            Ok(MediaPlaybackState::Playing) => PlaybackState::Playing,
            Ok(MediaPlaybackState::Paused) => PlaybackState::Paused,
            _ => PlaybackState::None,
        }
    }
}

/// Create the native handle with autoplay and looping off and the system
/// transport-control integration disabled.
fn create_player() -> windows::core::Result<MediaPlayer> {
    let player = MediaPlayer::new()?;
    player.SetAutoPlay(false)?;
    player.SetIsLoopingEnabled(false)?;
    player.CommandManager()?.SetIsEnabled(false)?;
    Ok(player)
}

fn materialize_source(source: &AudioSource) -> Result<MediaSource, AudioPlayerError> {
    match source {
        AudioSource::Memory(data) => {
            let stream = random_access_stream_from_bytes(data)?;
            MediaSource::CreateFromStream(&stream, &HSTRING::new()).map_err(|e| {
                AudioPlayerError::FailedToLoadAudio(format!(
                    "failed to create stream source: {e}"
                ))
            })
        }
        AudioSource::Asset(file_name) => {
            let uri = Uri::CreateUri(&HSTRING::from(format!("{ASSET_ROOT}{file_name}")))
                .map_err(|e| {
                    AudioPlayerError::FailedToLoadAudio(format!("invalid asset uri: {e}"))
                })?;
            MediaSource::CreateFromUri(&uri).map_err(|e| {
                AudioPlayerError::FailedToLoadAudio(format!(
                    "failed to create asset source: {e}"
                ))
            })
        }
    }
}

fn timespan_to_secs(span: TimeSpan) -> f64 {
    span.Duration as f64 / TICKS_PER_SECOND
}

fn secs_to_timespan(seconds: f64) -> TimeSpan {
    TimeSpan {
        Duration: (seconds * TICKS_PER_SECOND) as i64,
    }
}

/// Ready-to-use player over an in-memory byte stream.
pub fn player_from_stream(
    data: &[u8],
    options: &AudioPlayerOptions,
) -> Result<NativeAudioPlayer<WindowsMediaPlayer>, AudioPlayerError> {
    Ok(NativeAudioPlayer::new(WindowsMediaPlayer::from_stream(
        data, options,
    )?))
}

/// Ready-to-use player over a file under the app package's `Assets/` root.
pub fn player_from_asset(
    file_name: &str,
    options: &AudioPlayerOptions,
) -> Result<NativeAudioPlayer<WindowsMediaPlayer>, AudioPlayerError> {
    Ok(NativeAudioPlayer::new(WindowsMediaPlayer::from_asset(
        file_name, options,
    )?))
}
