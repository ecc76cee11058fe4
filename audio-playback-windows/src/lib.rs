//! # audio-playback-windows
//!
//! Windows `Media.Playback` backend for audio-playback-kit.
//!
//! Provides:
//! - `WindowsMediaPlayer` — `PlaybackBackend` over `Windows.Media.Playback.MediaPlayer`
//! - `player_from_stream` / `player_from_asset` — ready-to-use players
//!
//! ## Platform Requirements
//! - Windows 10 1607+ (build 14393) for the `MediaPlayer` playback-session API
//!
//! ## Usage
//! ```ignore
//! use audio_playback_core::{AudioPlayer, AudioPlayerOptions};
//! use audio_playback_windows::player_from_asset;
//!
//! let mut player = player_from_asset("chime.mp3", &AudioPlayerOptions::default())?;
//! player.play();
//! ```

#[cfg(target_os = "windows")]
pub mod media_player;
#[cfg(target_os = "windows")]
pub mod stream;

#[cfg(target_os = "windows")]
pub use media_player::{player_from_asset, player_from_stream, WindowsMediaPlayer};
