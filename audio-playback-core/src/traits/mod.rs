pub mod audio_player;
pub mod playback_backend;
pub mod playback_observer;
