use thiserror::Error;

/// Errors surfaced by the playback kit.
///
/// Construction is the only operation with a checked failure mode. Every
/// later native-layer hiccup is absorbed into safe defaults instead; see
/// the adapter's read policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioPlayerError {
    #[error("failed to load audio: {0}")]
    FailedToLoadAudio(String),
}
