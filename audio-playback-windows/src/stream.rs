//! In-memory byte source materialization.
//!
//! The engine consumes `IRandomAccessStream`; complete in-memory audio is
//! copied into an `InMemoryRandomAccessStream` once, at construction.

use windows::Storage::Streams::{DataWriter, InMemoryRandomAccessStream};

use audio_playback_core::models::error::AudioPlayerError;

/// Copy `data` into a rewound WinRT random-access stream.
pub fn random_access_stream_from_bytes(
    data: &[u8],
) -> Result<InMemoryRandomAccessStream, AudioPlayerError> {
    let fail = |step: &str, e: windows::core::Error| {
        AudioPlayerError::FailedToLoadAudio(format!("{step}: {e}"))
    };

    let stream =
        InMemoryRandomAccessStream::new().map_err(|e| fail("failed to create stream", e))?;
    let writer =
        DataWriter::CreateDataWriter(&stream).map_err(|e| fail("failed to create writer", e))?;

    writer
        .WriteBytes(data)
        .map_err(|e| fail("failed to buffer audio data", e))?;
    writer
        .StoreAsync()
        .and_then(|op| op.get())
        .map_err(|e| fail("failed to store audio data", e))?;
    writer
        .FlushAsync()
        .and_then(|op| op.get())
        .map_err(|e| fail("failed to flush audio data", e))?;

    // Detach so dropping the writer does not close the stream.
    writer
        .DetachStream()
        .map_err(|e| fail("failed to detach stream", e))?;
    stream.Seek(0).map_err(|e| fail("failed to rewind stream", e))?;

    Ok(stream)
}
