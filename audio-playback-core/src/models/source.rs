use std::fmt;

/// Where a player's audio comes from.
///
/// Assigned exactly once, at construction, and immutable afterward. The
/// platform backend materializes it into whatever its native engine
/// consumes.
#[derive(Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Complete audio data held in memory.
    Memory(Vec<u8>),
    /// File name resolved against the platform's asset root
    /// (`ms-appx:///Assets/` on Windows).
    Asset(String),
}

impl AudioSource {
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Memory(data.into())
    }

    pub fn from_asset(file_name: impl Into<String>) -> Self {
        Self::Asset(file_name.into())
    }
}

// Hand-rolled so a Memory source prints its size, not megabytes of samples.
impl fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory(data) => f
                .debug_tuple("Memory")
                .field(&format_args!("{} bytes", data.len()))
                .finish(),
            Self::Asset(name) => f.debug_tuple("Asset").field(name).finish(),
        }
    }
}
