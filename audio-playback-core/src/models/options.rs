/// Options accepted at player construction.
///
/// Part of every constructor signature for parity across platform
/// backends. The Windows backend currently consumes none of them; mobile
/// backends use them for platform audio attributes (content type, focus
/// handling).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioPlayerOptions {}
