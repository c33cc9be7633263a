//! Host-platform capabilities kept outside the request core.
//!
//! Speech recognition and audio playback belong to whatever host the client
//! runs in. Callers talk to them through these traits; the CLI provides
//! text- and file-based implementations.

mod audio;
mod speech;

use anyhow::Result;

pub use audio::FileAudioOutput;
pub use speech::ReaderSpeechInput;

/// Produces the text the user said (or typed).
#[cfg_attr(test, mockall::automock)]
pub trait SpeechInput {
    /// Returns the full transcript, or `None` if nothing was captured.
    fn transcript(&mut self) -> Result<Option<String>>;
}

/// Plays or stores synthesized speech.
#[cfg_attr(test, mockall::automock)]
pub trait AudioOutput {
    fn play(&self, audio: &[u8]) -> Result<()>;
}
