use anyhow::{Context, Result};
use std::io::Read;

use super::SpeechInput;

/// Takes the transcript from a reader, typically stdin.
pub struct ReaderSpeechInput<T: Read> {
    reader: T,
}

impl<T: Read> ReaderSpeechInput<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl ReaderSpeechInput<std::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin())
    }
}

impl<T: Read> SpeechInput for ReaderSpeechInput<T> {
    #[tracing::instrument(skip(self))]
    fn transcript(&mut self) -> Result<Option<String>> {
        let mut text = String::new();
        self.reader
            .read_to_string(&mut text)
            .context("Failed to read input text")?;

        let text = text.trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_transcript_is_trimmed() {
        let mut input = ReaderSpeechInput::new(Cursor::new("  good morning\n"));
        assert_eq!(
            input.transcript().unwrap(),
            Some("good morning".to_string())
        );
    }

    #[test]
    fn test_reader_empty_transcript() {
        let mut input = ReaderSpeechInput::new(Cursor::new("\n\n"));
        assert_eq!(input.transcript().unwrap(), None);
    }
}
