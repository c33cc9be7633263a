use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use super::AudioOutput;
use crate::runtime::Runtime;

/// Saves audio to a file instead of playing it.
pub struct FileAudioOutput<R: Runtime> {
    runtime: Arc<R>,
    path: PathBuf,
}

impl<R: Runtime> FileAudioOutput<R> {
    pub fn new(runtime: Arc<R>, path: PathBuf) -> Self {
        Self { runtime, path }
    }
}

impl<R: Runtime> AudioOutput for FileAudioOutput<R> {
    #[tracing::instrument(skip(self, audio))]
    fn play(&self, audio: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.runtime.create_dir_all(parent)?;
        }
        self.runtime
            .write(&self.path, audio)
            .with_context(|| format!("Failed to save audio to {:?}", self.path))?;
        info!("Saved {} bytes of audio to {:?}", audio.len(), self.path);
        Ok(())
    }
}
