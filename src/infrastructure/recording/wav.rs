//! WAV persistence using hound
//!
//! Files are written in the capture format (mono, 16 kHz, 16-bit PCM) with
//! a timestamped name, so repeated recordings in one session never collide.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::application::ports::{AudioStore, PersistError};
use crate::domain::recording::format::{BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE};
use crate::domain::recording::AudioBuffer;

/// Write a buffer to `path` as a PCM WAV file. An empty buffer produces a
/// valid header-only file.
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<(), PersistError> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| PersistError::WriteFailed(e.to_string()))?;

    for frame in buffer.frames() {
        for &sample in frame.samples() {
            writer
                .write_sample(sample)
                .map_err(|e| PersistError::WriteFailed(e.to_string()))?;
        }
    }

    writer
        .finalize()
        .map_err(|e| PersistError::WriteFailed(e.to_string()))?;

    Ok(())
}

/// Audio store writing timestamped WAV files into a fixed directory
pub struct WavStore {
    output_dir: PathBuf,
}

impl WavStore {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    fn next_path(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        self.output_dir.join(format!("voxclip_{}.wav", timestamp))
    }
}

#[async_trait]
impl AudioStore for WavStore {
    async fn save(&self, buffer: &AudioBuffer) -> Result<PathBuf, PersistError> {
        let path = self.next_path();
        let buffer = buffer.clone();
        let write_path = path.clone();

        tokio::task::spawn_blocking(move || write_wav(&buffer, &write_path))
            .await
            .map_err(|e| PersistError::WriteFailed(format!("Task join error: {}", e)))??;

        Ok(path)
    }
}
