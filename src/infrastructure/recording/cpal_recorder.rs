//! Microphone capture using cpal
//!
//! Speech-optimized settings: mono, 16 kHz, 16-bit PCM, read in fixed
//! chunks. Devices that cannot capture at 16 kHz are recorded at their own
//! rate and resampled when the buffer is frozen.
//!
//! cpal delivers samples through a callback; the capture loop itself runs on
//! a blocking thread (cpal::Stream is not Send) and drains the callback
//! queue one chunk at a time so the stop checks stay interleaved with reads.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration as StdDuration, Instant};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};

use crate::application::capture::{CaptureEngine, ChunkSource};
use crate::application::ports::{CaptureCallbacks, CaptureError, CaptureOutcome, Recorder};
use crate::domain::recording::format::{CHUNK_SAMPLES, SAMPLE_RATE};
use crate::domain::recording::{AudioBuffer, Duration, Frame};
use crate::infrastructure::input::StdinStopPoll;

type SampleQueue = Arc<Mutex<VecDeque<i16>>>;

/// How long a chunk read may wait on the callback queue before the stream
/// is considered stalled
const STALL_TIMEOUT: StdDuration = StdDuration::from_secs(1);

/// Audio recorder using cpal
pub struct CpalRecorder;

impl CpalRecorder {
    /// Create a new cpal-based recorder. The device is opened per
    /// recording, not here.
    pub fn new() -> Self {
        Self
    }

    /// Get the default input device
    fn input_device() -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        host.default_input_device().ok_or(CaptureError::NoDevice)
    }

    /// Get a suitable input configuration.
    /// Prefer mono and configs that include the 16 kHz target rate.
    fn input_config(device: &cpal::Device) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| CaptureError::OpenFailed(format!("Failed to get configs: {}", e)))?;

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            // Only consider i16 or f32 formats
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= SAMPLE_RATE
                && config.max_sample_rate().0 >= SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range =
            best_config.ok_or(CaptureError::OpenFailed("No suitable config found".into()))?;

        let sample_rate = if config_range.min_sample_rate().0 <= SAMPLE_RATE
            && config_range.max_sample_rate().0 >= SAMPLE_RATE
        {
            SampleRate(SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix multi-channel samples down to mono
    fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Resample audio from the device rate to 16 kHz
    fn resample_to_16k(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, CaptureError> {
        if source_rate == SAMPLE_RATE {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = SAMPLE_RATE as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            SAMPLE_RATE as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| CaptureError::CaptureFailed(format!("Resampler init failed: {}", e)))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());
            let mut chunk = samples_f32[input_pos..end_pos].to_vec();

            // Pad the tail so the fixed-input resampler accepts it
            if chunk.len() < frames_needed {
                chunk.resize(frames_needed, 0.0);
            }

            let resampled = resampler
                .process(&[chunk], None)
                .map_err(|e| CaptureError::CaptureFailed(format!("Resampling failed: {}", e)))?;

            output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
            input_pos = end_pos;
        }

        output.truncate(output_len);

        Ok(output)
    }

    /// Normalize a frozen buffer to the fixed 16 kHz format, re-chunked
    /// into frames.
    fn normalize(buffer: AudioBuffer, source_rate: u32) -> Result<AudioBuffer, CaptureError> {
        if source_rate == SAMPLE_RATE || buffer.is_empty() {
            return Ok(buffer);
        }

        let samples = buffer.into_samples();
        let resampled = Self::resample_to_16k(&samples, source_rate)?;
        Ok(AudioBuffer::from_samples(&resampled))
    }

    /// Build the input stream with a callback feeding the sample queue
    fn build_stream(
        device: &cpal::Device,
        config: &StreamConfig,
        sample_format: SampleFormat,
        queue: SampleQueue,
    ) -> Result<cpal::Stream, CaptureError> {
        let channels = config.channels;
        let err_fn = |err: cpal::StreamError| eprintln!("Audio stream error: {}", err);

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let mono = CpalRecorder::downmix(data, channels);
                    if let Ok(mut q) = queue.lock() {
                        q.extend(mono);
                    }
                },
                err_fn,
                None,
            ),

            SampleFormat::F32 => device.build_input_stream(
                config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let i16_data: Vec<i16> = data.iter().map(|&s| (s * 32767.0) as i16).collect();
                    let mono = CpalRecorder::downmix(&i16_data, channels);
                    if let Ok(mut q) = queue.lock() {
                        q.extend(mono);
                    }
                },
                err_fn,
                None,
            ),

            _ => {
                return Err(CaptureError::OpenFailed(
                    "Unsupported sample format".into(),
                ))
            }
        };

        stream.map_err(|e| CaptureError::OpenFailed(e.to_string()))
    }

    /// Run one recording to completion on the current (blocking) thread.
    /// The stream is a local, so the device is released on every exit path,
    /// including tick errors.
    fn record_blocking(
        max_duration: Duration,
        callbacks: CaptureCallbacks,
    ) -> Result<CaptureOutcome, CaptureError> {
        let device = Self::input_device()?;
        let (config, sample_format) = Self::input_config(&device)?;
        let device_rate = config.sample_rate.0;

        let queue: SampleQueue = Arc::new(Mutex::new(VecDeque::new()));
        let stream = Self::build_stream(&device, &config, sample_format, Arc::clone(&queue))?;
        stream
            .play()
            .map_err(|e| CaptureError::OpenFailed(e.to_string()))?;

        let mut engine = CaptureEngine::new(max_duration, Duration::warning_time());
        let mut source = QueueChunkSource::new(queue);
        let mut stop = StdinStopPoll::new();

        let start = Instant::now();
        let max_secs = max_duration.as_secs();
        let mut last_reported = u64::MAX;

        let reason = loop {
            let elapsed = start.elapsed();
            let outcome = engine.tick(elapsed, &mut source, &mut stop)?;

            if outcome.warned {
                if let Some(ref warn) = callbacks.on_warning {
                    warn(max_secs.saturating_sub(elapsed.as_secs()));
                }
            }

            if let Some(reason) = outcome.stopped {
                break reason;
            }

            if let Some(ref progress) = callbacks.on_progress {
                let secs = elapsed.as_secs();
                if secs != last_reported {
                    progress(secs, max_secs);
                    last_reported = secs;
                }
            }
        };

        // Release the device before any post-processing
        drop(stream);

        let buffer = Self::normalize(engine.into_buffer(), device_rate)?;

        Ok(CaptureOutcome { buffer, reason })
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recorder for CpalRecorder {
    async fn record(
        &self,
        max_duration: Duration,
        callbacks: CaptureCallbacks,
    ) -> Result<CaptureOutcome, CaptureError> {
        tokio::task::spawn_blocking(move || Self::record_blocking(max_duration, callbacks))
            .await
            .map_err(|e| CaptureError::CaptureFailed(format!("Task join error: {}", e)))?
    }
}

/// Chunk source draining the callback queue, one fixed-size chunk per read
struct QueueChunkSource {
    queue: SampleQueue,
}

impl QueueChunkSource {
    fn new(queue: SampleQueue) -> Self {
        Self { queue }
    }
}

impl ChunkSource for QueueChunkSource {
    fn read_chunk(&mut self) -> Result<Frame, CaptureError> {
        let deadline = Instant::now() + STALL_TIMEOUT;

        loop {
            {
                let mut q = self.queue.lock().unwrap_or_else(|e| e.into_inner());
                if q.len() >= CHUNK_SAMPLES {
                    let samples: Vec<i16> = q.drain(..CHUNK_SAMPLES).collect();
                    return Ok(Frame::new(samples));
                }
            }

            if Instant::now() >= deadline {
                return Err(CaptureError::ReadFailed("audio stream stalled".into()));
            }

            std::thread::sleep(StdDuration::from_millis(5));
        }
    }
}
