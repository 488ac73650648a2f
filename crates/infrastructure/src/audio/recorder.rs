//! Microphone capture
//!
//! Recording stops on whichever fires first: the shared stop flag
//! (flipped once by a listener thread when the user presses ENTER) or
//! the maximum duration. The capture loop polls the flag every
//! `poll_interval_ms` while reporting elapsed time. The captured buffer
//! is trimmed to the frames covered by elapsed wall-clock time, never
//! to the allocated buffer length, then written as 16-bit PCM WAV.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use application::ports::RecordedAudio;

use super::AudioError;

/// Microphone capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Capture sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Number of capture channels (default: 1, mono)
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Maximum recording length in seconds (default: 60)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: u64,

    /// Stop-flag poll interval in milliseconds (default: 100)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

const fn default_sample_rate() -> u32 {
    44_100
}

const fn default_channels() -> u16 {
    1
}

const fn default_max_duration() -> u64 {
    60
}

const fn default_poll_interval() -> u64 {
    100
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            max_duration_secs: default_max_duration(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl RecordingConfig {
    /// Validate field ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample_rate must be greater than 0".to_string());
        }
        if self.channels == 0 {
            return Err("channels must be greater than 0".to_string());
        }
        if self.max_duration_secs == 0 {
            return Err("max_duration_secs must be greater than 0".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Blocking microphone recorder built on cpal
#[derive(Debug, Clone)]
pub struct MicrophoneRecorder {
    config: RecordingConfig,
}

impl MicrophoneRecorder {
    #[must_use]
    pub const fn new(config: RecordingConfig) -> Self {
        Self { config }
    }

    /// Record until `stop` is set or the maximum duration elapses.
    ///
    /// Blocks the calling thread; run under `spawn_blocking` from async
    /// code. `on_tick` is invoked once per poll with the elapsed time.
    pub fn record(
        &self,
        stop: &AtomicBool,
        on_tick: &dyn Fn(Duration),
    ) -> Result<RecordedAudio, AudioError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(AudioError::NoInputDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let default_config = device
            .default_input_config()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let sample_format = default_config.sample_format();

        let stream_config = cpal::StreamConfig {
            channels: self.config.channels,
            sample_rate: cpal::SampleRate(self.config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        debug!(device = %device_name, format = ?sample_format, "Opening capture stream");

        let buffer: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
        let err_fn = |err| warn!(error = %err, "Capture stream error");

        let stream = match sample_format {
            SampleFormat::F32 => device.build_input_stream(
                &stream_config,
                capture_into::<f32>(Arc::clone(&buffer)),
                err_fn,
                None,
            ),
            SampleFormat::I16 => device.build_input_stream(
                &stream_config,
                capture_into::<i16>(Arc::clone(&buffer)),
                err_fn,
                None,
            ),
            SampleFormat::U16 => device.build_input_stream(
                &stream_config,
                capture_into::<u16>(Arc::clone(&buffer)),
                err_fn,
                None,
            ),
            other => {
                return Err(AudioError::Device(format!(
                    "Unsupported sample format: {other:?}"
                )));
            }
        }
        .map_err(|e| AudioError::Stream(e.to_string()))?;

        stream.play().map_err(|e| AudioError::Stream(e.to_string()))?;

        let max = Duration::from_secs(self.config.max_duration_secs);
        let poll = Duration::from_millis(self.config.poll_interval_ms);
        let start = Instant::now();

        while !stop.load(Ordering::Acquire) {
            let elapsed = start.elapsed();
            if elapsed >= max {
                debug!("Maximum recording duration reached");
                break;
            }
            on_tick(elapsed);
            std::thread::sleep(poll);
        }

        let elapsed = start.elapsed().min(max);
        drop(stream);

        let samples = buffer
            .lock()
            .map_err(|_| AudioError::Stream("Capture buffer poisoned".to_string()))?
            .clone();

        let samples = trim_to_elapsed(
            samples,
            elapsed,
            self.config.sample_rate,
            self.config.channels,
        );

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = elapsed.as_millis() as u64;
        debug!(samples = samples.len(), duration_ms, "Recording finished");

        let data = encode_wav(&samples, self.config.sample_rate, self.config.channels)?;

        Ok(RecordedAudio {
            data,
            sample_rate: self.config.sample_rate,
            duration_ms,
        })
    }
}

fn capture_into<T>(buffer: Arc<Mutex<Vec<f32>>>) -> impl FnMut(&[T], &cpal::InputCallbackInfo)
where
    T: Sample,
    f32: FromSample<T>,
{
    move |data, _| {
        if let Ok(mut buf) = buffer.lock() {
            buf.extend(data.iter().map(|s| f32::from_sample(*s)));
        }
    }
}

/// Trim a capture buffer to the frames covered by elapsed wall-clock
/// time. The device may deliver more frames than the poll loop
/// observed; trimming by elapsed time keeps the recording length in
/// step with what the user saw.
fn trim_to_elapsed(
    mut samples: Vec<f32>,
    elapsed: Duration,
    sample_rate: u32,
    channels: u16,
) -> Vec<f32> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let wanted =
        (elapsed.as_secs_f64() * f64::from(sample_rate)) as usize * usize::from(channels);
    if samples.len() > wanted {
        samples.truncate(wanted);
    }
    samples
}

/// Encode f32 samples as 16-bit PCM WAV.
fn encode_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>, AudioError> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| AudioError::Encode(e.to_string()))?;
        for &sample in samples {
            #[allow(clippy::cast_possible_truncation)]
            let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(value)
                .map_err(|e| AudioError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioError::Encode(e.to_string()))?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RecordingConfig::default();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.channels, 1);
        assert_eq!(config.max_duration_secs, 60);
        assert_eq!(config.poll_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_zeroes() {
        let config = RecordingConfig {
            sample_rate: 0,
            ..RecordingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RecordingConfig {
            max_duration_secs: 0,
            ..RecordingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn trim_cuts_overfull_buffer_to_elapsed_frames() {
        // 2 seconds of mono at 100 Hz = 200 frames wanted
        let samples = vec![0.0f32; 350];
        let trimmed = trim_to_elapsed(samples, Duration::from_secs(2), 100, 1);
        assert_eq!(trimmed.len(), 200);
    }

    #[test]
    fn trim_never_extends_a_short_buffer() {
        // Stream under-delivered; keep what we have
        let samples = vec![0.0f32; 50];
        let trimmed = trim_to_elapsed(samples, Duration::from_secs(2), 100, 1);
        assert_eq!(trimmed.len(), 50);
    }

    #[test]
    fn trim_accounts_for_channels() {
        let samples = vec![0.0f32; 1000];
        let trimmed = trim_to_elapsed(samples, Duration::from_secs(2), 100, 2);
        assert_eq!(trimmed.len(), 400);
    }

    #[test]
    fn trim_uses_fractional_elapsed() {
        let samples = vec![0.0f32; 1000];
        let trimmed = trim_to_elapsed(samples, Duration::from_millis(1500), 100, 1);
        assert_eq!(trimmed.len(), 150);
    }

    #[test]
    fn encode_produces_readable_wav() {
        let samples: Vec<f32> = (0..441).map(|i| (i as f32 / 441.0).sin()).collect();
        let data = encode_wav(&samples, 44_100, 1).expect("encoding should succeed");

        let reader =
            hound::WavReader::new(Cursor::new(data)).expect("output should parse as WAV");
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 441);
    }

    #[test]
    fn encode_clamps_out_of_range_samples() {
        let data = encode_wav(&[2.0, -2.0], 44_100, 1).expect("encoding should succeed");
        let mut reader = hound::WavReader::new(Cursor::new(data)).expect("should parse");
        let values: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(values, vec![i16::MAX, -i16::MAX]);
    }
}
