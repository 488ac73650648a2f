//! Audio adapter - Implements AudioPort with cpal capture and rodio playback

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use application::{
    error::ApplicationError,
    ports::{AudioEncoding, AudioPort, RecordedAudio},
};
use async_trait::async_trait;
use tracing::instrument;

use crate::audio::{MicrophoneRecorder, RecordingConfig, playback};

/// Adapter for local microphone capture and speaker playback
#[derive(Debug, Clone)]
pub struct CpalAudioAdapter {
    recorder: MicrophoneRecorder,
}

impl CpalAudioAdapter {
    #[must_use]
    pub const fn new(config: RecordingConfig) -> Self {
        Self {
            recorder: MicrophoneRecorder::new(config),
        }
    }
}

#[async_trait]
impl AudioPort for CpalAudioAdapter {
    /// Record until the user presses ENTER or the maximum duration
    /// elapses, whichever comes first.
    #[instrument(skip(self))]
    async fn record(&self) -> Result<RecordedAudio, ApplicationError> {
        let stop = Arc::new(AtomicBool::new(false));

        // Listener thread writes the flag at most once, then exits.
        let stop_signal = Arc::clone(&stop);
        let listener = std::thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
            stop_signal.store(true, Ordering::Release);
        });

        let recorder = self.recorder.clone();
        let stop_flag = Arc::clone(&stop);
        let recorded = tokio::task::spawn_blocking(move || {
            recorder.record(&stop_flag, &|elapsed| {
                #[allow(clippy::print_stdout)]
                {
                    print!("\r***   Recording: {:.1}s", elapsed.as_secs_f32());
                    let _ = std::io::stdout().flush();
                }
            })
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
        .map_err(|e| ApplicationError::Audio(e.to_string()))?;

        // If the max duration fired first, the listener is still blocked
        // on stdin. Ask for the ENTER it will consume so the keystroke
        // is not stolen from the next prompt.
        if !stop.load(Ordering::Acquire) {
            #[allow(clippy::print_stdout)]
            {
                println!("\n***   Time limit reached. Press ENTER to continue.");
            }
            let _ = tokio::task::spawn_blocking(move || listener.join()).await;
        }

        Ok(recorded)
    }

    /// Play encoded audio to completion.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn play(
        &self,
        data: Vec<u8>,
        _encoding: AudioEncoding,
    ) -> Result<(), ApplicationError> {
        tokio::task::spawn_blocking(move || playback::play_encoded(data))
            .await
            .map_err(|e| ApplicationError::Internal(e.to_string()))?
            .map_err(|e| ApplicationError::Audio(e.to_string()))
    }
}
