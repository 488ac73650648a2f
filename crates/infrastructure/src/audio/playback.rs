//! Audio playback via rodio

use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use super::AudioError;

/// Play encoded audio (MP3 or WAV) to completion on the default output
/// device. Blocks the calling thread; run under `spawn_blocking` from
/// async code.
pub fn play_encoded(data: Vec<u8>) -> Result<(), AudioError> {
    let (_stream, handle) =
        OutputStream::try_default().map_err(|e| AudioError::Playback(e.to_string()))?;
    let sink = Sink::try_new(&handle).map_err(|e| AudioError::Playback(e.to_string()))?;

    let source =
        Decoder::new(Cursor::new(data)).map_err(|e| AudioError::Playback(e.to_string()))?;

    debug!("Starting playback");
    sink.append(source);
    sink.sleep_until_end();
    debug!("Playback finished");

    Ok(())
}
