//! Ambient music playback.
//!
//! One looping track: started on successful login, stopped and rewound on
//! clear. Every failure path (no device, no file, undecodable audio)
//! degrades to silence; the game never depends on sound.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

const AMBIENT_VOLUME: f32 = 0.5;

/// Controller for the looping ambient track.
pub struct AmbientAudio {
    track: Option<PathBuf>,
    // The stream must outlive any sink playing on it.
    stream: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
}

impl AmbientAudio {
    /// Create a controller for the given track, opening the default audio
    /// device. A missing device leaves the controller silent.
    pub fn new(track: Option<PathBuf>) -> Self {
        let stream = match &track {
            Some(_) => OutputStream::try_default().ok(),
            None => None,
        };
        if track.is_some() && stream.is_none() {
            tracing::warn!("no audio device, ambient music disabled");
        }
        Self {
            track,
            stream,
            sink: None,
        }
    }

    /// A controller that never plays anything.
    pub fn disabled() -> Self {
        Self {
            track: None,
            stream: None,
            sink: None,
        }
    }

    /// Start the looping track. Does nothing while already playing.
    pub fn play(&mut self) {
        if self.sink.is_some() {
            return;
        }
        let (Some(track), Some((_, handle))) = (&self.track, &self.stream) else {
            return;
        };
        let Ok(file) = File::open(track) else {
            tracing::warn!(track = %track.display(), "ambient track not found");
            return;
        };
        let Ok(source) = Decoder::new_looped(BufReader::new(file)) else {
            tracing::warn!(track = %track.display(), "ambient track not decodable");
            return;
        };
        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        sink.set_volume(AMBIENT_VOLUME);
        sink.append(source);
        self.sink = Some(sink);
    }

    /// Stop playback. The next `play` starts the track from the beginning.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
