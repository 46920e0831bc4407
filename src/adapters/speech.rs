use crate::domain::ports::{SpeechRecognizer, Transcript};
use crate::utils::error::{ResumeError, Result};
use std::collections::VecDeque;

/// Host without speech-to-text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechRecognizer for NoSpeech {
    fn start(&mut self) -> Result<()> {
        Err(ResumeError::SpeechUnsupported)
    }

    fn stop(&mut self) {}

    fn take_transcripts(&mut self) -> Vec<Transcript> {
        Vec::new()
    }
}

/// Replays queued transcripts while listening. Used where no real recognizer exists.
#[derive(Debug, Default)]
pub struct ScriptedSpeech {
    queued: VecDeque<Transcript>,
    listening: bool,
}

impl ScriptedSpeech {
    pub fn new(transcripts: impl IntoIterator<Item = Transcript>) -> Self {
        Self {
            queued: transcripts.into_iter().collect(),
            listening: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }
}

impl SpeechRecognizer for ScriptedSpeech {
    fn start(&mut self) -> Result<()> {
        self.listening = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.listening = false;
    }

    fn take_transcripts(&mut self) -> Vec<Transcript> {
        if !self.listening {
            return Vec::new();
        }
        self.queued.drain(..).collect()
    }
}
