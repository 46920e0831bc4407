use crate::adapters::clock::SystemClock;
use crate::adapters::mock_assistant::GREETING;
use crate::core::ids::IdGenerator;
use crate::domain::model::{ChatMessage, Resume, Role};
use crate::domain::ports::{Clock, EntryKind, ResumeAdvisor, SpeechRecognizer};
use crate::utils::error::{ResumeError, Result};
use std::sync::Arc;

/// Conversation with the resume assistant, plus optional voice input.
pub struct ChatSession {
    advisor: Arc<dyn ResumeAdvisor>,
    speech: Option<Box<dyn SpeechRecognizer>>,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    messages: Vec<ChatMessage>,
    input: String,
    listening: bool,
    loading: bool,
}

impl ChatSession {
    pub fn new(advisor: Arc<dyn ResumeAdvisor>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let greeting = ChatMessage {
            id: "1".to_string(),
            role: Role::Assistant,
            content: GREETING.to_string(),
            timestamp: clock.now(),
        };
        Self {
            advisor,
            speech: None,
            clock,
            ids: IdGenerator::new(),
            messages: vec![greeting],
            input: String::new(),
            listening: false,
            loading: false,
        }
    }

    pub fn with_speech(mut self, speech: Box<dyn SpeechRecognizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn push(&mut self, role: Role, content: String) -> ChatMessage {
        let now = self.clock.now();
        let message = ChatMessage {
            id: self.ids.next(EntryKind::Message, now),
            role,
            content,
            timestamp: now,
        };
        self.messages.push(message.clone());
        message
    }

    /// Sends `input` and waits for the reply. Blank input is ignored and yields `None`.
    pub async fn send(&mut self, input: &str, resume: &Resume) -> Result<Option<ChatMessage>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        self.push(Role::User, input.to_string());
        self.input.clear();
        self.loading = true;

        let reply = self.advisor.reply(input, resume).await;
        self.loading = false;

        let content = reply?;
        Ok(Some(self.push(Role::Assistant, content)))
    }

    /// Sends whatever is in the input buffer.
    pub async fn send_pending(&mut self, resume: &Resume) -> Result<Option<ChatMessage>> {
        let input = std::mem::take(&mut self.input);
        self.send(&input, resume).await
    }

    /// Starts or stops voice input and returns whether it is now listening.
    pub fn toggle_listening(&mut self) -> Result<bool> {
        let Some(speech) = self.speech.as_mut() else {
            tracing::warn!("Speech recognition not supported");
            return Err(ResumeError::SpeechUnsupported);
        };

        if self.listening {
            speech.stop();
            self.listening = false;
        } else {
            speech.start()?;
            self.listening = true;
        }
        Ok(self.listening)
    }

    /// Appends finished transcripts to the input buffer; interim results are dropped.
    pub fn poll_speech(&mut self) -> usize {
        let Some(speech) = self.speech.as_mut() else {
            return 0;
        };

        let mut appended = 0;
        for transcript in speech.take_transcripts() {
            if transcript.is_final {
                self.input.push(' ');
                self.input.push_str(&transcript.text);
                appended += 1;
            }
        }
        appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock_assistant::MockAssistant;
    use crate::adapters::scheduler::NoDelay;
    use crate::adapters::speech::{NoSpeech, ScriptedSpeech};
    use crate::domain::ports::Transcript;
    use chrono::Utc;

    fn session() -> ChatSession {
        ChatSession::new(Arc::new(MockAssistant::new(Arc::new(NoDelay))))
    }

    fn resume() -> Resume {
        Resume::blank("resume_1", "template-a", Utc::now())
    }

    #[tokio::test]
    async fn test_starts_with_greeting_and_ignores_blank_input() {
        let mut chat = session();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Assistant);

        assert!(chat.send("   ", &resume()).await.unwrap().is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_send_records_both_sides() {
        let mut chat = session();
        let reply = chat
            .send("How do I improve my skills?", &resume())
            .await
            .unwrap()
            .unwrap();

        assert!(reply.content.starts_with("Tips for better skills section:"));
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[1].role, Role::User);
        assert!(chat.messages()[1].id.starts_with("msg_"));
        assert_ne!(chat.messages()[1].id, chat.messages()[2].id);
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_toggle_without_speech_is_unsupported() {
        let mut chat = session();
        assert!(matches!(
            chat.toggle_listening(),
            Err(ResumeError::SpeechUnsupported)
        ));

        let mut chat = session().with_speech(Box::new(NoSpeech));
        assert!(chat.toggle_listening().is_err());
        assert!(!chat.is_listening());
    }

    #[tokio::test]
    async fn test_final_transcripts_fill_the_input() {
        let speech = ScriptedSpeech::new([
            Transcript {
                text: "improve my".to_string(),
                is_final: false,
            },
            Transcript {
                text: "summary".to_string(),
                is_final: true,
            },
        ]);
        let mut chat = session().with_speech(Box::new(speech));

        assert!(chat.toggle_listening().unwrap());
        assert_eq!(chat.poll_speech(), 1);
        assert_eq!(chat.input(), " summary");
        assert!(!chat.toggle_listening().unwrap());

        let reply = chat.send_pending(&resume()).await.unwrap().unwrap();
        assert!(reply.content.starts_with("Tips for a strong professional summary:"));
        assert!(chat.input().is_empty());
    }
}
