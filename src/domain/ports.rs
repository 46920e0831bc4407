use crate::domain::model::{
    AtsReport, Education, Experience, FileRef, Resume, Skill, StoreState,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Durable key/value slot for the store's persisted state.
pub trait StateStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Timer used by the simulated services, so tests can run without real waits.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn delay(&self, duration: Duration);
}

#[async_trait]
pub trait ResumeScorer: Send + Sync {
    async fn analyze(&self, file: &FileRef) -> Result<AtsReport>;
}

#[async_trait]
pub trait ResumeAdvisor: Send + Sync {
    async fn reply(&self, input: &str, resume: &Resume) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub is_final: bool,
}

/// Optional speech-to-text capability of the host.
pub trait SpeechRecognizer: Send {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
    /// Transcripts produced since the last call.
    fn take_transcripts(&mut self) -> Vec<Transcript>;
}

/// What a store mutation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    NotFound,
    NoCurrentDocument,
    DuplicateId,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == MutationOutcome::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Resume,
    Experience,
    Education,
    Skill,
    Message,
}

impl EntryKind {
    pub fn prefix(self) -> &'static str {
        match self {
            EntryKind::Resume => "resume",
            EntryKind::Experience => "exp",
            EntryKind::Education => "edu",
            EntryKind::Skill => "skill",
            EntryKind::Message => "msg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub type Listener = Box<dyn Fn(&StoreState) + Send + Sync>;

/// The resume document store as seen by views and sessions.
pub trait ResumeStore {
    fn state(&self) -> &StoreState;

    fn current(&self) -> Option<&Resume> {
        self.state().current_resume.as_ref()
    }

    fn resumes(&self) -> &[Resume] {
        &self.state().resumes
    }

    fn find(&self, id: &str) -> Option<&Resume> {
        self.resumes().iter().find(|r| r.id == id)
    }

    fn error(&self) -> Option<&str> {
        self.state().error.as_deref()
    }

    fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    fn next_id(&mut self, kind: EntryKind) -> String;

    fn set_current(&mut self, resume: Resume);
    fn create(&mut self, template_id: &str) -> &Resume;
    fn update(&mut self, resume: Resume) -> MutationOutcome;
    fn remove(&mut self, id: &str) -> MutationOutcome;

    fn add_experience(&mut self, experience: Experience) -> MutationOutcome;
    fn update_experience(&mut self, id: &str, experience: Experience) -> MutationOutcome;
    fn delete_experience(&mut self, id: &str) -> MutationOutcome;

    fn add_education(&mut self, education: Education) -> MutationOutcome;
    fn update_education(&mut self, id: &str, education: Education) -> MutationOutcome;
    fn delete_education(&mut self, id: &str) -> MutationOutcome;

    fn add_skill(&mut self, skill: Skill) -> MutationOutcome;
    fn update_skill(&mut self, id: &str, skill: Skill) -> MutationOutcome;
    fn delete_skill(&mut self, id: &str) -> MutationOutcome;

    fn set_error(&mut self, error: Option<String>);

    fn clear_error(&mut self) {
        self.set_error(None);
    }

    fn set_loading(&mut self, loading: bool);

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}
