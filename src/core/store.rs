use crate::adapters::clock::SystemClock;
use crate::core::ids::IdGenerator;
use crate::core::persist::{PersistedState, DEFAULT_STORAGE_KEY};
use crate::domain::model::{Education, Entry, Experience, Resume, Skill, StoreState};
use crate::domain::ports::{
    Clock, EntryKind, Listener, MutationOutcome, ResumeStore, StateStorage, SubscriptionId,
};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Single source of truth for the session's resumes.
///
/// Every change is written through to `storage` under `key` and then pushed to
/// subscribers. Child-collection operations only touch the current resume, and
/// any saved resume with the same id is kept identical to it.
pub struct DocumentStore<S: StateStorage> {
    state: StoreState,
    storage: S,
    key: String,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: StateStorage> DocumentStore<S> {
    /// Empty store that does not read `storage`.
    pub fn new(storage: S) -> Self {
        Self::with_state(storage, DEFAULT_STORAGE_KEY.to_string(), StoreState::default())
    }

    /// Rehydrates from `storage`. Unreadable state is logged and replaced by an empty store.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match read_state(&storage, &key) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Discarding unreadable resume state '{}': {}", key, e);
                StoreState::default()
            }
        };
        Self::with_state(storage, key, state)
    }

    /// Like [`DocumentStore::open`] but fails instead of discarding unreadable state.
    pub fn load(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let state = read_state(&storage, &key)?;
        Ok(Self::with_state(storage, key, state))
    }

    fn with_state(storage: S, key: String, state: StoreState) -> Self {
        tracing::debug!(
            "Resume store '{}' ready with {} saved resume(s)",
            key,
            state.resumes.len()
        );
        Self {
            state,
            storage,
            key,
            clock: Arc::new(SystemClock),
            ids: IdGenerator::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        let written = PersistedState::encode(&self.state)
            .and_then(|raw| self.storage.save(&self.key, &raw));
        if let Err(e) = written {
            tracing::warn!("Failed to persist resume state '{}': {}", self.key, e);
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    /// Copies the current resume over the saved one with the same id, if any.
    fn mirror_current(&mut self) {
        if let Some(current) = &self.state.current_resume {
            if let Some(saved) = self.state.resumes.iter_mut().find(|r| r.id == current.id) {
                *saved = current.clone();
            }
        }
    }

    fn mutate_current<T: Entry>(
        &mut self,
        select: fn(&mut Resume) -> &mut Vec<T>,
        op: impl FnOnce(&mut Vec<T>) -> MutationOutcome,
    ) -> MutationOutcome {
        let now = self.clock.now();
        let Some(current) = self.state.current_resume.as_mut() else {
            tracing::debug!("Ignoring entry change: no current resume");
            return MutationOutcome::NoCurrentDocument;
        };

        let outcome = op(select(current));
        if outcome == MutationOutcome::DuplicateId {
            tracing::debug!("Ignoring entry change: duplicate id");
            return outcome;
        }

        touch(current, now);
        self.mirror_current();
        self.commit();
        outcome
    }
}

impl<S: StateStorage> ResumeStore for DocumentStore<S> {
    fn state(&self) -> &StoreState {
        &self.state
    }

    fn next_id(&mut self, kind: EntryKind) -> String {
        self.ids.next(kind, self.clock.now())
    }

    fn set_current(&mut self, resume: Resume) {
        self.state.current_resume = Some(resume);
        self.mirror_current();
        self.commit();
    }

    fn create(&mut self, template_id: &str) -> &Resume {
        let mut id = self.next_id(EntryKind::Resume);
        while self.state.resumes.iter().any(|r| r.id == id)
            || self.current().is_some_and(|r| r.id == id)
        {
            id = self.next_id(EntryKind::Resume);
        }

        let resume = Resume::blank(id, template_id, self.clock.now());
        tracing::info!("Created resume {} from template '{}'", resume.id, template_id);

        self.state.resumes.insert(0, resume.clone());
        self.state.current_resume = Some(resume);
        self.commit();
        &self.state.resumes[0]
    }

    fn update(&mut self, mut resume: Resume) -> MutationOutcome {
        let previous = self
            .state
            .resumes
            .iter()
            .chain(self.state.current_resume.iter())
            .filter(|r| r.id == resume.id)
            .map(|r| r.updated_at)
            .max();
        if let Some(previous) = previous {
            resume.updated_at = resume.updated_at.max(previous);
        }
        touch(&mut resume, self.clock.now());

        let outcome = match self.state.resumes.iter_mut().find(|r| r.id == resume.id) {
            Some(saved) => {
                *saved = resume.clone();
                MutationOutcome::Applied
            }
            None => {
                tracing::debug!("Resume {} is not in the saved collection", resume.id);
                MutationOutcome::NotFound
            }
        };

        self.state.current_resume = Some(resume);
        self.commit();
        outcome
    }

    fn remove(&mut self, id: &str) -> MutationOutcome {
        let before = self.state.resumes.len();
        self.state.resumes.retain(|r| r.id != id);
        let removed = self.state.resumes.len() < before;

        let was_current = self.current().is_some_and(|r| r.id == id);
        if was_current {
            self.state.current_resume = None;
        }

        if !removed && !was_current {
            return MutationOutcome::NotFound;
        }

        tracing::info!("Deleted resume {}", id);
        self.commit();
        MutationOutcome::Applied
    }

    fn add_experience(&mut self, experience: Experience) -> MutationOutcome {
        self.mutate_current(|r| &mut r.experiences, |list| add_entry(list, experience))
    }

    fn update_experience(&mut self, id: &str, experience: Experience) -> MutationOutcome {
        self.mutate_current(|r| &mut r.experiences, |list| {
            replace_entry(list, id, experience)
        })
    }

    fn delete_experience(&mut self, id: &str) -> MutationOutcome {
        self.mutate_current(|r| &mut r.experiences, |list| delete_entry(list, id))
    }

    fn add_education(&mut self, education: Education) -> MutationOutcome {
        self.mutate_current(|r| &mut r.education, |list| add_entry(list, education))
    }

    fn update_education(&mut self, id: &str, education: Education) -> MutationOutcome {
        self.mutate_current(|r| &mut r.education, |list| {
            replace_entry(list, id, education)
        })
    }

    fn delete_education(&mut self, id: &str) -> MutationOutcome {
        self.mutate_current(|r| &mut r.education, |list| delete_entry(list, id))
    }

    fn add_skill(&mut self, skill: Skill) -> MutationOutcome {
        self.mutate_current(|r| &mut r.skills, |list| add_entry(list, skill))
    }

    fn update_skill(&mut self, id: &str, skill: Skill) -> MutationOutcome {
        self.mutate_current(|r| &mut r.skills, |list| replace_entry(list, id, skill))
    }

    fn delete_skill(&mut self, id: &str) -> MutationOutcome {
        self.mutate_current(|r| &mut r.skills, |list| delete_entry(list, id))
    }

    fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
        self.notify();
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
        self.notify();
    }

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < before
    }
}

fn read_state<S: StateStorage>(storage: &S, key: &str) -> Result<StoreState> {
    match storage.load(key)? {
        Some(raw) => Ok(PersistedState::from_json(&raw)?.into_state()),
        None => Ok(StoreState::default()),
    }
}

/// `updated_at` must move forward even when the clock has not.
fn touch(resume: &mut Resume, now: DateTime<Utc>) {
    resume.updated_at = if now > resume.updated_at {
        now
    } else {
        resume.updated_at + chrono::Duration::microseconds(1)
    };
}

fn add_entry<T: Entry>(list: &mut Vec<T>, entry: T) -> MutationOutcome {
    if list.iter().any(|e| e.id() == entry.id()) {
        return MutationOutcome::DuplicateId;
    }
    list.push(entry);
    MutationOutcome::Applied
}

fn replace_entry<T: Entry>(list: &mut [T], id: &str, entry: T) -> MutationOutcome {
    if entry.id() != id && list.iter().any(|e| e.id() == entry.id()) {
        return MutationOutcome::DuplicateId;
    }
    match list.iter_mut().find(|e| e.id() == id) {
        Some(slot) => {
            *slot = entry;
            MutationOutcome::Applied
        }
        None => MutationOutcome::NotFound,
    }
}

fn delete_entry<T: Entry>(list: &mut Vec<T>, id: &str) -> MutationOutcome {
    let before = list.len();
    list.retain(|e| e.id() != id);
    if list.len() < before {
        MutationOutcome::Applied
    } else {
        MutationOutcome::NotFound
    }
}
