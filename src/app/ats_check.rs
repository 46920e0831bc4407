use crate::domain::model::{AtsReport, FileRef};
use crate::domain::ports::{MutationOutcome, ResumeScorer, ResumeStore};
use crate::utils::error::{ResumeError, Result};
use crate::utils::validation::validate_file_extension;
use std::sync::{Arc, Mutex, MutexGuard};

pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "doc"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtsCheckState {
    pub file: Option<FileRef>,
    pub report: Option<AtsReport>,
    pub in_flight: usize,
}

/// The ATS-check page: pick a file, run the scorer, show the latest report.
///
/// Analyses are not cancellable. Several can run at once; whichever finishes
/// last owns the displayed report.
pub struct AtsCheckSession {
    scorer: Arc<dyn ResumeScorer>,
    state: Mutex<AtsCheckState>,
}

impl AtsCheckSession {
    pub fn new(scorer: Arc<dyn ResumeScorer>) -> Self {
        Self {
            scorer,
            state: Mutex::new(AtsCheckState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AtsCheckState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn select_file(&self, file: FileRef) -> Result<()> {
        validate_file_extension("file", &file.name, &ACCEPTED_EXTENSIONS).map_err(|_| {
            ResumeError::UnsupportedFileType {
                name: file.name.clone(),
            }
        })?;
        tracing::debug!("Selected '{}' for ATS check", file.name);
        self.lock().file = Some(file);
        Ok(())
    }

    pub async fn analyze(&self) -> Result<AtsReport> {
        let file = {
            let mut state = self.lock();
            let file = state.file.clone().ok_or(ResumeError::NoFileSelected)?;
            state.in_flight += 1;
            file
        };
        // 呼叫端丟棄 future 時也要歸還計數
        let _in_flight = InFlight(self);

        let result = self.scorer.analyze(&file).await;

        if let Ok(report) = &result {
            self.lock().report = Some(report.clone());
        }
        result
    }

    pub fn is_analyzing(&self) -> bool {
        self.lock().in_flight > 0
    }

    pub fn report(&self) -> Option<AtsReport> {
        self.lock().report.clone()
    }

    pub fn snapshot(&self) -> AtsCheckState {
        self.lock().clone()
    }

    /// Back to the upload step; the selected file is kept.
    pub fn reset(&self) {
        self.lock().report = None;
    }
}

/// Stores `score` on the saved resume `id`. `NotFound` when no saved resume has that id.
pub fn attach_score<R: ResumeStore + ?Sized>(
    store: &mut R,
    id: &str,
    score: u32,
) -> MutationOutcome {
    let Some(mut resume) = store.find(id).cloned() else {
        return MutationOutcome::NotFound;
    };
    resume.ats_score = Some(score);
    store.update(resume)
}

struct InFlight<'a>(&'a AtsCheckSession);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.0.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}
