use crate::domain::model::{Resume, StoreState};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "resumedia-store";

/// On-disk layout: `{ "currentResume": Resume | null, "resumes": [Resume] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub current_resume: Option<Resume>,
    #[serde(default)]
    pub resumes: Vec<Resume>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedView<'a> {
    current_resume: Option<&'a Resume>,
    resumes: &'a [Resume],
}

impl PersistedState {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serializes the persisted subset of `state` without cloning it.
    pub fn encode(state: &StoreState) -> Result<String> {
        let view = PersistedView {
            current_resume: state.current_resume.as_ref(),
            resumes: &state.resumes,
        };
        Ok(serde_json::to_string(&view)?)
    }

    pub fn into_state(self) -> StoreState {
        StoreState {
            current_resume: self.current_resume,
            resumes: self.resumes,
            is_loading: false,
            error: None,
        }
    }
}
