use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RESUME_TITLE: &str = "New Resume";

/// Anything stored in one of a resume's child lists.
pub trait Entry {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub template_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    /// Blank draft with every text field empty.
    pub fn blank(id: impl Into<String>, template_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_RESUME_TITLE.to_string(),
            template_id: template_id.into(),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            summary: String::new(),
            experiences: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            is_draft: true,
            ats_score: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Title => self.title = value,
            ContactField::FullName => self.full_name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::Location => self.location = value,
            ContactField::Summary => self.summary = value,
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Title => &self.title,
            ContactField::FullName => &self.full_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Location => &self.location,
            ContactField::Summary => &self.summary,
        }
    }
}

/// Everything the document store holds. Only the first two fields are persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub current_resume: Option<Resume>,
    pub resumes: Vec<Resume>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    /// When set, `end_date` is kept but not shown.
    pub is_currently: bool,
    pub description: String,
}

impl Experience {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Date range as shown on the printable page.
    pub fn date_range(&self) -> String {
        if self.is_currently {
            format!("{} - Present", self.start_date)
        } else if !self.end_date.is_empty() {
            format!("{} - {}", self.start_date, self.end_date)
        } else {
            self.start_date.clone()
        }
    }
}

impl Entry for Experience {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub graduation_date: String,
}

impl Education {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Entry for Education {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub proficiency: Proficiency,
}

impl Skill {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Entry for Skill {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Proficiency::Beginner => "beginner",
            Proficiency::Intermediate => "intermediate",
            Proficiency::Expert => "expert",
        };
        f.write_str(s)
    }
}

impl FromStr for Proficiency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Proficiency::Beginner),
            "intermediate" => Ok(Proficiency::Intermediate),
            "expert" => Ok(Proficiency::Expert),
            other => Err(format!(
                "unknown proficiency '{}', expected beginner, intermediate or expert",
                other
            )),
        }
    }
}

/// Top-level text fields of a resume that the editor can change directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Title,
    FullName,
    Email,
    Phone,
    Location,
    Summary,
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "title" => Ok(ContactField::Title),
            "fullname" | "name" => Ok(ContactField::FullName),
            "email" => Ok(ContactField::Email),
            "phone" => Ok(ContactField::Phone),
            "location" => Ok(ContactField::Location),
            "summary" => Ok(ContactField::Summary),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// Reference to a resume file picked for an ATS check. The file is never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub path: Option<std::path::PathBuf>,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn from_path(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            path: Some(path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsIssue {
    pub id: String,
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsSuggestion {
    pub id: String,
    pub text: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32,
    pub issues: Vec<AtsIssue>,
    pub suggestions: Vec<AtsSuggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
