/// Pages of the application, keyed by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    ResumeMaker,
    AtsCheck,
    Resumes,
    Jobs,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::ResumeMaker,
        Route::AtsCheck,
        Route::Resumes,
        Route::Jobs,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::ResumeMaker => "/resume-maker",
            Route::AtsCheck => "/ats-check",
            Route::Resumes => "/resumes",
            Route::Jobs => "/jobs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::ResumeMaker => "Resume Builder",
            Route::AtsCheck => "ATS Check",
            Route::Resumes => "My Resumes",
            Route::Jobs => "Jobs",
        }
    }

    /// Pages that exist in the navigation but have no content yet.
    pub fn is_placeholder(self) -> bool {
        matches!(self, Route::Jobs)
    }

    /// Trailing slashes are ignored; query strings are not supported.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }
}
