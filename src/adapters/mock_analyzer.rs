use crate::domain::model::{AtsIssue, AtsReport, AtsSuggestion, FileRef, Impact, IssueSeverity};
use crate::domain::ports::{ResumeScorer, Scheduler};
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_MIN_SCORE: u32 = 60;
pub const DEFAULT_MAX_SCORE: u32 = 99;

/// Stand-in ATS scorer: waits, then reports a random score and a fixed list of
/// findings. The file is never opened.
pub struct MockAnalyzer {
    scheduler: Arc<dyn Scheduler>,
    delay: Duration,
    min_score: u32,
    max_score: u32,
    rng: Mutex<StdRng>,
}

impl MockAnalyzer {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            delay: DEFAULT_ANALYSIS_DELAY,
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Inclusive bounds; swapped if given backwards.
    pub fn with_score_range(mut self, min_score: u32, max_score: u32) -> Self {
        self.min_score = min_score.min(max_score);
        self.max_score = min_score.max(max_score);
        self
    }

    fn roll_score(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(self.min_score..=self.max_score)
    }
}

#[async_trait]
impl ResumeScorer for MockAnalyzer {
    async fn analyze(&self, file: &FileRef) -> Result<AtsReport> {
        tracing::debug!("Analyzing '{}' (simulated, {:?})", file.name, self.delay);
        self.scheduler.delay(self.delay).await;

        let report = AtsReport {
            score: self.roll_score(),
            issues: fixed_issues(),
            suggestions: fixed_suggestions(),
        };
        tracing::info!("ATS analysis of '{}' scored {}", file.name, report.score);
        Ok(report)
    }
}

fn fixed_issues() -> Vec<AtsIssue> {
    vec![
        AtsIssue {
            id: "1".to_string(),
            severity: IssueSeverity::Error,
            title: "Missing contact information".to_string(),
            description: "Email address not found in resume".to_string(),
            suggestion: Some("Add your email address in the header section".to_string()),
        },
        AtsIssue {
            id: "2".to_string(),
            severity: IssueSeverity::Warning,
            title: "Weak action verbs".to_string(),
            description: "Some job descriptions use passive language".to_string(),
            suggestion: Some(
                "Start descriptions with strong verbs like \"Managed\", \"Designed\", \"Implemented\""
                    .to_string(),
            ),
        },
        AtsIssue {
            id: "3".to_string(),
            severity: IssueSeverity::Warning,
            title: "Missing industry keywords".to_string(),
            description: "Consider adding more industry-specific terms".to_string(),
            suggestion: Some("Add keywords from job descriptions you're targeting".to_string()),
        },
    ]
}

fn fixed_suggestions() -> Vec<AtsSuggestion> {
    [
        ("Add measurable achievements", Impact::High),
        ("Include relevant certifications", Impact::High),
        ("Optimize formatting for ATS readability", Impact::Medium),
        ("Use consistent date formats", Impact::Medium),
        ("Add more keywords from target job descriptions", Impact::High),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (text, impact))| AtsSuggestion {
        id: (i + 1).to_string(),
        text: text.to_string(),
        impact,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scheduler::{NoDelay, TokioScheduler};

    #[tokio::test]
    async fn test_report_shape_is_fixed() {
        let analyzer = MockAnalyzer::new(Arc::new(NoDelay)).with_seed(7);
        let report = analyzer.analyze(&FileRef::new("resume.pdf")).await.unwrap();

        assert!((60..=99).contains(&report.score));
        assert_eq!(report.issues.len(), 3);
        assert_eq!(report.issues[0].severity, IssueSeverity::Error);
        assert_eq!(report.suggestions.len(), 5);
        assert_eq!(report.suggestions[2].impact, Impact::Medium);
        assert_eq!(report.suggestions[4].id, "5");
    }

    #[tokio::test]
    async fn test_scores_stay_in_range() {
        let analyzer = MockAnalyzer::new(Arc::new(NoDelay)).with_seed(42);
        for _ in 0..200 {
            let report = analyzer.analyze(&FileRef::new("a.docx")).await.unwrap();
            assert!(report.score >= DEFAULT_MIN_SCORE && report.score <= DEFAULT_MAX_SCORE);
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_scores() {
        let a = MockAnalyzer::new(Arc::new(NoDelay)).with_seed(1);
        let b = MockAnalyzer::new(Arc::new(NoDelay)).with_seed(1);
        let file = FileRef::new("resume.pdf");
        for _ in 0..5 {
            assert_eq!(
                a.analyze(&file).await.unwrap().score,
                b.analyze(&file).await.unwrap().score
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_takes_two_seconds() {
        let analyzer = MockAnalyzer::new(Arc::new(TokioScheduler));
        let start = tokio::time::Instant::now();
        analyzer.analyze(&FileRef::new("resume.pdf")).await.unwrap();
        assert!(start.elapsed() >= DEFAULT_ANALYSIS_DELAY);
    }
}
