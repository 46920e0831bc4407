use crate::domain::model::Resume;
use crate::domain::ports::{ResumeAdvisor, Scheduler};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_secs(1);

pub const GREETING: &str = "Hi! I'm your AI Resume Assistant. I can help you improve your resume by:
• Suggesting better job descriptions
• Adding keywords that ATS systems look for
• Improving your professional summary
• Formatting your experience better

What would you like help with?";

/// Which canned answer a message triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    JobDescription,
    Summary,
    Skills,
    Menu,
}

impl Topic {
    /// First matching trigger wins, checked in the order job, summary, skill.
    pub fn detect(input: &str) -> Self {
        let lower = input.to_lowercase();
        if lower.contains("job") || lower.contains("describe") {
            Topic::JobDescription
        } else if lower.contains("summary") || lower.contains("profile") {
            Topic::Summary
        } else if lower.contains("skill") {
            Topic::Skills
        } else {
            Topic::Menu
        }
    }
}

/// Keyword-triggered canned replies, delivered after a fixed delay.
pub struct MockAssistant {
    scheduler: Arc<dyn Scheduler>,
    delay: Duration,
}

impl MockAssistant {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            delay: DEFAULT_REPLY_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ResumeAdvisor for MockAssistant {
    async fn reply(&self, input: &str, resume: &Resume) -> Result<String> {
        let topic = Topic::detect(input);
        tracing::debug!("Assistant topic {:?}", topic);
        self.scheduler.delay(self.delay).await;
        Ok(render(topic, resume))
    }
}

pub fn render(topic: Topic, resume: &Resume) -> String {
    match topic {
        Topic::JobDescription => {
            let company = resume
                .experiences
                .first()
                .map(|e| e.company.as_str())
                .filter(|c| !c.is_empty())
                .unwrap_or("job site");
            format!(
                "Here are tips to improve your job descriptions:

1. Start with strong action verbs: \"Managed\", \"Designed\", \"Implemented\", \"Optimized\"
2. Add metrics: \"Increased efficiency by 30%\", \"Saved $10K annually\"
3. Use industry keywords from the job posting
4. Focus on impact, not just duties

For example, instead of \"Responsible for safety\", write:
\"Maintained perfect safety record on {}, ensuring OSHA compliance for 20+ team members\"",
                company
            )
        }
        Topic::Summary => {
            let who = if resume.full_name.is_empty() {
                "tradesperson"
            } else {
                "professional"
            };
            format!(
                "Tips for a strong professional summary:

1. Keep it 2-3 sentences max
2. Include your key skills and experience
3. Add a unique achievement or specialty
4. Use keywords relevant to your profession

Example for your field:
\"Experienced {} with [X] years of hands-on expertise. Proven track record of [key achievement]. Skilled in [top 3 skills]. Seeking to leverage expertise to [career goal].\"",
                who
            )
        }
        Topic::Skills => "Tips for better skills section:

1. List 5-10 most relevant skills
2. Prioritize by relevance to target job
3. Group similar skills together
4. Include technical and soft skills

For your profession, consider adding:
• OSHA Certifications
• Equipment Operation
• Safety Compliance
• Team Leadership
• Blueprint Reading"
            .to_string(),
        Topic::Menu => "I can help you with:
• ✏️ Improving your job descriptions
• 📝 Enhancing your professional summary
• 🎯 Optimizing keywords for ATS
• 🛠️ Adding more relevant skills
• 📊 Formatting tips

What would you like to improve?"
            .to_string(),
    }
}
