use crate::domain::model::Resume;
use std::fmt::Write;

const RULE: &str = "----------------------------------------";

/// Renders `resume` as a printable plain-text page.
pub fn render_preview(resume: &Resume) -> String {
    let mut out = String::new();

    let name = if resume.full_name.is_empty() {
        "Your Name"
    } else {
        resume.full_name.as_str()
    };
    let _ = writeln!(out, "{}", name);

    let contact: Vec<&str> = [&resume.email, &resume.phone, &resume.location]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if !contact.is_empty() {
        let _ = writeln!(out, "{}", contact.join(" | "));
    }
    let _ = writeln!(out, "{}", RULE);

    if !resume.summary.is_empty() {
        section(&mut out, "SUMMARY");
        let _ = writeln!(out, "{}", resume.summary);
    }

    if !resume.experiences.is_empty() {
        section(&mut out, "EXPERIENCE");
        for exp in &resume.experiences {
            let _ = writeln!(out, "{}", exp.job_title);
            let _ = writeln!(out, "{}", row(&exp.company, &exp.date_range()));
            if !exp.description.is_empty() {
                let _ = writeln!(out, "{}", exp.description);
            }
        }
    }

    if !resume.education.is_empty() {
        section(&mut out, "EDUCATION");
        for edu in &resume.education {
            let _ = writeln!(out, "{}", edu.school);
            let mut degree = edu.degree.clone();
            if !edu.field.is_empty() {
                let _ = write!(degree, " in {}", edu.field);
            }
            let _ = writeln!(out, "{}", row(&degree, &edu.graduation_date));
        }
    }

    if !resume.skills.is_empty() {
        section(&mut out, "SKILLS");
        let names: Vec<&str> = resume.skills.iter().map(|s| s.name.as_str()).collect();
        let _ = writeln!(out, "{}", names.join(", "));
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
}

fn row(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (_, true) => left.to_string(),
        (true, false) => right.to_string(),
        (false, false) => format!("{}  ({})", left, right),
    }
}
