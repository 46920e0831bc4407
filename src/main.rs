use clap::Parser;
use resumedia::adapters::mock_analyzer::MockAnalyzer;
use resumedia::adapters::mock_assistant::MockAssistant;
use resumedia::adapters::scheduler::{NoDelay, TokioScheduler};
use resumedia::app::ats_check::{attach_score, AtsCheckSession};
use resumedia::app::chat::ChatSession;
use resumedia::app::editor::{EditorEvent, ResumeEditor};
use resumedia::app::export::export_to_file;
use resumedia::app::preview::render_preview;
use resumedia::app::routes::Route;
use resumedia::config::cli::{
    Command, EducationArgs, EducationCommand, ExperienceArgs, ExperienceCommand, SkillArgs,
    SkillCommand,
};
use resumedia::config::{self, TomlConfig};
use resumedia::domain::model::{ContactField, FileRef};
use resumedia::domain::ports::Scheduler;
use resumedia::utils::error::ErrorSeverity;
use resumedia::utils::{logger, validation::validate_path};
use resumedia::{
    CliConfig, DocumentStore, Education, Experience, LocalStorage, MutationOutcome, Resume,
    ResumeError, ResumeStore, Result, Skill,
};
use std::sync::Arc;

type Store = DocumentStore<LocalStorage>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 1,
            ErrorSeverity::High => 2,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let settings = config::load_settings(cli.config.as_deref())?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.storage.dir.clone());
    validate_path("data-dir", &data_dir)?;

    let mut store = DocumentStore::load(LocalStorage::new(data_dir), settings.storage.key.clone())?;
    let scheduler: Arc<dyn Scheduler> = if cli.no_delay {
        Arc::new(NoDelay)
    } else {
        Arc::new(TokioScheduler)
    };

    match cli.command {
        Command::New { template } => {
            let resume = store.create(&template);
            println!("✅ Created {} ({})", resume.id, resume.title);
        }
        Command::List => list(&store),
        Command::Select { id } => {
            let resume = store
                .find(&id)
                .cloned()
                .ok_or(ResumeError::ResumeNotFound { id })?;
            println!("✅ Now editing {} ({})", resume.id, resume.title);
            store.set_current(resume);
        }
        Command::Delete { id } => match store.remove(&id) {
            MutationOutcome::Applied => println!("🗑️ Deleted {}", id),
            _ => return Err(ResumeError::ResumeNotFound { id }),
        },
        Command::Show { json } => {
            let resume = current(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(resume)?);
            } else {
                print!("{}", render_preview(resume));
            }
        }
        Command::Set { field, value } => {
            let field: ContactField = field
                .parse()
                .map_err(|message| ResumeError::ValidationError { message })?;
            let outcome = ResumeEditor::new().apply(
                &mut store,
                EditorEvent::ContactChanged { field, value },
            );
            check(outcome, "resume")?;
            println!("✅ Updated {:?}", field);
        }
        Command::Experience(cmd) => experience(&mut store, cmd)?,
        Command::Education(cmd) => education(&mut store, cmd)?,
        Command::Skill(cmd) => skill(&mut store, cmd)?,
        Command::Export { path } => {
            export_to_file(current(&store)?, &path)?;
            println!("✅ Resume downloaded successfully! ({})", path.display());
        }
        Command::AtsCheck { file, attach } => {
            ats_check(&mut store, &settings, scheduler, FileRef::from_path(file), attach).await?
        }
        Command::Chat { message } => {
            let mut chat = ChatSession::new(Arc::new(
                MockAssistant::new(scheduler).with_delay(settings.assistant_delay()),
            ));
            let resume = store.current().cloned().unwrap_or_else(|| {
                Resume::blank(String::new(), String::new(), chrono::Utc::now())
            });
            if let Some(reply) = chat.send(&message.join(" "), &resume).await? {
                println!("{}", reply.content);
            }
        }
        Command::Jobs => println!("🚧 {} is coming soon", Route::Jobs.label()),
        Command::Routes => {
            for route in Route::ALL {
                let note = if route.is_placeholder() { " (coming soon)" } else { "" };
                println!("{:<14} {}{}", route.path(), route.label(), note);
            }
        }
    }

    Ok(())
}

fn current(store: &Store) -> Result<&Resume> {
    store.current().ok_or(ResumeError::NoCurrentResume)
}

/// Turns a store outcome into an error the user can act on.
fn check(outcome: Option<MutationOutcome>, id: &str) -> Result<()> {
    match outcome {
        None | Some(MutationOutcome::Applied) => Ok(()),
        Some(MutationOutcome::NoCurrentDocument) => Err(ResumeError::NoCurrentResume),
        Some(MutationOutcome::NotFound) => Err(ResumeError::EntryNotFound { id: id.to_string() }),
        Some(MutationOutcome::DuplicateId) => {
            Err(ResumeError::DuplicateEntry { id: id.to_string() })
        }
    }
}

fn list(store: &Store) {
    if store.resumes().is_empty() {
        println!("No saved resumes yet. Start one with `resumedia new`.");
        return;
    }

    let current_id = store.current().map(|r| r.id.as_str());
    for resume in store.resumes() {
        let marker = if Some(resume.id.as_str()) == current_id { "*" } else { " " };
        let name = if resume.full_name.is_empty() {
            "-"
        } else {
            resume.full_name.as_str()
        };
        let score = resume
            .ats_score
            .map(|s| format!("  ATS {}", s))
            .unwrap_or_default();
        println!(
            "{} {}  {}  {}  {}{}{}",
            marker,
            resume.id,
            resume.title,
            name,
            resume.updated_at.format("%Y-%m-%d %H:%M"),
            if resume.is_draft { "  (draft)" } else { "" },
            score
        );
    }
}

/// Adds a blank entry through the editor and returns its id.
fn add_blank(store: &mut Store, event: EditorEvent) -> Result<String> {
    let mut editor = ResumeEditor::new();
    check(editor.apply(store, event), "new entry")?;
    editor
        .editing()
        .map(str::to_string)
        .ok_or(ResumeError::NoCurrentResume)
}

fn experience(store: &mut Store, cmd: ExperienceCommand) -> Result<()> {
    match cmd {
        ExperienceCommand::Add { fields } => {
            let id = add_blank(store, EditorEvent::AddExperience)?;
            let experience = merge_experience(Experience::new(id.clone()), fields);
            edit(store, EditorEvent::UpdateExperience { id: id.clone(), experience }, &id)?;
            println!("✅ Added experience {}", id);
        }
        ExperienceCommand::Update { id, fields } => {
            let existing = current(store)?
                .experiences
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or_else(|| ResumeError::EntryNotFound { id: id.clone() })?;
            let experience = merge_experience(existing, fields);
            edit(store, EditorEvent::UpdateExperience { id: id.clone(), experience }, &id)?;
            println!("✅ Updated experience {}", id);
        }
        ExperienceCommand::Delete { id } => {
            edit(store, EditorEvent::DeleteExperience(id.clone()), &id)?;
            println!("🗑️ Deleted experience {}", id);
        }
    }
    Ok(())
}

fn education(store: &mut Store, cmd: EducationCommand) -> Result<()> {
    match cmd {
        EducationCommand::Add { fields } => {
            let id = add_blank(store, EditorEvent::AddEducation)?;
            let education = merge_education(Education::new(id.clone()), fields);
            edit(store, EditorEvent::UpdateEducation { id: id.clone(), education }, &id)?;
            println!("✅ Added education {}", id);
        }
        EducationCommand::Update { id, fields } => {
            let existing = current(store)?
                .education
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or_else(|| ResumeError::EntryNotFound { id: id.clone() })?;
            let education = merge_education(existing, fields);
            edit(store, EditorEvent::UpdateEducation { id: id.clone(), education }, &id)?;
            println!("✅ Updated education {}", id);
        }
        EducationCommand::Delete { id } => {
            edit(store, EditorEvent::DeleteEducation(id.clone()), &id)?;
            println!("🗑️ Deleted education {}", id);
        }
    }
    Ok(())
}

fn skill(store: &mut Store, cmd: SkillCommand) -> Result<()> {
    match cmd {
        SkillCommand::Add { fields } => {
            // 先檢查熟練度，避免留下空白項目
            let fields = checked_skill_args(fields)?;
            let id = add_blank(store, EditorEvent::AddSkill)?;
            let skill = merge_skill(Skill::new(id.clone()), fields)?;
            edit(store, EditorEvent::UpdateSkill { id: id.clone(), skill }, &id)?;
            println!("✅ Added skill {}", id);
        }
        SkillCommand::Update { id, fields } => {
            let existing = current(store)?
                .skills
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| ResumeError::EntryNotFound { id: id.clone() })?;
            let skill = merge_skill(existing, fields)?;
            edit(store, EditorEvent::UpdateSkill { id: id.clone(), skill }, &id)?;
            println!("✅ Updated skill {}", id);
        }
        SkillCommand::Delete { id } => {
            edit(store, EditorEvent::DeleteSkill(id.clone()), &id)?;
            println!("🗑️ Deleted skill {}", id);
        }
    }
    Ok(())
}

fn edit(store: &mut Store, event: EditorEvent, id: &str) -> Result<()> {
    check(ResumeEditor::new().apply(store, event), id)
}

fn merge_experience(mut experience: Experience, fields: ExperienceArgs) -> Experience {
    if let Some(v) = fields.job_title {
        experience.job_title = v;
    }
    if let Some(v) = fields.company {
        experience.company = v;
    }
    if let Some(v) = fields.start {
        experience.start_date = v;
    }
    if let Some(v) = fields.end {
        experience.end_date = v;
    }
    if let Some(v) = fields.current {
        experience.is_currently = v;
    }
    if let Some(v) = fields.description {
        experience.description = v;
    }
    experience
}

fn merge_education(mut education: Education, fields: EducationArgs) -> Education {
    if let Some(v) = fields.school {
        education.school = v;
    }
    if let Some(v) = fields.degree {
        education.degree = v;
    }
    if let Some(v) = fields.field {
        education.field = v;
    }
    if let Some(v) = fields.graduation {
        education.graduation_date = v;
    }
    education
}

fn checked_skill_args(fields: SkillArgs) -> Result<SkillArgs> {
    if let Some(p) = &fields.proficiency {
        p.parse::<resumedia::Proficiency>()
            .map_err(|message| ResumeError::ValidationError { message })?;
    }
    Ok(fields)
}

fn merge_skill(mut skill: Skill, fields: SkillArgs) -> Result<Skill> {
    if let Some(v) = fields.name {
        skill.name = v;
    }
    if let Some(p) = fields.proficiency {
        skill.proficiency = p
            .parse()
            .map_err(|message| ResumeError::ValidationError { message })?;
    }
    Ok(skill)
}

async fn ats_check(
    store: &mut Store,
    settings: &TomlConfig,
    scheduler: Arc<dyn Scheduler>,
    file: FileRef,
    attach: bool,
) -> Result<()> {
    let mut analyzer = MockAnalyzer::new(scheduler)
        .with_delay(settings.analyzer_delay())
        .with_score_range(settings.analyzer.min_score, settings.analyzer.max_score);
    if let Some(seed) = settings.analyzer.seed {
        analyzer = analyzer.with_seed(seed);
    }

    // 先確認有可附加分數的履歷，避免等完分析才失敗
    let attach_to = if attach {
        Some(current(store)?.id.clone())
    } else {
        None
    };

    let session = AtsCheckSession::new(Arc::new(analyzer));
    session.select_file(file.clone())?;

    println!("⏳ Analyzing {}...", file.name);
    store.set_loading(true);
    let report = session.analyze().await;
    store.set_loading(false);
    let report = report?;

    println!("✅ Analysis complete!");
    println!("ATS score: {}/100", report.score);
    println!();
    println!("Issues:");
    for issue in &report.issues {
        println!("  [{:?}] {}: {}", issue.severity, issue.title, issue.description);
        if let Some(suggestion) = &issue.suggestion {
            println!("      → {}", suggestion);
        }
    }
    println!();
    println!("Suggestions:");
    for suggestion in &report.suggestions {
        println!("  ({:?}) {}", suggestion.impact, suggestion.text);
    }

    if let Some(id) = attach_to {
        check(Some(attach_score(store, &id, report.score)), &id)?;
        println!();
        println!("📌 Score saved on the current resume");
    }
    Ok(())
}
