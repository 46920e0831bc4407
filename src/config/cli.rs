use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "resumedia")]
#[command(about = "Build resumes, preview them and run a simulated ATS check")]
pub struct CliConfig {
    /// Path to TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved resumes (overrides the settings file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Skip the simulated waits of the ATS check and the assistant
    #[arg(long, global = true)]
    pub no_delay: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start a new resume and make it current
    New {
        #[arg(short, long, default_value = "modern")]
        template: String,
    },
    /// List saved resumes
    List,
    /// Make a saved resume current
    Select { id: String },
    /// Delete a saved resume
    Delete { id: String },
    /// Print the current resume as a printable page
    Show {
        /// Print the stored JSON document instead
        #[arg(long)]
        json: bool,
    },
    /// Change a top-level field: title, full-name, email, phone, location, summary
    Set { field: String, value: String },
    /// Edit the experience section
    #[command(subcommand)]
    Experience(ExperienceCommand),
    /// Edit the education section
    #[command(subcommand)]
    Education(EducationCommand),
    /// Edit the skills section
    #[command(subcommand)]
    Skill(SkillCommand),
    /// Write the current resume and its printable page to a ZIP archive
    Export { path: PathBuf },
    /// Run the simulated ATS check against a PDF or DOCX file
    AtsCheck {
        file: PathBuf,
        /// Store the score on the current resume
        #[arg(long)]
        attach: bool,
    },
    /// Ask the resume assistant
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Job listings (not available yet)
    Jobs,
    /// List the application pages
    Routes,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExperienceCommand {
    /// Append a new entry
    Add {
        #[command(flatten)]
        fields: ExperienceArgs,
    },
    /// Change fields of an existing entry
    Update {
        id: String,
        #[command(flatten)]
        fields: ExperienceArgs,
    },
    /// Remove an entry
    Delete { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EducationCommand {
    /// Append a new entry
    Add {
        #[command(flatten)]
        fields: EducationArgs,
    },
    /// Change fields of an existing entry
    Update {
        id: String,
        #[command(flatten)]
        fields: EducationArgs,
    },
    /// Remove an entry
    Delete { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SkillCommand {
    /// Append a new entry
    Add {
        #[command(flatten)]
        fields: SkillArgs,
    },
    /// Change fields of an existing entry
    Update {
        id: String,
        #[command(flatten)]
        fields: SkillArgs,
    },
    /// Remove an entry
    Delete { id: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ExperienceArgs {
    #[arg(long)]
    pub job_title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    /// Currently employed here
    #[arg(long)]
    pub current: Option<bool>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct EducationArgs {
    #[arg(long)]
    pub school: Option<String>,
    #[arg(long)]
    pub degree: Option<String>,
    #[arg(long)]
    pub field: Option<String>,
    #[arg(long)]
    pub graduation: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SkillArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// beginner, intermediate or expert
    #[arg(long)]
    pub proficiency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_experience_add() {
        let cli = CliConfig::parse_from([
            "resumedia",
            "--data-dir",
            "/tmp/r",
            "experience",
            "add",
            "--job-title",
            "Electrician",
            "--current",
            "true",
        ]);

        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/r"));
        match cli.command {
            Command::Experience(ExperienceCommand::Add { fields }) => {
                assert_eq!(fields.job_title.as_deref(), Some("Electrician"));
                assert_eq!(fields.current, Some(true));
                assert!(fields.company.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_chat_joins_words_later() {
        let cli = CliConfig::parse_from(["resumedia", "chat", "improve", "my", "summary"]);
        match cli.command {
            Command::Chat { message } => assert_eq!(message.join(" "), "improve my summary"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliConfig::command().debug_assert();
    }
}
