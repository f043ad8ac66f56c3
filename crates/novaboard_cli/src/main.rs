//! NovaBoard command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `novaboard_core` board, timeline and summary APIs.
//! - Render results as plain text or JSON.

mod render;

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use novaboard_core::{
    build_timeline, export_file_name, init_logging, open_db, summarize_projects, AppConfig,
    ChatCompletionsClient, CsvSource, DashboardStats, HostTableSource, Priority, ProjectBoard,
    ProjectQuery, ProjectStatus, SortField, SortOrder, SortState, SqliteProjectStore, ZoomLevel,
    UNASSIGNED_OWNER,
};
use render::Output;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "NovaBoard: project portfolio dashboard", long_about = None)]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long, global = true, default_value = "novaboard.json")]
    config: PathBuf,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List projects with optional filters and sort order.
    List(ListArgs),
    /// Show projects grouped into board columns.
    Board,
    /// Show one project with comments and subtasks.
    Show { id: String },
    /// Quick-add a project.
    Add(AddArgs),
    /// Move a project to another status column.
    Move {
        id: String,
        #[arg(value_parser = parse_status)]
        status: ProjectStatus,
    },
    /// Advance a project's priority one step.
    Priority { id: String },
    /// Delete a project.
    Delete { id: String },
    /// Add a comment as the configured current user.
    Comment { id: String, text: String },
    /// Manage a project's subtasks.
    #[command(subcommand)]
    Subtask(SubtaskCommand),
    /// Replace all projects with the contents of a CSV file.
    Import { file: PathBuf },
    /// Export all projects as CSV.
    Export {
        /// Output file; defaults to nova_export_<date>.csv.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Lay out the Gantt timeline.
    Timeline {
        #[arg(long, default_value = "month")]
        zoom: ZoomLevel,
    },
    /// Show dashboard metrics, risk radar and top budgets.
    Stats,
    /// Generate an executive summary with the configured model.
    Summary,
    /// Drop stored projects and reload the bundled sample.
    Reset,
    /// Load projects from exported host table records (JSON).
    SyncHost { records: PathBuf },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive match on name, owner or status.
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    owner: Option<String>,
    #[arg(long, value_parser = parse_priority)]
    priority: Option<Priority>,
    /// Only projects owned by the configured current user.
    #[arg(long)]
    mine: bool,
    #[arg(long, default_value = "dueDate")]
    sort: SortField,
    #[arg(long)]
    desc: bool,
}

#[derive(Args, Debug)]
struct AddArgs {
    name: String,
    #[arg(long, value_parser = parse_status, default_value = "Pending")]
    status: ProjectStatus,
    /// Explicit owner; overrides `--mine`.
    #[arg(long)]
    owner: Option<String>,
    /// Assign to the configured current user instead of leaving it unassigned.
    #[arg(long)]
    mine: bool,
}

impl AddArgs {
    fn resolve_owner(&self, current_user: &str) -> String {
        match &self.owner {
            Some(owner) => owner.clone(),
            None if self.mine => current_user.to_string(),
            None => UNASSIGNED_OWNER.to_string(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum SubtaskCommand {
    Add { id: String, title: String },
    Toggle { id: String, subtask_id: String },
    Delete { id: String, subtask_id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let out = Output::new(cli.json);

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    config.apply_env_overrides();

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log_dir must be valid UTF-8")?;
        init_logging(&config.log_level, log_dir).context("initializing logging")?;
    }

    let conn = open_db(&config.database_path)
        .with_context(|| format!("opening database {}", config.database_path.display()))?;
    let board = ProjectBoard::new(SqliteProjectStore::new(&conn, config.storage_key.as_str()));
    let sample = CsvSource::bundled_sample();
    let today = Local::now().date_naive();

    if !matches!(
        cli.command,
        Commands::Reset | Commands::Import { .. } | Commands::SyncHost { .. }
    ) {
        board.bootstrap(None, &sample).context("loading projects")?;
    }

    match cli.command {
        Commands::List(args) => {
            let projects = board.projects()?;
            let query = ProjectQuery {
                search: args.search,
                owner: args.owner,
                priority: args.priority,
                my_focus: args.mine.then(|| config.current_user.clone()),
                sort: SortState {
                    field: args.sort,
                    order: if args.desc { SortOrder::Desc } else { SortOrder::Asc },
                },
            };
            out.project_list(&query.apply(&projects))?;
        }
        Commands::Board => {
            let projects = board.projects()?;
            out.board(&novaboard_core::group_by_status(&projects))?;
        }
        Commands::Show { id } => {
            let project = board.get(&id)?;
            out.project_detail(&project)?;
        }
        Commands::Add(args) => {
            let owner = args.resolve_owner(&config.current_user);
            let project = board.quick_add(&args.name, args.status, &owner, today)?;
            out.created("project", &project.id)?;
        }
        Commands::Move { id, status } => {
            let project = board.move_status(&id, status)?;
            out.message(&format!("{} -> {}", project.id, project.status))?;
        }
        Commands::Priority { id } => {
            let priority = board.cycle_priority(&id)?;
            out.message(&format!("{id} priority {priority}"))?;
        }
        Commands::Delete { id } => {
            board.delete(&id)?;
            out.message(&format!("deleted {id}"))?;
        }
        Commands::Comment { id, text } => {
            let comment_id = board.add_comment(&id, &config.current_user, &text, Utc::now())?;
            out.created("comment", &comment_id)?;
        }
        Commands::Subtask(SubtaskCommand::Add { id, title }) => {
            let subtask_id = board.add_subtask(&id, &title)?;
            out.created("subtask", &subtask_id)?;
        }
        Commands::Subtask(SubtaskCommand::Toggle { id, subtask_id }) => {
            let done = board.toggle_subtask(&id, &subtask_id)?;
            out.message(&format!(
                "{subtask_id} {}",
                if done { "completed" } else { "reopened" }
            ))?;
        }
        Commands::Subtask(SubtaskCommand::Delete { id, subtask_id }) => {
            board.delete_subtask(&id, &subtask_id)?;
            out.message(&format!("deleted subtask {subtask_id}"))?;
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let count = board.import_csv(&text)?;
            out.message(&format!("imported {count} projects"))?;
        }
        Commands::Export { out: target } => {
            let csv = board.export_csv()?;
            let target = target.unwrap_or_else(|| PathBuf::from(export_file_name(today)));
            std::fs::write(&target, csv)
                .with_context(|| format!("writing {}", target.display()))?;
            out.message(&format!("exported to {}", target.display()))?;
        }
        Commands::Timeline { zoom } => {
            let projects = board.projects()?;
            out.timeline(&build_timeline(&projects, zoom, today))?;
        }
        Commands::Stats => {
            let projects = board.projects()?;
            out.stats(
                &DashboardStats::compute(&projects),
                &novaboard_core::risk_radar(&projects, today),
                &novaboard_core::top_budgets(&projects),
            )?;
        }
        Commands::Summary => {
            let projects = board.projects()?;
            let summary = &config.summary;
            let client = ChatCompletionsClient::new(
                summary.endpoint.as_str(),
                summary.model.as_str(),
                summary.api_key.clone(),
            )
            .with_sampling(summary.temperature, summary.max_tokens);
            let text = summarize_projects(&client, &projects).context("generating summary")?;
            out.markdown(&text)?;
        }
        Commands::Reset => {
            let projects = board.reset(&sample)?;
            out.message(&format!("reset to {} sample projects", projects.len()))?;
        }
        Commands::SyncHost { records } => {
            let host = HostTableSource::from_json_file(&records, today)
                .with_context(|| format!("reading host records {}", records.display()))?;
            let outcome = board.bootstrap(Some(&host), &sample)?;
            if outcome.projects.is_empty() {
                bail!("no projects loaded");
            }
            out.message(&format!(
                "loaded {} projects from {}",
                outcome.projects.len(),
                outcome.origin.as_str()
            ))?;
        }
    }

    Ok(())
}

/// Accepts wire labels and slug forms: `In Progress`, `in-progress`, `inprogress`.
fn parse_status(value: &str) -> Result<ProjectStatus, String> {
    let key: String = value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    ProjectStatus::ALL
        .into_iter()
        .find(|status| status.as_str().replace(' ', "").to_lowercase() == key)
        .ok_or_else(|| format!("unknown status `{value}`"))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::ALL
        .into_iter()
        .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("unknown priority `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::{parse_priority, parse_status, AddArgs, Cli};
    use clap::CommandFactory;
    use novaboard_core::{Priority, ProjectStatus};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_accepts_labels_and_slugs() {
        assert_eq!(parse_status("In Progress"), Ok(ProjectStatus::InProgress));
        assert_eq!(parse_status("in-progress"), Ok(ProjectStatus::InProgress));
        assert_eq!(parse_status("blocked"), Ok(ProjectStatus::Blocked));
        assert!(parse_status("archived").is_err());
    }

    #[test]
    fn quick_add_owner_is_unassigned_unless_mine_or_explicit() {
        let mut args = AddArgs {
            name: "Launch".to_string(),
            status: ProjectStatus::Pending,
            owner: None,
            mine: false,
        };
        assert_eq!(args.resolve_owner("Linh"), "Unassigned");

        args.mine = true;
        assert_eq!(args.resolve_owner("Linh"), "Linh");

        args.owner = Some("Minh".to_string());
        assert_eq!(args.resolve_owner("Linh"), "Minh");
    }

    #[test]
    fn priority_is_case_insensitive() {
        assert_eq!(parse_priority("critical"), Ok(Priority::Critical));
        assert!(parse_priority("urgent").is_err());
    }
}
