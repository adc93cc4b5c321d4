//! Command-line front end over a Teamboard workspace.
//!
//! # Responsibility
//! - Open the configured workspace database (seeding demo data on first run).
//! - Print plain-text reports and run single use-case commands.

use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use teamboard_core::{
    core_version, default_log_level, ping, segment_mentions, CasePriority, CaseStatus,
    IdGenerator, SqliteSlotRepository, TaskStatus, TextSegment, Workspace, WorkspaceConfig,
};

#[derive(Parser, Debug)]
#[command(name = "teamboard", version, about = "Inspect and edit a Teamboard workspace")]
struct Cli {
    /// SQLite file holding the workspace; in-memory when omitted
    #[arg(long, env = "TEAMBOARD_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "TEAMBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, env = "TEAMBOARD_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Start never-written stores empty instead of with demo data
    #[arg(long)]
    no_seed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core linkage information
    Ping,
    /// Dashboard counters for the current project
    Summary,
    /// Leaderboard by score
    Rankings,
    /// Board columns of the current project
    Tasks {
        /// Only show one column (todo|inprogress|done)
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,
    },
    /// Support cases
    Cases {
        /// Only show one state (abierto|en_curso|cerrado)
        #[arg(long, value_parser = parse_case_status)]
        status: Option<CaseStatus>,
    },
    /// Chat of the current project
    Chat,
    /// Select the current project
    SelectProject { project_id: String },
    /// Add a task to the current project
    AddTask {
        text: String,
        #[arg(long, value_parser = parse_task_status, default_value = "todo")]
        status: TaskStatus,
    },
    /// Move a task to another column
    MoveTask {
        task_id: String,
        #[arg(value_parser = parse_task_status)]
        status: TaskStatus,
    },
    /// Post to the current project's chat
    Say { text: String },
    /// Open a support case owned by the current user
    OpenCase {
        client: String,
        description: String,
        #[arg(long, value_parser = parse_case_priority, default_value = "media")]
        priority: CasePriority,
    },
    /// Change a case status and record it in the case history
    CaseStatus {
        case_id: String,
        #[arg(value_parser = parse_case_status)]
        status: CaseStatus,
    },
}

fn parse_task_status(value: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(value).ok_or_else(|| format!("unknown task status `{value}`"))
}

fn parse_case_status(value: &str) -> Result<CaseStatus, String> {
    CaseStatus::parse(value).ok_or_else(|| format!("unknown case status `{value}`"))
}

fn parse_case_priority(value: &str) -> Result<CasePriority, String> {
    CasePriority::parse(value).ok_or_else(|| format!("unknown case priority `{value}`"))
}

impl Cli {
    fn config(&self) -> WorkspaceConfig {
        WorkspaceConfig {
            db_path: self.db.clone(),
            log_level: self
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: self.log_dir.clone(),
            seed_mock_data: !self.no_seed,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Command::Ping = cli.command {
        println!("teamboard_core ping={}", ping());
        println!("teamboard_core version={}", core_version());
        return Ok(());
    }

    let config = cli.config();
    if config.db_path.is_none() && cli.command.is_mutation() {
        eprintln!("warning: no --db given; this change is kept in memory and lost on exit");
    }
    config.init_logging()?;
    let conn = config.open_connection()?;
    let repo = SqliteSlotRepository::try_new(&conn)?;
    let mut workspace = Workspace::open(repo, IdGenerator::system(), config.seed_mock_data)?;
    info!("event=cli_command module=cli command={}", command_name(&cli.command));

    match cli.command {
        Command::Ping => {}
        Command::Summary => print_summary(&workspace),
        Command::Rankings => {
            for (position, entry) in workspace.rankings().iter().enumerate() {
                println!(
                    "{:>2}. {:<16} score={:<5} points={:<5} level={} done={}",
                    position + 1,
                    entry.username,
                    entry.score,
                    entry.points,
                    entry.level,
                    entry.completed_tasks
                );
            }
        }
        Command::Tasks { status } => {
            let columns = match status {
                Some(status) => vec![status],
                None => TaskStatus::ALL.to_vec(),
            };
            for status in columns {
                println!("[{}]", status.as_str());
                for task in workspace.board_column(status) {
                    println!("  {}  {}", task.id, task.text);
                }
            }
        }
        Command::Cases { status } => {
            let cases = match status {
                Some(status) => workspace.cases().cases_by_status(status),
                None => workspace.cases().cases().to_vec(),
            };
            for case in cases {
                println!(
                    "{}  [{}] {}: {} ({} entries)",
                    case.id,
                    case.status.as_str(),
                    case.client,
                    case.description,
                    case.history.len()
                );
            }
        }
        Command::Chat => {
            for message in workspace.current_chat() {
                let body: String = segment_mentions(&message.text, &message.mentions)
                    .into_iter()
                    .map(|segment| match segment {
                        TextSegment::Plain(text) => text.to_string(),
                        TextSegment::Mention(text) => format!("*{text}*"),
                    })
                    .collect();
                println!(
                    "{} {}: {}",
                    message.timestamp.format("%H:%M"),
                    message.author,
                    body
                );
            }
        }
        Command::SelectProject { project_id } => {
            match workspace.set_current_project(&project_id)? {
                Some(project) => println!("current project: {} ({})", project.name, project.id),
                None => println!("no project `{project_id}`; selection cleared"),
            }
        }
        Command::AddTask { text, status } => {
            let task = workspace.create_task(&text, status)?;
            println!("created {}", task.id);
        }
        Command::MoveTask { task_id, status } => {
            if workspace.move_task(&task_id, status)? {
                println!("moved {task_id} to {}", status.as_str());
            } else {
                println!("no task `{task_id}`");
            }
        }
        Command::Say { text } => {
            let message = workspace.send_message(&text)?;
            println!("sent {} (mentions: {})", message.id, message.mentions.join(", "));
        }
        Command::OpenCase {
            client,
            description,
            priority,
        } => {
            let case = workspace.open_case(&client, &description, priority)?;
            println!("opened {}", case.id);
        }
        Command::CaseStatus { case_id, status } => {
            let case = workspace.change_case_status(&case_id, status)?;
            println!("{} is now {}", case.id, case.status.as_str());
        }
    }
    Ok(())
}

fn print_summary<R: teamboard_core::SlotRepository>(workspace: &Workspace<R>) {
    let stats = workspace.dashboard_stats();
    match workspace.users().current_user() {
        Some(user) => println!(
            "user: {} (level {}, {} points)",
            user.username, user.level, user.points
        ),
        None => println!("user: <signed out>"),
    }
    match workspace.projects().current_project() {
        Some(project) => println!("project: {} ({})", project.name, project.id),
        None => println!("project: <none>"),
    }
    println!(
        "tasks: {} total, {} done, {} active ({:.0}% complete)",
        stats.total_tasks, stats.completed_tasks, stats.active_tasks, stats.completion_rate
    );
    println!("projects: {}", stats.total_projects);
    println!(
        "cases: {} total, {} open, {} closed",
        stats.total_cases, stats.open_cases, stats.closed_cases
    );
}

impl Command {
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::SelectProject { .. }
                | Self::AddTask { .. }
                | Self::MoveTask { .. }
                | Self::Say { .. }
                | Self::OpenCase { .. }
                | Self::CaseStatus { .. }
        )
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Ping => "ping",
        Command::Summary => "summary",
        Command::Rankings => "rankings",
        Command::Tasks { .. } => "tasks",
        Command::Cases { .. } => "cases",
        Command::Chat => "chat",
        Command::SelectProject { .. } => "select-project",
        Command::AddTask { .. } => "add-task",
        Command::MoveTask { .. } => "move-task",
        Command::Say { .. } => "say",
        Command::OpenCase { .. } => "open-case",
        Command::CaseStatus { .. } => "case-status",
    }
}
