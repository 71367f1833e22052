//! TaskFlow CLI
//!
//! Command-line shell over the TaskFlow views:
//! - Log in, sign up and out
//! - Dashboard counters and recent tasks
//! - Task CRUD with search and filters
//! - Analytics report
//! - Settings (profile, theme, language) and data export

use anyhow::{bail, Context};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskflow::client::{ApiClient, TaskApi};
use taskflow::config::{generate_default_config, Config, LoggingConfig};
use taskflow::session::{FileStorage, Locale, SessionStore, Theme};
use taskflow::tasks::{
    AnalyticsReport, DashboardFilter, DashboardStats, ExportFormat, Priority, Status, Task,
    TaskDraft, TaskFilter, TaskId,
};
use taskflow::validation::{LoginForm, SignupForm};
use taskflow::views::{
    guard, AnalyticsView, AuthView, DashboardView, Navigation, Route, SettingsView, TaskBoard,
    ViewError,
};

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Task management client for the TaskFlow API")]
#[command(long_about = "TaskFlow Pro keeps your tasks on a TaskFlow server.\nTrack progress on the dashboard, manage tasks and review your analytics.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL, including the /api prefix (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: <config dir>/taskflow/config.toml or ./taskflow.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and cache the session
    Login {
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        /// Full name
        #[arg(short = 'n', long)]
        name: String,
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Password confirmation (prompted when omitted)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Drop the cached session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Counters and the most recent tasks
    Dashboard {
        /// Quick filter (all, in_progress, completed, overdue)
        #[arg(long, default_value = "all")]
        filter: DashboardFilter,
    },

    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        action: TaskCommands,
    },

    /// Completion analytics
    Analytics,

    /// Profile, theme and language
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },

    /// Export all tasks
    Export {
        /// File type (csv, json)
        #[arg(long = "type", value_name = "TYPE", default_value = "csv")]
        export_type: ExportFormat,
        /// Output file or directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    List {
        /// Case-insensitive text in title or description
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<Status>,
        #[arg(long)]
        priority: Option<Priority>,
    },

    /// Create a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        #[arg(long, default_value = "in_progress")]
        status: Status,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Use the dashboard quick-add form (always starts in progress)
        #[arg(long)]
        quick: bool,
    },

    /// Edit a task; unspecified fields keep their value
    Edit {
        id: TaskId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(long)]
        status: Option<Status>,
        /// Due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Flip a task between in progress and completed
    Toggle { id: TaskId },

    /// Delete a task
    Delete {
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show profile and preferences
    Show,

    /// Change the display name
    Profile { full_name: String },

    /// Set the theme (pro-dark, pro-light); toggles when omitted
    Theme { theme: Option<Theme> },

    /// Set the interface language (en, hi, mr)
    Locale { locale: Locale },
}

impl Commands {
    /// Screen a command belongs to, for the route guard
    fn route(&self) -> Option<Route> {
        match self {
            Commands::Dashboard { .. } => Some(Route::Dashboard),
            Commands::Tasks { .. } => Some(Route::Tasks),
            Commands::Analytics => Some(Route::Analytics),
            Commands::Settings { .. } | Commands::Export { .. } => Some(Route::Settings),
            _ => None,
        }
    }
}

/// Everything a command needs
struct App {
    session: SessionStore,
    api: Arc<dyn TaskApi>,
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let expired = err
            .downcast_ref::<ViewError>()
            .and_then(ViewError::redirect)
            .is_some();

        if expired {
            eprintln!("Your session has expired or is invalid.");
            eprintln!("Log in again with:");
            eprintln!("  taskflow login <email>");
        } else {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging)?;
    tracing::debug!(api = %config.api.base_url, "TaskFlow v{}", env!("CARGO_PKG_VERSION"));

    let storage_path = config.storage.storage_path();
    let storage = FileStorage::open(&storage_path)
        .with_context(|| format!("failed to open local storage {}", storage_path.display()))?;
    let session = SessionStore::new(Arc::new(storage));
    let api: Arc<dyn TaskApi> = Arc::new(ApiClient::new(&config.api, session.clone())?);

    let app = App {
        session,
        api,
        format: cli.format,
    };

    if let Some(requested) = cli.command.route() {
        if guard(requested, app.session.is_authenticated()) == Route::Login {
            eprintln!("Not logged in.");
            eprintln!("Log in with:");
            eprintln!("  taskflow login <email>");
            std::process::exit(1);
        }
    }

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password")?,
            };

            let view = AuthView::new(Arc::clone(&app.api), app.session.clone());
            view.open_login()?;
            view.login(&LoginForm { email, password }).await?;

            let nav = Navigation::new(Arc::clone(&app.api), app.session.clone());
            println!("Welcome back, {}!", nav.greeting().await);
        }

        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password")?,
            };
            let confirm_password = match confirm_password {
                Some(p) => p,
                None => prompt("Confirm password")?,
            };

            let view = AuthView::new(Arc::clone(&app.api), app.session.clone());
            view.open_signup()?;
            view.signup(&SignupForm {
                full_name: name,
                email,
                password,
                confirm_password,
            })
            .await?;

            let nav = Navigation::new(Arc::clone(&app.api), app.session.clone());
            println!("Account created. Welcome, {}!", nav.greeting().await);
        }

        Commands::Logout => {
            AuthView::new(Arc::clone(&app.api), app.session.clone()).logout()?;
            println!("Logged out.");
        }

        Commands::Whoami => {
            let nav = Navigation::new(Arc::clone(&app.api), app.session.clone());
            let greeting = nav.greeting().await;

            match app.session.user() {
                Some(user) if app.session.is_authenticated() => {
                    if app.format == OutputFormat::Json {
                        print_json(&user)?;
                    } else {
                        println!("Hello, {}", greeting);
                        println!("  Name:  {}", user.full_name);
                        println!("  Email: {}", user.email);
                    }
                }
                _ => println!("Not logged in."),
            }
        }

        Commands::Dashboard { filter } => {
            let mut view = DashboardView::new(Arc::clone(&app.api));
            view.load().await?;

            let now = Utc::now();
            let stats = view.stats(now);
            let recent = view.recent(filter, now);

            if app.format == OutputFormat::Json {
                print_json(&serde_json::json!({
                    "stats": stats,
                    "filter": filter.as_str(),
                    "recent": recent,
                }))?;
            } else {
                print_stats(&stats);
                println!();
                println!("Recent tasks ({}):", filter);
                print_tasks(&recent, now);
            }
        }

        Commands::Tasks { action } => run_tasks(&app, action).await?,

        Commands::Analytics => {
            let mut view = AnalyticsView::new(Arc::clone(&app.api));
            view.load().await?;
            let report = view.report(Utc::now());

            if app.format == OutputFormat::Json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }

        Commands::Settings { action } => run_settings(&app, action).await?,

        Commands::Export {
            export_type,
            output,
        } => {
            let view = SettingsView::new(Arc::clone(&app.api), app.session.clone());
            let target = output.unwrap_or_else(|| PathBuf::from("."));
            let path = view
                .export(export_type, &target, Local::now().date_naive())
                .await?;
            println!("Exported to {}", path.display());
        }

        Commands::Config { output } => write_config(output.as_ref())?,
    }

    Ok(())
}

async fn run_tasks(app: &App, action: TaskCommands) -> anyhow::Result<()> {
    let mut board = TaskBoard::new(Arc::clone(&app.api));

    match action {
        TaskCommands::List {
            search,
            status,
            priority,
        } => {
            board.load().await?;

            let mut filter = TaskFilter::new().search(search);
            if let Some(status) = status {
                filter = filter.status(status);
            }
            if let Some(priority) = priority {
                filter = filter.priority(priority);
            }

            let tasks = board.visible(&filter);
            if app.format == OutputFormat::Json {
                print_json(&tasks)?;
            } else {
                print_tasks(&tasks, Utc::now());
            }
        }

        TaskCommands::Add {
            title,
            description,
            priority,
            status,
            due,
            quick,
        } => {
            let mut draft = TaskDraft::new(title)
                .description(description)
                .priority(priority)
                .status(status);
            if let Some(due) = due {
                draft = draft.due_date(due);
            }

            let task = if quick {
                DashboardView::new(Arc::clone(&app.api))
                    .quick_add(draft)
                    .await?
            } else {
                board.create(&draft).await?
            };

            if app.format == OutputFormat::Json {
                print_json(&task)?;
            } else {
                println!("Created task {}: {}", task.id, task.title);
            }
        }

        TaskCommands::Edit {
            id,
            title,
            description,
            priority,
            status,
            due,
            clear_due,
        } => {
            board.load().await?;
            let mut draft = board.edit_draft(id)?;

            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft = draft.description(description);
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(due) = due {
                draft.due_date = Some(due);
            }
            if clear_due {
                draft.due_date = None;
            }

            board.update(id, &draft).await?;
            println!("Updated task {}", id);
        }

        TaskCommands::Toggle { id } => {
            board.load().await?;
            let status = board.toggle(id).await?;
            println!("Task {} is now {}", id, status);
        }

        TaskCommands::Delete { id, yes } => {
            board.load().await?;

            if !yes {
                let title = board
                    .find(id)
                    .map(|t| t.title.clone())
                    .ok_or(ViewError::TaskNotFound(id))?;
                let answer = prompt(&format!("Delete task {} \"{}\"? [y/N]", id, title))?;
                if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            board.delete(id).await?;
            println!("Deleted task {}", id);
        }
    }

    Ok(())
}

async fn run_settings(app: &App, action: SettingsCommands) -> anyhow::Result<()> {
    let view = SettingsView::new(Arc::clone(&app.api), app.session.clone());

    match action {
        SettingsCommands::Show => {
            let profile = view.profile();
            let theme = view.theme();
            let locale = view.locale();

            if app.format == OutputFormat::Json {
                print_json(&serde_json::json!({
                    "profile": profile,
                    "theme": theme,
                    "locale": locale,
                }))?;
            } else {
                println!("Profile:");
                println!("  Name:  {}", display_or_dash(&profile.full_name));
                println!("  Email: {}", display_or_dash(&profile.email));
                println!();
                println!("Theme:    {}", theme);
                println!("Language: {} ({})", locale.name(), locale.code());
            }
        }

        SettingsCommands::Profile { full_name } => {
            let user = view.save_profile(&full_name).await?;
            println!("Profile saved: {} <{}>", user.full_name, user.email);
        }

        SettingsCommands::Theme { theme } => {
            let theme = match theme {
                Some(theme) => {
                    view.set_theme(theme)?;
                    theme
                }
                None => view.toggle_theme()?,
            };
            println!("Theme set to {}", theme);
        }

        SettingsCommands::Locale { locale } => {
            view.set_locale(locale)?;
            println!("Language set to {}", locale.name());
        }
    }

    Ok(())
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

/// Install the global subscriber; logs go to stderr unless a file is configured
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, ansi) = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
        "pretty" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi),
            )
            .init(),
        other => bail!("Unknown log format: {} (expected pretty or json)", other),
    }

    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}: ", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn print_stats(stats: &DashboardStats) {
    println!("Total tasks:     {}", stats.total);
    println!("In progress:     {}", stats.in_progress);
    println!("Completed:       {}", stats.completed);
    println!("Overdue:         {}", stats.overdue);
    println!("Avg completion:  {:.1} days", stats.avg_completion_days);
}

fn print_tasks(tasks: &[&Task], now: DateTime<Utc>) {
    if tasks.is_empty() {
        println!("No tasks found.");
        println!();
        println!("Create your first task with:");
        println!("  taskflow tasks add \"Plan the week\"");
        return;
    }

    println!(
        "{:<6} {:<12} {:<8} {:<12} {}",
        "ID", "Status", "Priority", "Due", "Title"
    );
    println!("{}", "-".repeat(70));

    for task in tasks {
        let due = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let marker = if task.is_overdue(now) { " (overdue)" } else { "" };

        println!(
            "{:<6} {:<12} {:<8} {:<12} {}{}",
            task.id,
            task.status.as_str(),
            task.priority.as_str(),
            due,
            task.title,
            marker
        );
    }
}

fn print_report(report: &AnalyticsReport) {
    println!("Tasks created:    {}", report.total_created);
    println!("Tasks completed:  {}", report.total_completed);
    println!("Completion rate:  {}%", report.completion_rate);

    println!();
    println!("By priority:");
    for priority in Priority::all() {
        println!(
            "  {:<8} {}",
            priority.as_str(),
            report.priority_distribution.count(*priority)
        );
    }

    println!();
    println!("Last {} days:", report.activity.len());
    println!("  {:<12} {:>8} {:>10}", "Date", "Created", "Completed");
    for day in &report.activity {
        println!(
            "  {:<12} {:>8} {:>10}",
            day.date.format("%a %m-%d").to_string(),
            day.created,
            day.completed
        );
    }

    println!();
    println!("Weekly completion:");
    for week in &report.weekly_trend {
        println!(
            "  {:<8} {:>4} created {:>4}%",
            week.label, week.created, week.completion_rate
        );
    }
}
