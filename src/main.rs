//! Projman - project and task tracking from the command line.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use projman::config::Config;
use projman::manager::{Outcome, ProjectManager};
use projman::store::FileStore;
use projman::{logging, report, ProjmanError, Result};

#[derive(Parser)]
#[command(name = "projman")]
#[command(version = "0.1.0")]
#[command(about = "Track projects and their tasks", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Store directory (overrides the config file)
    #[arg(short, long, global = true, env = "PROJMAN_STORE")]
    store: Option<PathBuf>,

    /// Configuration file (defaults to ./projman.toml, then the user config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Manage tasks inside a project
    #[command(subcommand)]
    Task(TaskCommands),
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Create a new project
    Create {
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Close a project whose tasks are all done
    Close { name: String },

    /// Delete a closed project
    Delete { name: String },

    /// Show all projects
    List,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task to an active project
    Create {
        project: String,
        title: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// low, normal or high
        #[arg(short, long, default_value = "normal")]
        priority: String,
    },

    /// Move a task to its next status (in_progress or done)
    Status {
        project: String,
        title: String,
        status: String,
    },

    /// Delete a done task
    Delete { project: String, title: String },

    /// Show the tasks of a project
    List { project: String },

    /// Show one task in detail
    Show { project: String, title: String },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let config = Config::load(cli.config.as_deref(), &working_dir)?;
    let root = config.store_root(cli.store.as_deref(), &working_dir);
    tracing::debug!(root = %root.display(), "Using store");

    let mut pm = open_manager(&root)?;

    match cli.command {
        Commands::Project(command) => match command {
            ProjectCommands::Create { name, description } => {
                acknowledge(pm.create_project(&name, description.as_deref()))
            }
            ProjectCommands::Close { name } => acknowledge(pm.close_project(&name)),
            ProjectCommands::Delete { name } => acknowledge(pm.delete_project(&name)),
            ProjectCommands::List => {
                print!("{}", report::project_overview(pm.list_projects()));
                Ok(())
            }
        },
        Commands::Task(command) => match command {
            TaskCommands::Create {
                project,
                title,
                description,
                priority,
            } => acknowledge(pm.tasks().create_task(
                &project,
                &title,
                description.as_deref(),
                &priority,
            )),
            TaskCommands::Status {
                project,
                title,
                status,
            } => acknowledge(pm.tasks().change_task_status(&project, &title, &status)),
            TaskCommands::Delete { project, title } => {
                acknowledge(pm.tasks().delete_task(&project, &title))
            }
            TaskCommands::List { project } => {
                let project = pm
                    .find_project(&project)
                    .ok_or_else(|| ProjmanError::project_not_found(project.trim()))?;
                print!("{}", report::task_list(project));
                Ok(())
            }
            TaskCommands::Show { project, title } => {
                let task = pm
                    .tasks()
                    .find_task(&project, &title)
                    .cloned()
                    .ok_or_else(|| ProjmanError::task_not_found(project.trim(), title.trim()))?;
                print!("{}", report::task_details(&task));
                Ok(())
            }
        },
    }
}

fn open_manager(root: &Path) -> Result<ProjectManager<FileStore>> {
    let store = FileStore::open(root)?;
    ProjectManager::open(store)
}

/// Print the success message of an outcome, or pass its error on.
fn acknowledge<T>(outcome: Outcome<T>) -> Result<()> {
    let ack = outcome?;
    println!("{} {}", "✓".green(), ack.message.green());
    Ok(())
}
