use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

use jobboard::domain::{AnalysisModel, SortDirection, SortKey};
use jobboard::services::{DashboardController, DeleteOutcome};
use jobboard::ui::{render_dashboard_page, terminal};
use jobboard::{DashboardConfig, HttpJobStore};

#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(version)]
#[command(about = "Track analyzed job postings from the command line")]
struct Cli {
    /// Job store root URL (overrides config and JOBBOARD_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List jobs, optionally filtered by technology and sorted
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Print the visible jobs as JSON
        #[arg(long)]
        json: bool,
    },

    /// List technology labels known to the job store
    Techs,

    /// Delete a job by its URL
    Delete {
        url: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Set a job's priority (0-5)
    Priority {
        url: String,

        #[arg(value_parser = clap::value_parser!(i64).range(0..=5))]
        priority: i64,
    },

    /// Submit a job posting URL for analysis
    Analyze {
        url: String,

        /// Model to analyze with (anthropic or openai)
        #[arg(long)]
        model: Option<AnalysisModel>,
    },

    /// Write the dashboard as a standalone HTML page
    Render {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Only show jobs tagged with this technology
    #[arg(long)]
    tech: Option<String>,

    /// Sort column: priority or date
    #[arg(long)]
    sort: Option<SortKey>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    desc: bool,
}

impl ViewArgs {
    fn apply(&self, controller: &DashboardController) {
        if let Some(tech) = &self.tech {
            controller.select_technology(Some(tech));
        }
        if let Some(key) = self.sort {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            controller.sort_by(key, direction);
        }
    }
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load_from(path)?,
        None => DashboardConfig::load()?,
    };
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

fn init_logging(config: &DashboardConfig, verbose: u8) {
    let level = match verbose {
        0 => config.log_level.parse().unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn prompt_on_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config, cli.verbose);

    let store = HttpJobStore::from_config(&config).context("Failed to build HTTP client")?;
    let controller = DashboardController::new(Arc::new(store), config.default_model);

    match cli.command {
        Commands::List { view, json } => {
            controller.load().await.context("Failed to load jobs")?;
            view.apply(&controller);
            let visible = controller.visible_jobs();
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                let snapshot = controller.snapshot();
                let refs: Vec<_> = visible.iter().collect();
                print!("{}", terminal::render_job_lines(&refs, snapshot.state.filter()));
            }
        }
        Commands::Techs => {
            controller.load_techs().await.context("Failed to load technologies")?;
            let snapshot = controller.snapshot();
            print!(
                "{}",
                terminal::render_tech_lines(snapshot.state.techs(), snapshot.state.filter())
            );
        }
        Commands::Delete { url, yes } => {
            let skip_prompt = yes || !config.confirm_deletes;
            let confirm = move |prompt: &str| skip_prompt || prompt_on_stdin(prompt);
            match controller.delete_job(&url, &confirm).await {
                Ok(DeleteOutcome::Deleted) => println!("✅ Deleted {url}"),
                Ok(DeleteOutcome::Cancelled) => println!("Cancelled"),
                Err(_) => bail!(controller.take_alert().unwrap_or_default()),
            }
        }
        Commands::Priority { url, priority } => {
            if controller.change_priority(&url, priority).await.is_err() {
                bail!(controller.take_alert().unwrap_or_default());
            }
            println!("✅ Priority of {url} set to {priority}");
        }
        Commands::Analyze { url, model } => {
            if let Some(model) = model {
                controller.select_model(model);
            }
            match controller.analyze(&url).await {
                Ok(job) => {
                    println!("✅ Job Analysis Results:");
                    println!("{}", serde_json::to_string_pretty(&job)?);
                }
                Err(err) => bail!("Error: {}", err.user_message()),
            }
        }
        Commands::Render { view, output } => {
            controller.load().await.context("Failed to load jobs")?;
            view.apply(&controller);
            let page = render_dashboard_page(&controller.view());
            match output {
                Some(path) => {
                    std::fs::write(&path, page)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✅ Dashboard written to: {}", path.display());
                }
                None => print!("{page}"),
            }
        }
    }

    Ok(())
}
