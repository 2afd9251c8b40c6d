use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::search::pagination::DEFAULT_PAGE_SIZE;
use crate::source::JobScope;
use crate::source::JobSource;
use crate::source::file::FileJobSource;
use crate::source::postgres::{PgJobSource, create_pool};

#[derive(Parser, Debug, Clone)]
#[command(name = "jobboard", about = "Job board search and filter engine")]
pub struct Config {
    /// Database connection URL for the jobs table
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Read jobs from a JSON file instead of the database
    #[arg(long, env = "JOBS_FILE", global = true)]
    pub jobs_file: Option<PathBuf>,

    /// Only include jobs whose location mentions this district.
    /// Takes precedence over --category.
    #[arg(long, env = "JOB_DISTRICT", global = true)]
    pub district: Option<String>,

    /// Only include jobs in this category
    #[arg(long, env = "JOB_CATEGORY", global = true)]
    pub category: Option<String>,

    /// Jobs revealed per page
    #[arg(long, env = "PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: usize,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", default_value = "false", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the search API (default when no subcommand given)
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,

        /// Seconds between job refreshes
        #[arg(long, env = "REFRESH_INTERVAL", default_value = "300")]
        refresh_interval: u64,
    },
    /// Run one search and print the visible jobs as JSON
    Search {
        /// Search term matched against title, company and description
        #[arg(long)]
        search: Option<String>,

        /// Employment type to include (repeatable)
        #[arg(long = "job-type")]
        job_types: Vec<String>,

        /// Location type to include (repeatable)
        #[arg(long = "location-type")]
        location_types: Vec<String>,

        /// Canonical location to include (repeatable)
        #[arg(long = "location")]
        locations: Vec<String>,

        /// Number of pages to reveal
        #[arg(long, default_value = "1")]
        pages: usize,
    },
}

impl Config {
    /// Resolve the command, defaulting to Serve if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            refresh_interval: std::env::var("REFRESH_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        })
    }

    pub fn scope(&self) -> JobScope {
        match (&self.district, &self.category) {
            (Some(district), _) => JobScope::District(district.clone()),
            (None, Some(category)) => JobScope::Category(category.clone()),
            (None, None) => JobScope::All,
        }
    }

    /// Build the configured job source. A JSON file wins over the database.
    pub async fn job_source(&self) -> anyhow::Result<Arc<dyn JobSource>> {
        if let Some(path) = &self.jobs_file {
            tracing::info!("Reading jobs from {}", path.display());
            return Ok(Arc::new(FileJobSource::new(path.clone(), self.scope())));
        }
        let Some(url) = &self.database_url else {
            anyhow::bail!("Either --database-url or --jobs-file is required");
        };
        tracing::info!("Connecting to database...");
        let pool = create_pool(url).await?;
        Ok(Arc::new(PgJobSource::new(pool, self.scope())))
    }
}
