mod report;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use secrecy::SecretString;

use crate::config::{AccountType, Config};
use crate::services::client::{DEFAULT_API_BASE, DEFAULT_API_VERSION};
use crate::{logging, tui};

use report::ReportView;

/// GitHub Copilot usage metrics for an enterprise or organization
#[derive(Parser)]
#[command(name = "copilot-metrics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enterprise slug or organization login
    #[arg(long, global = true, env = "GITHUB_ACCOUNT")]
    account: Option<String>,

    /// Whether the account is an enterprise or an organization
    #[arg(long, global = true, value_enum, default_value_t = AccountType::Enterprise)]
    account_type: AccountType,

    /// Personal access token with Copilot metrics access
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub REST API version header
    #[arg(long, global = true, default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// API base URL (GitHub Enterprise Server or testing)
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// First day to include (YYYY-MM-DD)
    #[arg(long, global = true)]
    since: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, global = true)]
    until: Option<NaiveDate>,

    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Daily active and engaged users
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Code-completion engaged users per editor
    Editors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Code-completion engaged users per language
    Languages {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggestion acceptance rates per language
    Acceptance {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// All of the above
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Resolve flags and environment into the run configuration
    pub fn to_config(&self) -> Config {
        Config {
            account: self.account.clone(),
            account_type: self.account_type,
            token: self.token.clone().map(SecretString::from),
            api_version: self.api_version.clone(),
            api_base: self.api_url.clone(),
            since: self.since,
            until: self.until,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.to_config();
        let (view, json) = match self.command {
            None | Some(Commands::Tui) => {
                // Without a log file the TUI still works; events are dropped
                let _guard = match logging::init_file(self.verbose) {
                    Ok(guard) => Some(guard),
                    Err(e) => {
                        eprintln!("[copilot-metrics] Warning: logging disabled: {}", e);
                        None
                    }
                };
                return tui::run(config);
            }
            Some(Commands::Users { json }) => (ReportView::Users, json),
            Some(Commands::Editors { json }) => (ReportView::Editors, json),
            Some(Commands::Languages { json }) => (ReportView::Languages, json),
            Some(Commands::Acceptance { json }) => (ReportView::Acceptance, json),
            Some(Commands::Report { json }) => (ReportView::All, json),
        };

        logging::init_stderr(self.verbose);
        report::run(view, json, &config)
    }
}
