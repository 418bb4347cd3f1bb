//! Terminal front end for the job application tracker.
//!
//! Each subcommand maps to one view of the tracker (list, detail, new, edit,
//! delete) and talks to a running server through the REST client.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use jobtrack::domain::{ApplicationId, ApplicationInput, ApplicationStatus};
use jobtrack::outbound::http_client::{ApplicationsHttpClient, DEFAULT_TIMEOUT};

/// `jobtrack-cli` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "jobtrack-cli",
    about = "Record and review job applications on a jobtrack server",
    version
)]
struct CliArgs {
    /// Server base URL.
    #[arg(long, value_name = "url", default_value = "http://127.0.0.1:8080")]
    base_url: Url,
    /// Per-request timeout in seconds.
    #[arg(long, value_name = "seconds", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List applications, newest first.
    List,
    /// Show one application.
    Show {
        /// Application identifier.
        id: String,
    },
    /// Record a new application.
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value_t = ApplicationStatus::Wishlist)]
        status: ApplicationStatus,
        #[command(flatten)]
        optional: OptionalFields,
    },
    /// Change fields of an existing application. Pass `""` to clear an
    /// optional field.
    Edit {
        /// Application identifier.
        id: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        status: Option<ApplicationStatus>,
        #[command(flatten)]
        optional: OptionalFields,
    },
    /// Delete an application permanently.
    Remove {
        /// Application identifier.
        id: String,
    },
}

#[derive(Debug, Default, Args)]
struct OptionalFields {
    #[arg(long)]
    location: Option<String>,
    /// Job posting URL.
    #[arg(long)]
    link: Option<String>,
    /// Where the posting was found.
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl OptionalFields {
    fn into_input(
        self,
        company: Option<String>,
        role: Option<String>,
        status: Option<ApplicationStatus>,
    ) -> ApplicationInput {
        ApplicationInput {
            company,
            role,
            status: status.map(|status| status.to_string()),
            location: self.location,
            link: self.link,
            source: self.source,
            salary: self.salary,
            notes: self.notes,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("render JSON")?;
    println!("{rendered}");
    Ok(())
}

/// Log to stderr so JSON output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args = CliArgs::parse();
    let client = ApplicationsHttpClient::new(
        args.base_url,
        Duration::from_secs(args.timeout_secs),
    )?;

    match args.command {
        Command::List => print_json(&client.get_all().await?),
        Command::Show { id } => {
            let id = ApplicationId::new(id)?;
            match client.get_by_id(&id).await {
                Some(application) => print_json(&application),
                None => bail!("application {id} not found"),
            }
        }
        Command::Add {
            company,
            role,
            status,
            optional,
        } => {
            let fields = optional.into_input(Some(company), Some(role), Some(status));
            print_json(&client.create(&fields).await?)
        }
        Command::Edit {
            id,
            company,
            role,
            status,
            optional,
        } => {
            let id = ApplicationId::new(id)?;
            let changes = optional.into_input(company, role, status);
            print_json(&client.update(&id, &changes).await?)
        }
        Command::Remove { id } => {
            let id = ApplicationId::new(id)?;
            client.delete(&id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}
