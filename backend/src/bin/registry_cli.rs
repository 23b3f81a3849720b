//! Command-line front end for a running user registry.
//!
//! Drives the same registration form and user directory a browser client
//! would, against the REST API at `--base-url`.
//!
//! ```sh
//! registry-cli register --firstname Jean --lastname Dupont \
//!     --email jean.dupont@example.com --date-birth 1990-01-01 \
//!     --postal-code 75000 --city Paris
//! registry-cli list
//! registry-cli delete 3fa85f64-5717-4562-b3fc-2c963f66afa6 --password secret
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use mockable::DefaultClock;
use reqwest::Url;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use user_registry::domain::ports::UserGateway;
use user_registry::domain::user_directory::format_birth_date;
use user_registry::domain::{
    DeleteOutcome, EligibilityGate, Field, FormState, Locale, RegistrationDraft, RegistrationForm,
    SubmitOutcome, UserDirectory, UserId,
};
use user_registry::outbound::registry_api::HttpUserGateway;

/// `registry-cli` arguments.
#[derive(Debug, Parser)]
#[command(name = "registry-cli", about = "Register, list, and delete users", version)]
struct CliArgs {
    /// Registry API root.
    #[arg(
        long = "base-url",
        env = "REGISTRY_API_URL",
        default_value = "http://localhost:8080",
        value_name = "url"
    )]
    base_url: Url,
    /// Language for notifications and field errors.
    #[arg(long, value_enum, default_value_t = Language::Fr)]
    language: Language,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Language {
    Fr,
    En,
}

impl From<Language> for Locale {
    fn from(value: Language) -> Self {
        match value {
            Language::Fr => Locale::Fr,
            Language::En => Locale::En,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered users.
    List,
    /// Fill in the registration form and submit it.
    Register(RegisterArgs),
    /// Delete a user with the shared admin password.
    Delete {
        /// User identifier.
        id: String,
        #[arg(long, env = "REGISTRY_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Debug, clap::Args)]
struct RegisterArgs {
    #[arg(long, default_value = "")]
    firstname: String,
    #[arg(long, default_value = "")]
    lastname: String,
    #[arg(long, default_value = "")]
    email: String,
    /// Birth date as `YYYY-MM-DD`.
    #[arg(long = "date-birth", default_value = "")]
    date_birth: String,
    #[arg(long = "postal-code", default_value = "")]
    postal_code: String,
    #[arg(long, default_value = "")]
    city: String,
}

impl From<RegisterArgs> for RegistrationDraft {
    fn from(value: RegisterArgs) -> Self {
        Self {
            firstname: value.firstname,
            lastname: value.lastname,
            email: value.email,
            date_birth: value.date_birth,
            postal_code: value.postal_code,
            city: value.city,
        }
    }
}

fn main() -> io::Result<()> {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> io::Result<()> {
    let locale = Locale::from(args.language);
    let gateway: Arc<dyn UserGateway> = Arc::new(
        HttpUserGateway::new(args.base_url)
            .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?,
    );

    match args.command {
        Command::List => list(gateway).await,
        Command::Register(register) => submit(gateway, register.into(), locale).await,
        Command::Delete { id, password } => delete(gateway, &id, &password, locale).await,
    }
}

async fn list(gateway: Arc<dyn UserGateway>) -> io::Result<()> {
    let mut directory = UserDirectory::new(gateway);
    let users = directory.refresh().await.map_err(io::Error::other)?;
    for user in users {
        println!(
            "{}\t{} {}\t{}\t{}\t{} {}",
            user.id(),
            user.firstname(),
            user.lastname(),
            user.email(),
            format_birth_date(user.date_birth()),
            user.postal_code(),
            user.city(),
        );
    }
    Ok(())
}

async fn submit(
    gateway: Arc<dyn UserGateway>,
    draft: RegistrationDraft,
    locale: Locale,
) -> io::Result<()> {
    let form = RegistrationForm::new(gateway, EligibilityGate::new(Arc::new(DefaultClock)));
    let mut state = FormState::with_draft(draft);
    let outcome = form.submit(&mut state).await;

    for field in Field::ALL {
        if let Some(error) = state.errors().get(field) {
            eprintln!("{field}: {}", error.message(locale));
        }
    }
    match &outcome {
        SubmitOutcome::Registered(user) => {
            println!("{} ({})", outcome.notification(locale), user.id());
            Ok(())
        }
        _ => Err(io::Error::other(outcome.notification(locale))),
    }
}

async fn delete(
    gateway: Arc<dyn UserGateway>,
    id: &str,
    password: &str,
    locale: Locale,
) -> io::Result<()> {
    let id = UserId::new(id)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
    let mut directory = UserDirectory::new(gateway);
    let outcome = directory.delete_user(&id, password).await;
    match outcome {
        DeleteOutcome::Deleted => {
            println!("{}", outcome.notification(locale));
            Ok(())
        }
        DeleteOutcome::Failed(_) => {
            Err(io::Error::other(outcome.notification(locale)))
        }
    }
}
