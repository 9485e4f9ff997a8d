//! apiquery - query the film catalog and library APIs from the command line.
//!
//! Every client query is exposed as a subcommand; `demo` (the default) runs
//! the scripted tour with a fixed delay between calls.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use apiquery_core::catalog::DEFAULT_CATALOG_URL;
use apiquery_core::library::DEFAULT_LIBRARY_URL;
use apiquery_core::{ClientConfig, Credentials};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod demo;
mod output;
mod pacing;

use demo::Demo;
use output::Render;
use pacing::FixedDelay;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "apiquery",
    about = "Query the film catalog and library APIs",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// Base URL of the catalog API
    #[clap(long, env = "APIQUERY_CATALOG_URL", default_value = DEFAULT_CATALOG_URL, global = true)]
    catalog_url: String,

    /// Base URL of the library API
    #[clap(long, env = "APIQUERY_LIBRARY_URL", default_value = DEFAULT_LIBRARY_URL, global = true)]
    library_url: String,

    /// Library account used to authenticate list creation
    #[clap(long, env = "APIQUERY_USERNAME", global = true)]
    username: Option<String>,

    /// Password for --username
    #[clap(long, env = "APIQUERY_PASSWORD", hide_env_values = true, requires = "username", global = true)]
    password: Option<String>,

    /// Per-request timeout in seconds
    #[clap(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..), global = true)]
    timeout_secs: u64,

    /// Pause between demo queries in milliseconds
    #[clap(long, default_value_t = 2000, global = true)]
    delay_ms: u64,

    /// Set log level (RUST_LOG takes precedence when set)
    #[clap(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Title of the first film a person appears in
    FirstFilm { person_id: String },

    /// Highest atmospheric speed among the first page of vehicles
    MaxSpeed,

    /// Distinct eye colors among the first page of species
    EyeColors,

    /// Species whose hair colors contain COLOR
    SpeciesByHair { color: String },

    /// Mean number of characters per film, truncated
    AverageCharacters,

    /// Top work of the first author matching AUTHOR
    TopWork { author: String },

    /// Whether the first book matching BOOK is available in LANG
    HasLanguage { book: String, lang: String },

    /// Amazon product link for the first book matching BOOK
    AmazonLink { book: String },

    /// Author with the most works among the given names
    CompareAuthors {
        #[clap(required = true)]
        authors: Vec<String>,
    },

    /// Create a reading list owned by OWNER and print the HTTP status
    CreateList { owner: String, list_name: String },

    /// Run every query in sequence with a pause in between
    Demo,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let credentials = match (&self.username, &self.password) {
            (Some(username), password) => Some(Credentials::new(
                username.clone(),
                password.clone().unwrap_or_default(),
            )),
            (None, _) => None,
        };
        ClientConfig {
            catalog_url: self.catalog_url.clone(),
            library_url: self.library_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            credentials,
        }
    }
}

/// Logs go to stderr so stdout carries only results.
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let config = cli.client_config();
    debug!(
        catalog_url = %config.catalog_url,
        library_url = %config.library_url,
        authenticated = config.credentials.is_some(),
        "starting"
    );
    let catalog = config.catalog_client();
    let library = config.library_client();
    let transport = config.transport();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let line = match cli.command.unwrap_or(Command::Demo) {
        Command::FirstFilm { person_id } => catalog
            .get_first_film_title(&transport, &person_id)
            .context("first film lookup failed")?
            .render(),
        Command::MaxSpeed => catalog
            .get_max_speed(&transport)
            .context("max speed lookup failed")?
            .render(),
        Command::EyeColors => catalog
            .get_all_eye_colors(&transport)
            .context("eye color lookup failed")?
            .render(),
        Command::SpeciesByHair { color } => catalog
            .get_species_by_hair_color(&transport, &color)
            .context("species lookup failed")?
            .render(),
        Command::AverageCharacters => catalog
            .get_average_character_count(&transport)
            .context("character count failed")?
            .render(),
        Command::TopWork { author } => library
            .get_top_work_of_author(&transport, &author)
            .context("author search failed")?
            .render(),
        Command::HasLanguage { book, lang } => library
            .book_has_language(&transport, &book, &lang)
            .context("book search failed")?
            .render(),
        Command::AmazonLink { book } => library
            .get_amazon_link(&transport, &book)
            .context("book search failed")?
            .render(),
        Command::CompareAuthors { authors } => library
            .compare_authors(&transport, authors.as_slice())
            .context("author comparison failed")?
            .render(),
        Command::CreateList { owner, list_name } => library
            .create_book_list(&transport, &owner, &list_name)
            .context("list creation failed")?
            .render(),
        Command::Demo => {
            let pacer = FixedDelay::new(Duration::from_millis(cli.delay_ms));
            let demo = Demo {
                catalog: &catalog,
                library: &library,
                transport: &transport,
                pacer: &pacer,
            };
            demo.run(&mut out).context("failed to write results")?;
            return Ok(());
        }
    };

    writeln!(out, "{line}").context("failed to write result")?;
    Ok(())
}
