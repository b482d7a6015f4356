// Entrypoint for the BookGen terminal front end.
// - Keeps `main` small: read flags, set up logging, build the API client
//   and hand it to the navigation loop.

use anyhow::Result;
use bookgen::{
    api::ApiClient,
    config::Config,
    router::Route,
    ui::{Shell, TermPrompter},
    validate::current_year,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bookgen")]
#[command(author, version, about = "Browse, add, edit and delete books", long_about = None)]
struct Cli {
    /// Base URL of the books API (overrides BOOKGEN_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Screen to open first: /, /add, /edit/<id> or /view/<id>
    #[arg(long, default_value = "/")]
    route: Route,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "bookgen=debug" } else { "bookgen=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().with_start_route(cli.route);
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }

    let api = ApiClient::new(&config)?;
    tracing::debug!(api_url = api.base_url(), "starting");

    // Start the interactive menu. This call blocks until the user exits.
    let mut prompter = TermPrompter;
    let mut shell = Shell::new(&api, &mut prompter, std::io::stdout(), current_year())
        .clear_screen(true);
    shell.run(config.start_route)
}
