//! navmenu command-line renderer
//!
//! Renders a menu item tree (JSON or YAML) to markup for a given route.
//!
//! Usage:
//!   navmenu menu.json --options menu.toml --route product/index --param tag=new

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use navmenu::html::RouteUrlResolver;
use navmenu::{Menu, MenuOptions, RouteContext, load_items};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, parse_params};

/// Render a navigation menu.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Menu items file (.json, .yml or .yaml).
    items: PathBuf,

    /// Menu options file (.toml, .yml, .yaml or .json).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Current route used for active-item matching.
    #[arg(long)]
    route: Option<String>,

    /// Current query parameter as key=value. Repeatable.
    #[arg(long = "param")]
    params: Vec<String>,

    /// Prefix for generated route URLs.
    #[arg(long)]
    base_path: Option<String>,

    /// Print the normalized tree as JSON instead of markup.
    #[arg(long)]
    normalized: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let options = match args.options.as_ref().or(config.options_path.as_ref()) {
        Some(path) => MenuOptions::load(path)?,
        None => MenuOptions::default(),
    };

    let items = load_items(&args.items)?;
    info!(items = items.len(), path = %args.items.display(), "loaded menu items");

    let params = if args.params.is_empty() {
        config.params
    } else {
        parse_params(args.params.iter().map(String::as_str))?
    };
    let route = args.route.unwrap_or(config.route);
    let context = RouteContext::new(&route).with_params(params);

    let resolver = match args.base_path.or(config.base_path) {
        Some(base) => RouteUrlResolver::with_base_path(&base),
        None => RouteUrlResolver::new(),
    };
    let menu = Menu::new(options).with_url_resolver(resolver);

    if args.normalized {
        let normalized = menu.normalize(&items, &context)?;
        let json = serde_json::to_string_pretty(&normalized.items)
            .context("failed to serialize normalized menu")?;
        println!("{json}");
    } else {
        println!("{}", menu.render(&items, &context)?);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
