// src/main.rs

mod cli;

use ancestor_tree::config::Settings;
use ancestor_tree::name::NameDisplay;
use ancestor_tree::render::{self, TextOptions};
use ancestor_tree::view::AncestorView;
use ancestor_tree::{AncestorTreeBuilder, Database};
use anyhow::Context;
use clap::Parser;
use cli::{Args, OutputFormat, SortMode};
use env_logger::Builder;
use log::LevelFilter;
use std::io::{self, Write};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let start_time = Instant::now();

    let settings = Settings::load(args.config.as_deref())
        .with_context(|| format!("loading settings from {:?}", args.config))?;
    let max_depth = settings.depth_with_override(args.depth);
    let names = NameDisplay::new(args.name_format.unwrap_or(settings.name_format));

    let db = Database::open(&args.db, !args.quiet)
        .with_context(|| format!("reading {}", args.db.display()))?;
    log::info!("Loaded {} people in {:.2?}", db.people_count(), start_time.elapsed());

    let root = args
        .person
        .as_deref()
        .map(|key| db.resolve_person(key))
        .transpose()?;

    let builder = AncestorTreeBuilder::new(&db, &names, &db, max_depth);
    let mut view = AncestorView::new();
    if args.sort == SortMode::Birth {
        view = view.with_birth_sort(settings.undated_sort);
    }
    view.on_active_changed(root, &builder);
    if let Some(active) = view.active().filter(|_| !view.has_data()) {
        log::info!("No ancestors recorded for {}", active);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            render::render_text(view.model(), TextOptions { tooltips: args.tooltips }, &mut out)?
        }
        OutputFormat::Json => render::render_json(view.model(), &mut out)?,
    }
    out.flush()?;

    log::info!(
        "{} rows over {} generations in {:.2?}",
        view.summary().rows,
        view.summary().depth_reached,
        start_time.elapsed()
    );
    Ok(())
}
