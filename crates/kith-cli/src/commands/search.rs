//! Search command

use clap::Args;

use super::canonical_kind;
use crate::config::SearchMode;
use crate::output::{summary_line, to_json, OutputFormat, PersonView};
use crate::AppContext;
use kith_core::Person;
use kith_search::{ExactSearchEngine, PeopleQuery, SearchEngine};

#[derive(Args)]
pub struct SearchArgs {
    /// Search query (empty matches everyone)
    #[arg(default_value = "")]
    pub query: String,

    /// Use fuzzy matching over names, bios, emails and custom attributes
    #[arg(long)]
    pub fuzzy: bool,

    /// Only people with a relationship of this kind
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Maximum results
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

#[cfg(feature = "fuzzy")]
fn fuzzy_engine() -> Box<dyn SearchEngine> {
    Box::new(kith_search::FuzzySearchEngine::new())
}

#[cfg(not(feature = "fuzzy"))]
fn fuzzy_engine() -> Box<dyn SearchEngine> {
    tracing::warn!("Fuzzy search not compiled in, falling back to exact search");
    Box::new(ExactSearchEngine::new())
}

pub fn run(args: &SearchArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mode = if args.fuzzy {
        SearchMode::Fuzzy
    } else {
        ctx.config.search_mode()
    };
    tracing::debug!("Searching for '{}' ({} mode)", args.query, mode);

    let engine: Box<dyn SearchEngine> = match mode {
        SearchMode::Exact => Box::new(ExactSearchEngine::new()),
        SearchMode::Fuzzy => fuzzy_engine(),
    };

    let mut query = PeopleQuery::text(args.query.as_str()).with_limit(args.limit);
    if let Some(kind) = &args.kind {
        query = query.with_kind(canonical_kind(kind));
    }

    let results: Vec<&Person> = engine.search(&query, &ctx.registry)?;
    tracing::info!("Search returned {} people", results.len());

    match ctx.format {
        OutputFormat::Json => {
            let views: Vec<PersonView> = results.into_iter().map(PersonView::from).collect();
            println!("{}", to_json(&views));
        }
        OutputFormat::Table if results.is_empty() => println!("No matches for '{}'", args.query),
        OutputFormat::Table => {
            println!("Found {} people:", results.len());
            for person in results {
                println!("{}", summary_line(person));
            }
        }
    }

    Ok(())
}
