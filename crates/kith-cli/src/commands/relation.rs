//! Relation commands

use clap::{Args, Subcommand};
use serde::Serialize;

use super::canonical_kind;
use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use kith_core::{Directionality, RelationshipPreset};

#[derive(Args)]
pub struct RelationArgs {
    #[command(subcommand)]
    pub command: RelationCommands,
}

#[derive(Subcommand)]
pub enum RelationCommands {
    /// Add a relationship (the target is created if unknown)
    Add {
        /// Source person
        from: String,
        /// Target person
        to: String,
        /// Relationship kind
        #[arg(short, long)]
        kind: String,
        /// Declare a new kind as directed
        #[arg(long, conflicts_with = "undirected")]
        directed: bool,
        /// Declare a new kind as undirected
        #[arg(long)]
        undirected: bool,
    },
    /// Remove a relationship
    Remove {
        /// Source person
        from: String,
        /// Target person
        to: String,
        /// Relationship kind
        #[arg(short, long)]
        kind: String,
    },
    /// List relationships
    List {
        /// Filter by kind
        #[arg(short, long)]
        kind: Option<String>,
        /// Only relationships touching this person
        #[arg(short, long)]
        person: Option<String>,
    },
}

#[derive(Serialize)]
struct RelationRow<'a> {
    kind: &'a str,
    directionality: Directionality,
    source: &'a str,
    target: &'a str,
}

pub fn run(args: &RelationArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    match &args.command {
        RelationCommands::Add {
            from,
            to,
            kind,
            directed,
            undirected,
        } => {
            let kind = canonical_kind(kind);
            let source = ctx
                .registry
                .key_for(from)
                .filter(|key| ctx.registry.contains(key))
                .ok_or_else(|| anyhow::anyhow!("Person '{}' not found", from))?;

            let directionality = if *directed {
                ctx.registry.add_directed_edge(&source, to, &kind)?;
                Directionality::Directed
            } else if *undirected {
                ctx.registry.add_undirected_edge(&source, to, &kind)?;
                Directionality::Undirected
            } else {
                let fallback = RelationshipPreset::default_directionality(&kind)
                    .unwrap_or(Directionality::Directed);
                ctx.registry.add_edge(&source, to, &kind, fallback)?
            };

            ctx.save()?;
            let target = ctx.registry.key_for(to).unwrap_or_else(|| to.clone());
            tracing::info!("Added {} edge {} -> {} ({})", directionality, source, target, kind);

            match directionality {
                Directionality::Directed => {
                    println!("Added relationship: {} -[{}]-> {}", source, kind, target)
                }
                Directionality::Undirected => {
                    println!("Added relationship: {} -[{}]- {}", source, kind, target)
                }
            }
        }
        RelationCommands::Remove { from, to, kind } => {
            let kind = canonical_kind(kind);
            if ctx.registry.remove_edge(from, to, &kind) {
                ctx.save()?;
                tracing::info!("Removed {} edge {} -> {}", kind, from, to);
                println!("Removed relationship: {} -[{}]- {}", from, kind, to);
            } else {
                println!("No '{}' relationship from {} to {}", kind, from, to);
            }
        }
        RelationCommands::List { kind, person } => {
            let graphs = match kind {
                Some(kind) => {
                    let kind = canonical_kind(kind);
                    let graph = ctx
                        .registry
                        .relationship_graph(&kind)
                        .ok_or_else(|| anyhow::anyhow!("Unknown relationship kind '{}'", kind))?;
                    vec![graph]
                }
                None => ctx.registry.rebuild_relationship_graphs().into_values().collect(),
            };
            let person = match person {
                Some(name) => Some(
                    ctx.registry
                        .key_for(name)
                        .ok_or_else(|| anyhow::anyhow!("Invalid name '{}'", name))?,
                ),
                None => None,
            };

            let rows: Vec<RelationRow> = graphs
                .iter()
                .flat_map(|graph| {
                    graph.edges.iter().map(move |edge| RelationRow {
                        kind: &graph.kind,
                        directionality: graph.directionality,
                        source: &edge.source,
                        target: &edge.target,
                    })
                })
                .filter(|row| match &person {
                    Some(name) => row.source == name.as_str() || row.target == name.as_str(),
                    None => true,
                })
                .collect();
            tracing::info!("Found {} relationships", rows.len());

            match ctx.format {
                OutputFormat::Json => println!("{}", to_json(&rows)),
                OutputFormat::Table if rows.is_empty() => println!("No relationships found"),
                OutputFormat::Table => {
                    println!("Relationships ({} found):", rows.len());
                    for row in rows {
                        let arrow = if row.directionality.is_directed() { "->" } else { "--" };
                        println!("  {} {} {} ({})", row.source, arrow, row.target, row.kind);
                    }
                }
            }
        }
    }

    Ok(())
}
