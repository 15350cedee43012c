//! Relationship kind catalog

use serde::Serialize;

use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use kith_core::{Directionality, RelationshipPreset};

#[derive(Serialize)]
struct KindRow<'a> {
    kind: &'a str,
    directionality: Directionality,
    edges: usize,
}

pub fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let graphs = ctx.registry.rebuild_relationship_graphs();
    let rows: Vec<KindRow> = graphs
        .values()
        .map(|graph| KindRow {
            kind: &graph.kind,
            directionality: graph.directionality,
            edges: graph.edge_count(),
        })
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&rows)),
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No relationship kinds declared yet");
            } else {
                println!("Relationship kinds ({}):", rows.len());
                for row in &rows {
                    println!("  {:<24} {:<10} {} edges", row.kind, row.directionality.as_str(), row.edges);
                }
            }

            let unused: Vec<&str> = RelationshipPreset::ALL
                .iter()
                .filter(|p| !graphs.contains_key(p.kind()))
                .map(|p| p.kind())
                .collect();
            if !unused.is_empty() {
                println!();
                println!("Presets available: {}", unused.join(", "));
            }
        }
    }

    Ok(())
}
