//! Graph export command

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use kith_core::{Directionality, RelationshipGraph};

#[derive(Args)]
pub struct GraphArgs {
    /// Only this relationship kind
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Export format; without it a summary is printed
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Dot,
    Graphml,
    Json,
}

pub fn run(args: &GraphArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let graphs: Vec<RelationshipGraph> = match &args.kind {
        Some(kind) => vec![ctx
            .registry
            .relationship_graph(kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown relationship kind '{}'", kind))?],
        None => ctx.registry.rebuild_relationship_graphs().into_values().collect(),
    };
    tracing::debug!("Built {} relationship graphs", graphs.len());

    let Some(format) = args.export else {
        print_summary(&graphs, ctx.format);
        return Ok(());
    };

    let content = match format {
        ExportFormat::Dot => export_to_dot(&graphs),
        ExportFormat::Graphml => export_to_graphml(&graphs),
        ExportFormat::Json => to_json(&graphs),
    };

    match &args.output {
        Some(path) => {
            write_private(path, &content)?;
            tracing::info!("Exported {} graphs to {:?}", graphs.len(), path);
            println!("Exported to {:?}", path);
        }
        None => println!("{}", content),
    }

    Ok(())
}

fn print_summary(graphs: &[RelationshipGraph], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", to_json(&graphs)),
        OutputFormat::Table if graphs.is_empty() => println!("No relationship kinds declared yet"),
        OutputFormat::Table => {
            for graph in graphs {
                println!(
                    "{} ({}): {} nodes, {} edges",
                    graph.kind,
                    graph.directionality,
                    graph.node_count(),
                    graph.edge_count()
                );
            }
        }
    }
}

fn write_private(path: &Path, content: &str) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(content.as_bytes())?;
    }
    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }
    Ok(())
}

fn export_to_dot(graphs: &[RelationshipGraph]) -> String {
    let mut dot = String::new();

    for graph in graphs {
        let (keyword, arrow) = match graph.directionality {
            Directionality::Directed => ("digraph", "->"),
            Directionality::Undirected => ("graph", "--"),
        };
        dot.push_str(&format!("{} \"{}\" {{\n", keyword, dot_escape(&graph.kind)));
        for node in &graph.nodes {
            dot.push_str(&format!("  \"{}\";\n", dot_escape(node)));
        }
        for edge in &graph.edges {
            dot.push_str(&format!(
                "  \"{}\" {} \"{}\";\n",
                dot_escape(&edge.source),
                arrow,
                dot_escape(&edge.target)
            ));
        }
        dot.push_str("}\n");
    }

    dot
}

fn export_to_graphml(graphs: &[RelationshipGraph]) -> String {
    let mut xml = String::new();

    xml.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns
         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">
  <key id="d0" for="node" attr.name="name" attr.type="string"/>
"#,
    );

    for graph in graphs {
        let kind = xml_escape(&graph.kind);
        xml.push_str(&format!(
            "  <graph id=\"{}\" edgedefault=\"{}\">\n",
            kind, graph.directionality
        ));

        // Node ids are scoped by kind; one document may hold several graphs
        for node in &graph.nodes {
            let name = xml_escape(node);
            xml.push_str(&format!(
                "    <node id=\"{}:{}\">\n      <data key=\"d0\">{}</data>\n    </node>\n",
                kind, name, name
            ));
        }
        for edge in &graph.edges {
            xml.push_str(&format!(
                "    <edge source=\"{}:{}\" target=\"{}:{}\"/>\n",
                kind,
                xml_escape(&edge.source),
                kind,
                xml_escape(&edge.target)
            ));
        }

        xml.push_str("  </graph>\n");
    }

    xml.push_str("</graphml>\n");
    xml
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kith_core::Registry;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.create_or_get("Alice Smith").unwrap();
        registry.create_or_get("Bob Jones").unwrap();
        registry
            .add_undirected_edge("Alice Smith", "Bob Jones", "friends")
            .unwrap();
        registry
            .add_directed_edge("Alice Smith", "Bob Jones", "children")
            .unwrap();
        registry
    }

    #[test]
    fn test_dot_export() {
        let graphs: Vec<_> = registry().rebuild_relationship_graphs().into_values().collect();
        let dot = export_to_dot(&graphs);

        assert!(dot.contains("digraph \"children\" {"));
        assert!(dot.contains("\"Alice Smith\" -> \"Bob Jones\";"));
        assert!(dot.contains("graph \"friends\" {"));
        assert_eq!(dot.matches(" -- ").count(), 1);
    }

    #[test]
    fn test_graphml_export() {
        let graphs: Vec<_> = registry().rebuild_relationship_graphs().into_values().collect();
        let xml = export_to_graphml(&graphs);

        assert!(xml.contains("<graph id=\"friends\" edgedefault=\"undirected\">"));
        assert!(xml.contains("<graph id=\"children\" edgedefault=\"directed\">"));
        assert!(xml.contains("<edge source=\"children:Alice Smith\" target=\"children:Bob Jones\"/>"));
        assert!(xml.trim_end().ends_with("</graphml>"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(xml_escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(dot_escape("say \"hi\""), "say \\\"hi\\\"");
    }
}
