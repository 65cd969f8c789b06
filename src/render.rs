use colored::*;
use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregate::BucketTree;

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented text with one header line per bucket
    #[default]
    Plain,
    /// Nested JSON objects in bucket order
    Json,
}

/// Renders the tree as an indented listing: one header per bucket with its
/// row count, rows as single-line JSON under the innermost header.
pub fn render_plain<R: Serialize>(tree: &BucketTree<'_, R>) -> String {
    let mut out = String::new();
    render_plain_level(tree, 0, &mut out);
    out
}

fn render_plain_level<R: Serialize>(tree: &BucketTree<'_, R>, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match tree {
        BucketTree::Node(children) => {
            for (key, child) in children {
                let header = format!("{key} ({})", child.row_count());
                out.push_str(&format!("{pad}{}\n", header.bold()));
                render_plain_level(child, indent + 1, out);
            }
        }
        BucketTree::Leaf(rows) => {
            for row in rows {
                let line = serde_json::to_string(row)
                    .unwrap_or_else(|_| "<unrenderable row>".to_string());
                out.push_str(&format!("{pad}{line}\n"));
            }
        }
    }
}

/// Renders a one-level tree as `count  key` lines.
pub fn render_counts<R: Serialize>(tree: &BucketTree<'_, R>) -> String {
    let mut out = String::new();
    if let BucketTree::Node(children) = tree {
        for (key, child) in children {
            out.push_str(&format!("{:>7}  {key}\n", child.row_count()));
        }
    }
    out
}

// serde_json's own map type re-sorts string keys, so the JSON renderer goes
// through IndexMap to keep the engine's key order on the wire.
#[derive(Serialize)]
#[serde(untagged)]
enum JsonTree<'t, 'a, R: Serialize> {
    Node(IndexMap<String, JsonTree<'t, 'a, R>>),
    Leaf(&'t [&'a R]),
}

fn to_json_tree<'t, 'a, R: Serialize>(tree: &'t BucketTree<'a, R>) -> JsonTree<'t, 'a, R> {
    match tree {
        BucketTree::Node(children) => JsonTree::Node(
            children
                .iter()
                .map(|(key, child)| (key.to_string(), to_json_tree(child)))
                .collect(),
        ),
        BucketTree::Leaf(rows) => JsonTree::Leaf(rows),
    }
}

/// Renders the tree as pretty-printed JSON, keys in the engine's order.
pub fn render_json<R: Serialize>(tree: &BucketTree<'_, R>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_json_tree(tree))
}
