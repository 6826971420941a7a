//! `flexdocs outline` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use flexdocs_config::Config;
use flexdocs_site::Article;
use flexdocs_toc::{OutlineNode, build_outline};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Markdown file to inspect.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover flexdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show the in-content outline instead of the side navigation.
    #[arg(long)]
    content: bool,

    /// Print the outline as nested JSON.
    #[arg(long)]
    json: bool,
}

impl OutlineArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let source = fs::read_to_string(&self.file)?;
        let article = Article::from_source(&self.file, &source, config.toc)?;

        let outline = if self.content {
            build_outline(&article.headings, config.toc.content_max_depth)
        } else {
            article.side_outline.clone()
        };
        let nodes = outline.nested();

        if self.json {
            output.result(&serde_json::to_string_pretty(&nodes)?);
            return Ok(());
        }

        output.highlight(&article.title);
        if outline.is_empty() {
            output.warning("No headings within the outline depth");
            return Ok(());
        }
        for line in render_tree(&nodes) {
            output.result(&line);
        }
        Ok(())
    }
}

/// Render outline nodes as indented `#id  text` lines.
fn render_tree(nodes: &[OutlineNode]) -> Vec<String> {
    let mut lines = Vec::new();
    render_level(nodes, 0, &mut lines);
    lines
}

fn render_level(nodes: &[OutlineNode], level: usize, lines: &mut Vec<String>) {
    for node in nodes {
        lines.push(format!(
            "{}#{}  {}",
            "  ".repeat(level),
            node.heading.id,
            node.heading.text
        ));
        render_level(&node.children, level + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use flexdocs_toc::{Heading, assign_ids};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_tree() {
        let headings = assign_ids(&[
            Heading::new("Guide", 1),
            Heading::new("Setup", 2),
            Heading::new("Install", 3),
            Heading::new("Setup", 2),
        ]);
        let nodes = build_outline(&headings, 4).nested();

        assert_eq!(
            render_tree(&nodes),
            [
                "#guide  Guide",
                "  #setup  Setup",
                "    #install  Install",
                "  #setup-1  Setup",
            ]
        );
    }

    #[test]
    fn test_render_empty_tree() {
        assert!(render_tree(&[]).is_empty());
    }
}
