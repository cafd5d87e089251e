mod cli;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Format};
use search_query::{Node, ParseError, nodes_to_string, parse, to_query_string, visit_field};
use std::io::{Read, Write};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(cli.log.as_str())
        .with_writer(std::io::stderr)
        .init();

    let query = if cli.query.is_empty() {
        let mut query = String::new();
        std::io::stdin()
            .read_to_string(&mut query)
            .context("Failed to read query from stdin")?;
        query
    } else {
        cli.query.join(" ")
    };
    debug!(%query, "parsing");

    let nodes = parse(&query).map_err(|error| describe(&query, error))?;
    let mut stdout = std::io::stdout().lock();
    match &cli.field {
        Some(field) => print_field(&mut stdout, &nodes, field)?,
        None => print_nodes(&mut stdout, &nodes, cli.format)?,
    }
    Ok(())
}

fn print_nodes(out: &mut impl Write, nodes: &[Node], format: Format) -> Result<()> {
    match format {
        Format::Sexp => writeln!(out, "{}", nodes_to_string(nodes))?,
        Format::Query => writeln!(out, "{}", to_query_string(nodes))?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, nodes).context("Failed to encode nodes")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_field(out: &mut impl Write, nodes: &[Node], field: &str) -> Result<()> {
    let canonical = search_query::canonical_field(field)
        .ok_or_else(|| anyhow!("unrecognized field {field:?}"))?;
    let mut values = Vec::new();
    visit_field(nodes, canonical, |value, negated| {
        values.push(if negated {
            format!("-{value}")
        } else {
            value.to_string()
        })
    });
    for value in values {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

// Points at the line and column of positional errors.
fn describe(query: &str, error: ParseError) -> anyhow::Error {
    let location = error
        .position()
        .and_then(|offset| filepos::File::new(query.as_bytes()).resolve(offset).ok());
    match location {
        Some((line, character)) => {
            anyhow::Error::new(error).context(format!("{}:{}: invalid query", line + 1, character + 1))
        }
        None => anyhow::Error::new(error).context("invalid query"),
    }
}
