use anyhow::{Context, Result};
use clap::Parser;
use querygen::config::DEFAULT_MAX_DEPTH;
use querygen::{ConvertOptions, QueryParser, Schema};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "querygen")]
#[command(about = "Convert a JSON query description into a Lucene-style query string", long_about = None)]
struct Args {
    /// JSON file holding the query node (reads stdin when omitted)
    #[arg(long, short)]
    query: Option<PathBuf>,

    /// Schema as inline JSON, or @FILE to read it from a file
    #[arg(long, short, env = "QUERYGEN_SCHEMA")]
    schema: Option<String>,

    /// Maximum nesting of query nodes
    #[arg(long, env = "QUERYGEN_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the query
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    debug!("querygen v{}", querygen::VERSION);

    let input = match &args.query {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read query from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read query from stdin")?;
            buf
        }
    };

    let schema = match &args.schema {
        Some(spec) => load_schema(spec)?,
        None => Schema::new(),
    };
    info!("Schema has {} typed fields", schema.len());

    let options = ConvertOptions::new(schema).with_max_depth(args.max_depth);
    let node = QueryParser::parse_str(&input).context("failed to parse query")?;
    let query = querygen::convert(&node, &options).context("failed to convert query")?;

    println!("{}", query);
    Ok(())
}

fn load_schema(spec: &str) -> Result<Schema> {
    let json = match spec.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema from {}", path))?,
        None => spec.to_string(),
    };
    json.parse::<Schema>().context("invalid schema")
}
