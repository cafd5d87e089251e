use clap::{Parser, ValueEnum};

#[derive(Parser)]
pub struct Cli {
    /// Query to parse. Read from stdin when omitted.
    pub query: Vec<String>,
    #[clap(long, value_enum, default_value = "sexp")]
    pub format: Format,
    /// Print the values of this field instead of the query.
    #[clap(long)]
    pub field: Option<String>,
    /// Log filter, e.g. `debug` or `search_query=trace`.
    #[clap(long, default_value = "warn")]
    pub log: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `(and "repo:foo" (or "a" "b"))`
    Sexp,
    /// `repo:foo and (a or b)`
    Query,
    Json,
}
