//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "apiprobe",
    about = "apiprobe - REST API test runner",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the API base URL
    #[arg(long, env = "API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in REST test suite
    Run {
        /// Only run cases whose `category::name` contains this text
        #[arg(long, short)]
        filter: Option<String>,

        /// Concurrent workers (defaults to PARALLEL_WORKERS)
        #[arg(long, short)]
        workers: Option<usize>,

        /// Write a JSON report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List the built-in test cases
    List,

    /// Send one request and validate the response
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,

        /// Path relative to the base URL, or an absolute URL
        endpoint: String,

        /// Query parameter as key=value (repeatable)
        #[arg(long = "query", short = 'q')]
        query: Vec<String>,

        /// Header as 'Name: value' (repeatable)
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// JSON request body
        #[arg(long, short)]
        data: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<f64>,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,

        /// Expected status code
        #[arg(long)]
        expect_status: Option<u16>,

        /// Maximum response time in seconds
        #[arg(long)]
        max_time: Option<f64>,

        /// Top-level key the JSON body must contain (repeatable)
        #[arg(long = "require-key")]
        require_keys: Vec<String>,

        /// Field type as field=type, e.g. id=integer (repeatable)
        #[arg(long = "expect-type")]
        expect_types: Vec<String>,

        /// JSON Schema file the body must satisfy
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Expected response header as 'Name: value' (repeatable)
        #[arg(long = "expect-header")]
        expect_headers: Vec<String>,

        /// Print the response body
        #[arg(long)]
        show_body: bool,
    },

    /// Resolve an entry of the endpoint table
    Endpoint {
        /// Endpoint category, e.g. users
        category: String,

        /// Action within the category, e.g. get
        action: String,

        /// Placeholder value as name=value (repeatable)
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,

        /// Print the full URL instead of the path
        #[arg(long)]
        full: bool,
    },
}
