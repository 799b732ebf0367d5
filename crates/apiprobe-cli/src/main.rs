//! apiprobe CLI entry point

use apiprobe_cli::{
    cli::{Cli, Commands},
    commands::{load_endpoints, EndpointCommand, ListCommand, RequestArgs, RequestCommand, RunCommand},
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use apiprobe_core::Settings;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }

    init_tracing(&settings.log_level)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!(
        environment = %settings.environment,
        base_url = %settings.base_url,
        "apiprobe v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Commands::Run {
            filter,
            workers,
            report,
        } => {
            let endpoints = load_endpoints(&settings)?;
            RunCommand::run(settings, endpoints, filter, workers, report).await
        }

        Commands::List => ListCommand::run(),

        Commands::Request {
            method,
            endpoint,
            query,
            headers,
            data,
            timeout,
            insecure,
            expect_status,
            max_time,
            require_keys,
            expect_types,
            schema,
            expect_headers,
            show_body,
        } => {
            let args = RequestArgs {
                method,
                endpoint,
                query,
                headers,
                data,
                timeout,
                insecure,
                expect_status,
                max_time,
                require_keys,
                expect_types,
                schema,
                expect_headers,
                show_body,
            };
            RequestCommand::run(&settings, args).await
        }

        Commands::Endpoint {
            category,
            action,
            params,
            full,
        } => {
            let endpoints = load_endpoints(&settings)?;
            EndpointCommand::run(&settings, &endpoints, &category, &action, &params, full)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_run_command_parsing() {
        let cli = Cli::try_parse_from([
            "apiprobe",
            "run",
            "--filter",
            "users::",
            "--workers",
            "8",
            "--report",
            "out/report.json",
            "--no-color",
        ])
        .unwrap();

        assert!(cli.no_color);
        if let Commands::Run {
            filter,
            workers,
            report,
        } = cli.command
        {
            assert_eq!(filter.as_deref(), Some("users::"));
            assert_eq!(workers, Some(8));
            assert_eq!(report, Some(PathBuf::from("out/report.json")));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_request_command_parsing() {
        let cli = Cli::try_parse_from([
            "apiprobe",
            "request",
            "get",
            "/users/1",
            "-q",
            "expand=posts",
            "-H",
            "X-Trace: 1",
            "--expect-status",
            "200",
            "--require-key",
            "id",
            "--require-key",
            "email",
            "--expect-type",
            "id=integer",
        ])
        .unwrap();

        if let Commands::Request {
            method,
            endpoint,
            query,
            headers,
            expect_status,
            require_keys,
            expect_types,
            ..
        } = cli.command
        {
            assert_eq!(method, "get");
            assert_eq!(endpoint, "/users/1");
            assert_eq!(query, vec!["expand=posts"]);
            assert_eq!(headers, vec!["X-Trace: 1"]);
            assert_eq!(expect_status, Some(200));
            assert_eq!(require_keys, vec!["id", "email"]);
            assert_eq!(expect_types, vec!["id=integer"]);
        } else {
            panic!("Expected Request command");
        }
    }

    #[test]
    fn test_endpoint_command_parsing() {
        let cli = Cli::try_parse_from([
            "apiprobe", "endpoint", "posts", "comments", "-p", "id=1", "--full",
        ])
        .unwrap();

        if let Commands::Endpoint {
            category,
            action,
            params,
            full,
        } = cli.command
        {
            assert_eq!((category.as_str(), action.as_str()), ("posts", "comments"));
            assert_eq!(params, vec!["id=1"]);
            assert!(full);
        } else {
            panic!("Expected Endpoint command");
        }
    }
}
