//! `hackerlearn-admin`: operator CLI for the learning-platform backends.
//!
//! Prints each result envelope as JSON on stdout and exits non-zero when the
//! call failed. Logs go to stderr (`RUST_LOG`, default `info`).

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use hackerlearn_observability::LogFormat;

mod commands;

#[derive(Parser)]
#[command(name = "hackerlearn-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Human-readable log lines instead of JSON
    #[arg(long, global = true)]
    pretty_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one raw gateway call
    Call {
        /// Logical method, e.g. GET, POSTPUBLIC, delete-public
        method: String,

        /// Backend endpoint path, e.g. /course/all?page=1
        endpoint: String,

        /// JSON object sent as the request body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Manage the stored access token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// List majors
    Majors,

    /// List one page of courses
    Courses {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// List the chapters of a course
    Chapters { course: String },

    /// List the lessons of a chapter
    Lessons { chapter: String },

    /// List the flashcards of a lesson
    Flashcards { lesson: String },

    /// Fetch and parse a service's metrics through the API-check proxy
    Metrics {
        /// Metrics URL of the target service
        api: String,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Store a token
    Set { token: String },
    /// Remove the stored token
    Clear,
    /// Show whether a token is stored
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    hackerlearn_observability::tracing::init(if cli.pretty_logs {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    });

    let outcome = commands::run(cli.command).await;
    if let Err(e) = &outcome {
        tracing::error!(error = %format!("{e:#}"), "command failed");
        eprintln!("error: {e:#}");
    }
    ExitCode::from(commands::exit_status(&outcome))
}
