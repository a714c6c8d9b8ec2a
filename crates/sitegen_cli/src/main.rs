//! Terminal front-end for the website section generator.
//!
//! # Responsibility
//! - One-shot commands over the HTTP API (`generate`, `list`, `get`).
//! - `type`: feed stdin lines to a generator session as successive input
//!   values, printing what the form would show.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use log::debug;
use sitegen_client::config::DEFAULT_BASE_URL;
use sitegen_client::{
    ClientConfig, GeneratorSession, HttpProjectsApi, LookupOutcome, ProjectsApi, ViewState,
};
use sitegen_core::{init_logging, Project};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Parser)]
#[command(name = "sitegen", version, about = "Generate website sections from an idea")]
struct Cli {
    /// API base URL.
    #[arg(long, env = "SITEGEN_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Log level written to stderr.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit an idea and print the generated sections.
    Generate {
        #[arg(required = true, num_args = 1..)]
        idea: Vec<String>,
    },
    /// List stored projects, newest first.
    List,
    /// Show one stored project.
    Get { id: String },
    /// Read ideas line by line from stdin as if typed into the form.
    /// An empty line submits the current input.
    Type,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, None)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let config = ClientConfig::with_base_url(cli.base_url);
    let api = HttpProjectsApi::new(config.base_url.clone());

    match cli.command {
        Command::Generate { idea } => generate(api, config, idea.join(" ")).await,
        Command::List => {
            for project in api.list_projects().await? {
                print_project(&project);
            }
            Ok(())
        }
        Command::Get { id } => {
            print_project(&api.get_project(&id).await?);
            Ok(())
        }
        Command::Type => type_ideas(api, config).await,
    }
}

async fn generate(api: HttpProjectsApi, config: ClientConfig, idea: String) -> anyhow::Result<()> {
    let session = GeneratorSession::new(api, config);
    session.on_input(idea);
    let outcome = session.submit().await;
    let view = session.view();
    debug!("event=cli_generate module=cli status=done outcome={outcome:?}");

    match outcome {
        LookupOutcome::Generated | LookupOutcome::CacheHit => {
            print_sections(&view.sections);
            Ok(())
        }
        _ => Err(anyhow!(view
            .error
            .unwrap_or_else(|| "Something went wrong".to_string()))),
    }
}

async fn type_ideas(api: HttpProjectsApi, config: ClientConfig) -> anyhow::Result<()> {
    let session = GeneratorSession::new(api, config);
    let done = CancellationToken::new();
    let printer = tokio::spawn(print_views(session.subscribe(), done.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            session.submit().await;
        } else {
            session.on_input(line);
        }
    }

    session.settle().await;
    done.cancel();
    printer.await.context("view printer failed")?;
    Ok(())
}

/// Renders each distinct view until `done`, then flushes the final one.
async fn print_views(mut rx: watch::Receiver<ViewState>, done: CancellationToken) {
    let mut last_shown: Option<(Vec<String>, Option<String>, bool)> = None;
    let mut show = |view: ViewState| {
        let shown = (view.sections.clone(), view.error.clone(), view.is_generating);
        if last_shown.as_ref() != Some(&shown) {
            render(&view);
            last_shown = Some(shown);
        }
    };

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                show(rx.borrow_and_update().clone());
            }
            _ = done.cancelled() => {
                if rx.has_changed().unwrap_or(false) {
                    show(rx.borrow_and_update().clone());
                }
                break;
            }
        }
    }
}

fn render(view: &ViewState) {
    if view.is_generating {
        println!("generating...");
    }
    if let Some(error) = &view.error {
        println!("error: {error}");
    }
    print_sections(&view.sections);
}

fn print_sections(sections: &[String]) {
    for section in sections {
        println!("  - {section}");
    }
}

fn print_project(project: &Project) {
    println!(
        "{}  {}  {}",
        project.id,
        project.created_at.to_rfc3339(),
        project.website_idea
    );
    print_sections(&project.sections);
}
