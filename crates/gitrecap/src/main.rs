//! gitrecap: daily commit reports with AI-written summaries
//!
//! This binary lists the commits of a repository inside a date window,
//! asks a chat-completion service to explain each one and writes one
//! Markdown report per day.

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use gitrecap::config::{Command, Config};
use gitrecap::pipeline::{ProgressEvent, ReportGenerator, ReportOptions};
use gitrecap::prompt;
use gitrecap::summarize::{CommitSummarizer, SummaryResult};
use gitrecap_git::GitRepo;
use gitrecap_llm::ChatClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries progress lines only
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level().into()))
        .init();

    config.validate()?;

    match config.command {
        Some(Command::Show { ref hash }) => show(&config, hash).await,
        Some(Command::Report) | None => report(&config).await,
    }
}

/// Generate the per-day reports
async fn report(config: &Config) -> Result<()> {
    let input = prompt::collect(config, &mut io::stdin().lock(), &mut io::stdout())?;

    let repo = GitRepo::open(&input.repo)?;
    let client = ChatClient::new(config.llm_settings());
    info!(model = %client.model(), repo = %input.repo.display(), "Starting report run");

    let options = ReportOptions::new(config.output_dir_for(&input.repo))
        .with_max_diff_bytes(config.max_diff_bytes);
    let generator =
        ReportGenerator::new(repo, client, options).with_progress(Box::new(print_progress));

    let summary = generator.run(input.start, input.end, input.author).await?;
    if !summary.is_empty() {
        println!(
            "Done: {} report(s) written, {} of {} commit(s) summarized",
            summary.reports.len(),
            summary.summarized,
            summary.commits
        );
    }
    Ok(())
}

/// Summarize one commit and print the result
async fn show(config: &Config, hash: &str) -> Result<()> {
    let repo_path = match config.repo {
        Some(ref repo) => repo.clone(),
        None => prompt::ask_repo(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let repo = GitRepo::open(&repo_path)?;
    let client = ChatClient::new(config.llm_settings());
    let summarizer =
        CommitSummarizer::new(&repo, &client).with_max_diff_bytes(config.max_diff_bytes);

    match summarizer.summarize(hash).await {
        SummaryResult::Summarized(text) => {
            println!("{text}");
            Ok(())
        }
        SummaryResult::Failed(message) => bail!("Could not summarize {hash}: {message}"),
    }
}

fn print_progress(event: &ProgressEvent) {
    if event.is_failure() {
        eprintln!("{event}");
    } else {
        println!("{event}");
    }
}
