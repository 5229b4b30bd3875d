// Prospection Guard CLI
// Detects LinkedIn prospection messages and manages the suggested replies.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use prospection_guard::actions::{ActionOutcome, Actions};
use prospection_guard::beeper::BeeperClient;
use prospection_guard::logging::init_logging;
use prospection_guard::scanner::{ScanReport, Scanner};
use prospection_guard::source::McporterSource;
use prospection_guard::state::StateStore;
use prospection_guard::templates::ResponseTemplates;
use prospection_guard::{AppConfig, ClassificationResult, ContextHint, ProspectionClassifier};

#[derive(Parser)]
#[command(name = "prospection-guard", version)]
#[command(about = "Detect LinkedIn prospection messages and answer them politely")]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a single text
    Test {
        #[arg(long)]
        text: String,
        /// unknown, reply or cold
        #[arg(long, default_value = "unknown")]
        context: ContextHint,
        /// Force the language (fr, en)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Scan LinkedIn rooms for new prospection messages
    Scan {
        /// Don't update the state file
        #[arg(long)]
        dry_run: bool,
    },
    /// Drop a pending detection without replying
    Ignore {
        #[arg(long)]
        chat_id: String,
    },
    /// Send the suggested reply and archive the chat
    Send {
        #[arg(long)]
        chat_id: String,
        /// Show what would be sent without contacting Beeper
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the suggested reply and ask for a replacement
    Modify {
        #[arg(long)]
        chat_id: String,
    },
    /// Send a custom reply and archive the chat
    SendCustom {
        #[arg(long)]
        chat_id: String,
        #[arg(long)]
        message: String,
        /// Show what would be sent without contacting Beeper
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Serialize)]
struct TestOutput<'a> {
    #[serde(flatten)]
    result: &'a ClassificationResult,
    suggested_response: Option<String>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_scan(report: &ScanReport) {
    if report.detected == 0 {
        println!("No new prospection message ({} checked)", report.messages_checked);
        return;
    }
    println!("LinkedIn: {} prospection message(s) detected", report.detected);
    for pending in &report.messages {
        let preview: String = pending.text_preview.chars().take(100).collect();
        println!("  - From: {} ({})", pending.sender, pending.chat_id);
        println!("    Preview: {}...", preview);
        println!("    Suggested: {}", pending.suggested_response);
    }
}

fn print_outcome(outcome: &ActionOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }
    let text = outcome.sent.as_deref().unwrap_or_default();
    if outcome.dry_run {
        println!("[DRY RUN] Would send to {}:", outcome.chat_id);
        println!("{}", text);
        println!("[DRY RUN] Would then archive the chat");
    } else {
        println!("Sent to {} (archived: {})", outcome.chat_id, outcome.archived);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_logging(cli.verbose, Some(&config.log_file))?;
    debug!("Configuration loaded, state file {:?}", config.state_file);

    let classifier = ProspectionClassifier::new(config.engine.clone());
    let templates = ResponseTemplates::from_overrides(&config.response_templates);
    let store = StateStore::new(&config.state_file);

    match cli.command {
        Command::Test { text, context, lang } => {
            let result = classifier.classify(&text, context, lang.as_deref());
            let suggested_response = templates.select(&result, "");
            if cli.json {
                print_json(&TestOutput {
                    result: &result,
                    suggested_response,
                })?;
            } else if result.is_spam {
                println!("Prospection detected ({})", result.summary());
                for reason in &result.contributing_reasons {
                    println!("  - {}", reason);
                }
                if let Some(reply) = suggested_response {
                    println!("Suggested response: {}", reply);
                }
            } else {
                println!("Not detected as prospection ({})", result.summary());
            }
        }
        Command::Scan { dry_run } => {
            let source = McporterSource::new(&config.mcporter_cmd, &config.beeper_server)?;
            let scanner = Scanner::new(&source, &classifier, &templates, &config.room_pattern);
            let report = scanner.run(&store, dry_run).await?;
            if cli.json {
                print_json(&report)?;
            } else {
                print_scan(&report);
            }
        }
        Command::Ignore { chat_id } => {
            let outcome = Actions::new(&store).ignore(&chat_id)?;
            if cli.json {
                print_json(&outcome)?;
            } else {
                println!("Ignored {} ({} pending removed)", outcome.chat_id, outcome.removed);
            }
        }
        Command::Send { chat_id, dry_run } => {
            let actions = Actions::new(&store);
            let outcome = if dry_run {
                actions.preview_send(&chat_id)?
            } else {
                let sink = BeeperClient::new(config.beeper_mcp_url.clone(), config.beeper_token.clone())?;
                actions.send(&sink, &chat_id).await?
            };
            print_outcome(&outcome, cli.json)?;
        }
        Command::Modify { chat_id } => {
            let prompt = Actions::new(&store).modify(&chat_id)?;
            if cli.json {
                print_json(&prompt)?;
            } else {
                println!("Current response: {}", prompt.current_response);
                println!("{}", prompt.prompt);
            }
        }
        Command::SendCustom {
            chat_id,
            message,
            dry_run,
        } => {
            let actions = Actions::new(&store);
            let outcome = if dry_run {
                actions.preview_send_custom(&chat_id, &message)?
            } else {
                let sink = BeeperClient::new(config.beeper_mcp_url.clone(), config.beeper_token.clone())?;
                actions.send_custom(&sink, &chat_id, &message).await?
            };
            print_outcome(&outcome, cli.json)?;
        }
    }

    Ok(())
}
