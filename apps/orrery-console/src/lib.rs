use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use orrery_providers::SearchClient;
use orrery_service::{
	HistoryStore, SuggestCoordinator, SuggestEvent, SuggestInput, SuggestMode, SuggestionUpdate,
	full_search,
};
use orrery_store::file::FileStore;

#[derive(Debug, Parser)]
#[command(
	version = orrery_cli::VERSION,
	rename_all = "kebab",
	styles = orrery_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

#[derive(Debug, PartialEq)]
enum Command {
	Type(String),
	More,
	Pick(String),
	Search(String),
	Forget(String),
	Add(String),
	Help,
	Quit,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = orrery_config::load(&args.config)?;

	init_tracing(&config)?;

	let client = SearchClient::new(&config.service)?;
	let store = Arc::new(FileStore::new(&config.history.storage_path));
	let history = HistoryStore::load(store, &config.history);
	let coordinator =
		SuggestCoordinator::new(&config, SuggestMode::Token, Arc::new(client.clone()), history);
	let (inputs, mut events, _coordinator_task) = coordinator.spawn();

	tracing::info!(base_url = %config.service.base_url, "Console connected.");
	print_help();

	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	loop {
		tokio::select! {
			maybe_line = lines.next_line() => {
				let Some(line) = maybe_line? else {
					break;
				};

				match parse_command(&line) {
					Command::Type(text) => {
						inputs.send(SuggestInput::Keystroke(text)).await?;
					},
					Command::More => {
						inputs.send(SuggestInput::ShowMore).await?;
					},
					Command::Pick(text) => {
						inputs.send(SuggestInput::Select(text)).await?;
					},
					Command::Search(text) => {
						inputs.send(SuggestInput::Submit(text)).await?;
					},
					Command::Forget(text) => {
						inputs.send(SuggestInput::Forget(text)).await?;
					},
					Command::Add(raw) => add_document(&client, &config, &raw).await,
					Command::Help => print_help(),
					Command::Quit => break,
				}
			},
			maybe_event = events.recv() => {
				let Some(event) = maybe_event else {
					break;
				};

				match event {
					SuggestEvent::Suggestions(update) => print_update(&update),
					SuggestEvent::Submitted { query } => {
						run_search(&client, &config, &query).await;
					},
				}
			},
		}
	}

	Ok(())
}

fn init_tracing(config: &orrery_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	Ok(())
}

fn parse_command(line: &str) -> Command {
	let trimmed = line.trim_end();
	let Some(rest) = trimmed.strip_prefix(':') else {
		return Command::Type(trimmed.to_string());
	};
	let (name, arg) = match rest.split_once(' ') {
		Some((name, arg)) => (name, arg.trim()),
		None => (rest, ""),
	};

	match name {
		"q" | "quit" => Command::Quit,
		"more" => Command::More,
		"pick" => Command::Pick(arg.to_string()),
		"search" => Command::Search(arg.to_string()),
		"forget" => Command::Forget(arg.to_string()),
		"add" => Command::Add(arg.to_string()),
		_ => Command::Help,
	}
}

fn print_help() {
	println!("Type to see suggestions as you would in the search box.");
	println!("  :search <query>   run a full search");
	println!("  :pick <text>      select a suggestion");
	println!("  :more             reveal more suggestions");
	println!("  :forget <term>    drop a term from the recent searches");
	println!("  :add <json>       submit a document to the index");
	println!("  :quit             leave");
}

fn print_update(update: &SuggestionUpdate) {
	if update.query.is_empty() {
		if update.history.is_empty() {
			println!("(no recent searches)");
		} else {
			println!("Recent searches:");

			for term in &update.history {
				println!("  {term}");
			}
		}

		return;
	}

	if update.suggestions.is_empty() {
		println!("(no suggestions for \"{}\")", update.query);
	} else {
		println!("Suggestions for \"{}\":", update.query);

		for suggestion in update.suggestions.iter().take(update.visible) {
			println!("  {suggestion}");
		}

		let hidden = update.suggestions.len().saturating_sub(update.visible);

		if hidden > 0 {
			println!("  ({hidden} more, :more to reveal)");
		}
	}

	if !update.history.is_empty() {
		println!("From your history:");

		for term in &update.history {
			println!("  {term}");
		}
	}
}

async fn run_search(client: &SearchClient, config: &orrery_config::Config, query: &str) {
	match full_search(client, &config.search, query).await {
		Ok(records) => {
			println!("Found {} result(s) for \"{query}\".", records.len());

			for (index, record) in records.iter().enumerate() {
				let label = match record.label() {
					Some(label) => label.to_string(),
					None => format!("Result {}", index + 1),
				};

				match record.text_field("abstract").or_else(|| record.text_field("snippet")) {
					Some(snippet) => {
						println!("{:>3}. {label}: {}", index + 1, truncate(snippet, 100));
					},
					None => println!("{:>3}. {label}", index + 1),
				}
			}
		},
		Err(err) => {
			tracing::error!(error = %err, "Full search failed.");
			println!("{err}");
		},
	}
}

async fn add_document(client: &SearchClient, config: &orrery_config::Config, raw: &str) {
	let document: serde_json::Value = match serde_json::from_str(raw) {
		Ok(document) => document,
		Err(err) => {
			println!("Not a JSON document: {err}.");

			return;
		},
	};

	match client.add_document(&document, Duration::from_millis(config.search.timeout_ms)).await {
		Ok(()) => println!("Document submitted."),
		Err(err) => {
			tracing::error!(error = %err, "Document submission failed.");
			println!("Document submission failed: {err}");
		},
	}
}

fn truncate(text: &str, max_chars: usize) -> String {
	let mut out: String = text.chars().take(max_chars).collect();

	if text.chars().count() > max_chars {
		out.push_str("...");
	}

	out
}
