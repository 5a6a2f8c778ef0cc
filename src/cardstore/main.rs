use cardstore::api::Database;
use cardstore::config::CardsConfig;
use cardstore::error::{CardError, Result};
use cardstore::instance::Connector;
use cardstore::model::{Card, CardPatch, NewCard, Status};
use cardstore::store::fs::FileStore;
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod args;
use args::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        if matches!(e, CardError::NotReady) {
            eprintln!("No instance configured; run `cards init` first.");
        }
        std::process::exit(1);
    }
}

struct AppContext {
    connector: Connector<FileStore>,
    config: CardsConfig,
    data_dir: PathBuf,
    json: bool,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Init => handle_init(&mut ctx).await,
        Commands::Instance => handle_instance(&ctx),
        Commands::Add {
            name,
            description,
            status,
        } => {
            let input = NewCard {
                name,
                description,
                status,
            };
            handle_add(&ctx, input).await
        }
        Commands::Get { id } => handle_get(&ctx, &id).await,
        Commands::Update {
            id,
            name,
            description,
            status,
        } => {
            let patch = CardPatch {
                name,
                description,
                status,
            };
            handle_update(&ctx, &id, patch).await
        }
        Commands::Delete { id } => handle_delete(&ctx, &id).await,
        Commands::List { status } => handle_list(&ctx, &status).await,
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    let config = CardsConfig::load(&data_dir)?;
    let store = FileStore::new(&data_dir);
    let connector = Connector::new(Arc::new(store)).with_latency(config.latency());

    Ok(AppContext {
        connector,
        config,
        data_dir,
        json: cli.json,
    })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "cardstore", "cards")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CardError::Store("Could not determine data directory".to_string()))
}

/// Reconnects to the instance recorded in the config.
async fn open(ctx: &AppContext) -> Result<Database<FileStore>> {
    let instance_id = ctx.config.instance_id.as_deref().ok_or(CardError::NotReady)?;
    ctx.connector.connect(Some(instance_id)).await
}

async fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let mut db = ctx.connector.connect(None).await?;
    let instance_id = db.instance_id().map(str::to_string);
    db.disconnect()?;

    ctx.config.instance_id = instance_id.clone();
    ctx.config.save(&ctx.data_dir)?;

    let instance_id = instance_id.unwrap_or_default();
    if ctx.json {
        print_json(&serde_json::json!({ "instanceId": instance_id }))?;
    } else {
        println!("{}", format!("Initialized instance {}", instance_id).green());
        println!(
            "{}",
            format!("Store at {} was cleared.", display_path(&ctx.data_dir)).dimmed()
        );
    }
    Ok(())
}

fn handle_instance(ctx: &AppContext) -> Result<()> {
    let instance_id = ctx.config.instance_id.as_deref().ok_or(CardError::NotReady)?;
    if ctx.json {
        print_json(&serde_json::json!({ "instanceId": instance_id }))
    } else {
        println!("{}", instance_id);
        Ok(())
    }
}

async fn handle_add(ctx: &AppContext, input: NewCard) -> Result<()> {
    let mut db = open(ctx).await?;
    let id = db.add_card(input).await?;
    db.disconnect()?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))
    } else {
        println!("{}", id);
        Ok(())
    }
}

async fn handle_get(ctx: &AppContext, id: &str) -> Result<()> {
    let mut db = open(ctx).await?;
    let card = db.get_card_by_id(id).await?;
    db.disconnect()?;

    if ctx.json {
        print_json(&card)
    } else {
        print_full_card(&card);
        Ok(())
    }
}

async fn handle_update(ctx: &AppContext, id: &str, patch: CardPatch) -> Result<()> {
    let mut db = open(ctx).await?;
    let unchanged = patch.is_empty();
    if !unchanged {
        db.update_card_by_id(id, patch).await?;
    }
    let card = db.get_card_by_id(id).await?;
    db.disconnect()?;

    if ctx.json {
        print_json(&card)
    } else if unchanged {
        println!("{}", format!("Nothing to update: {}", card.name).yellow());
        Ok(())
    } else {
        println!("{}", format!("Card updated: {}", card.name).green());
        Ok(())
    }
}

async fn handle_delete(ctx: &AppContext, id: &str) -> Result<()> {
    let mut db = open(ctx).await?;
    db.delete_card_by_id(id).await?;
    db.disconnect()?;

    if ctx.json {
        print_json(&serde_json::json!({ "deleted": id }))
    } else {
        println!("{}", format!("Card deleted: {}", id).green());
        Ok(())
    }
}

async fn handle_list(ctx: &AppContext, statuses: &[String]) -> Result<()> {
    let mut db = open(ctx).await?;
    let mut cards = if statuses.is_empty() {
        db.get_cards().await?
    } else {
        db.get_cards_by_status_codes(statuses).await?
    };
    db.disconnect()?;

    // The store returns cards unordered; show oldest first.
    cards.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));

    if ctx.json {
        print_json(&cards)
    } else {
        print_cards(&cards);
        Ok(())
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const STATUS_WIDTH: usize = 13;
const ID_WIDTH: usize = 10;

fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("No cards found.");
        return;
    }

    for card in cards {
        let id_str: String = card.id.chars().take(ID_WIDTH - 2).collect();
        let id_str = format!("{:<width$}", id_str, width = ID_WIDTH);

        let status_str = card.status.map(|s| s.code()).unwrap_or("-");
        let status_str = format!("{:<width$}", status_str, width = STATUS_WIDTH);

        let fixed_width = ID_WIDTH + STATUS_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name_display = truncate_to_width(&card.name, available);
        let padding = available.saturating_sub(name_display.width());

        println!(
            "{}{}{}{}{}",
            id_str.dimmed(),
            color_status(card.status, &status_str),
            name_display,
            " ".repeat(padding),
            format_time_ago(card.last_updated).dimmed()
        );
    }
}

fn print_full_card(card: &Card) {
    println!("{}", card.name.bold());
    println!("--------------------------------");
    println!("id:           {}", card.id);
    let status = card.status.map(|s| s.code()).unwrap_or("-");
    println!(
        "status:       {}",
        color_status(card.status, status)
    );
    if let Some(description) = &card.description {
        println!("description:  {}", description);
    }
    println!("created:      {}", format_timestamp(card.created));
    println!("last updated: {}", format_timestamp(card.last_updated));
}

fn color_status(status: Option<Status>, text: &str) -> ColoredString {
    match status {
        Some(Status::Todo) => text.yellow(),
        Some(Status::InProgress) => text.cyan(),
        Some(Status::Done) => text.green(),
        None => text.dimmed(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn format_time_ago(millis: i64) -> String {
    let elapsed = Utc::now().timestamp_millis().saturating_sub(millis).max(0);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(std::time::Duration::from_millis(elapsed as u64));
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
