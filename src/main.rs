use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;
use simplex_chatlist::types::Chat;
use simplex_chatlist::{ChatListSearch, SearchConfig, SearchUpdate, StaticPlanner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// Runs one chat list search against a roster snapshot.
//
// Usage:
//   cargo run -- --roster chats.json                         # whole roster
//   cargo run -- --roster chats.json --search bob            # text search
//   cargo run -- --roster chats.json --unread-and-favorites  # pinned chats only
//   cargo run -- --roster chats.json --plans plans.json --search 'simplex:/contact#/?...'

#[derive(Parser, Debug)]
#[command(about = "Filter a chat roster the way the chat list search does")]
struct Args {
    /// JSON array of chats, in display order
    #[arg(short, long)]
    roster: PathBuf,

    /// JSON object mapping link URIs to connection plans
    #[arg(short, long)]
    plans: Option<PathBuf>,

    /// Raw search field contents
    #[arg(short, long, default_value = "")]
    search: String,

    /// With an empty search, show only favorite, unread and invited chats
    #[arg(short = 'u', long)]
    unread_and_favorites: bool,

    /// Give up on link resolution after this many milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();

    let roster: Vec<Chat> = read_json(&args.roster).await?;
    let planner: StaticPlanner = match &args.plans {
        Some(path) => read_json(path).await?,
        None => StaticPlanner::new(),
    };
    info!(
        "Loaded {} chats and {} link plans",
        roster.len(),
        planner.len()
    );

    let config = SearchConfig {
        show_unread_and_favorites: args.unread_and_favorites,
        resolve_timeout: Duration::from_millis(args.timeout_ms),
        ..Default::default()
    };
    let mut search = ChatListSearch::new(Arc::new(planner), config);

    match search.on_search_text_changed(&args.search) {
        SearchUpdate::LinkDetected { display_text, .. } => {
            info!("Search field shows: {display_text}");
            search.settle().await;
        }
        SearchUpdate::Search { text } => info!("Searching for \"{text}\""),
        SearchUpdate::Cleared | SearchUpdate::Unchanged => {}
    }

    let chats = search.filtered_chats(&roster);
    if chats.is_empty() && !roster.is_empty() {
        println!("No filtered chats");
    }
    for chat in &chats {
        println!("{:<8} {}", chat.id(), chat.chat_info.chat_view_name());
    }

    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
