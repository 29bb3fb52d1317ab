pub mod config;
pub mod error;
pub mod filter;
pub mod links;
pub mod markdown;
pub mod open_uri;
pub mod plan;
pub mod search;
pub mod simplex_uri;
pub mod types;

pub use config::SearchConfig;
pub use error::{LinkError, PlanError};
pub use filter::{ChatFilter, filter_chats};
pub use links::{
    DefaultLinkFormatter, LinkFormatter, detect_single_link, find_single_link, is_simplex_link,
    link_display_text,
};
pub use markdown::{Format, FormattedText, MarkdownParser, SimplexMarkdown};
pub use open_uri::{OpenUriHandler, OpenUriOutcome};
pub use plan::{ConnectionPlan, ConnectionPlanner, LinkResolution, StaticPlanner};
pub use search::{ChatListSearch, SearchUpdate};
pub use simplex_uri::{SimplexLinkType, SimplexUri};
