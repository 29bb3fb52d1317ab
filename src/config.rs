use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::markdown::MAX_MARKDOWN_BYTES;

const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// With an empty search, show only favorite, unread and invited chats.
    pub show_unread_and_favorites: bool,
    pub max_markdown_bytes: usize,
    #[serde(rename = "resolveTimeoutMs", with = "duration_ms")]
    pub resolve_timeout: Duration,
    /// Remote host the planner should connect through, if any.
    pub host_id: Option<i64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            show_unread_and_favorites: false,
            max_markdown_bytes: MAX_MARKDOWN_BYTES,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            host_id: None,
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().try_into().unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
