//! Search state of the chat list.
//!
//! Every change of the search text goes through [`ChatListSearch::on_search_text_changed`].
//! A pasted SimpleX link switches the search into link mode: the field shows a
//! short description of the link and the planner runs in the background. If
//! it finds a contact or group the user already has, the list narrows to it.
//!
//! The resolution slot has a single writer, the task of the current input.
//! Each input bumps a generation; results tagged with an older generation are
//! ignored and the older task is aborted.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SearchConfig;
use crate::error::PlanError;
use crate::filter::ChatFilter;
use crate::links::{DefaultLinkFormatter, LinkFormatter, detect_single_link, link_display_text};
use crate::markdown::{MarkdownParser, SimplexMarkdown};
use crate::plan::{ConnectionPlanner, LinkResolution};
use crate::types::{Chat, ChatId};

/// What an input change did to the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchUpdate {
    /// Same text as before, nothing happened.
    Unchanged,
    /// A single link was found; the field should now show `display_text`.
    LinkDetected { display_text: String, uri: String },
    Search { text: String },
    Cleared,
}

/// Contents of the resolution slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub generation: u64,
    pub chat_id: Option<ChatId>,
}

pub struct ChatListSearch {
    config: SearchConfig,
    parser: Box<dyn MarkdownParser>,
    formatter: Box<dyn LinkFormatter>,
    planner: Arc<dyn ConnectionPlanner>,
    search_text: String,
    showing_link: bool,
    generation: u64,
    resolved: Arc<watch::Sender<Resolution>>,
    in_flight: Option<JoinHandle<()>>,
}

impl ChatListSearch {
    pub fn new(planner: Arc<dyn ConnectionPlanner>, config: SearchConfig) -> Self {
        let (resolved, _) = watch::channel(Resolution::default());
        Self {
            parser: Box::new(SimplexMarkdown::new(config.max_markdown_bytes)),
            formatter: Box::new(DefaultLinkFormatter),
            planner,
            config,
            search_text: String::new(),
            showing_link: false,
            generation: 0,
            resolved: Arc::new(resolved),
            in_flight: None,
        }
    }

    pub fn with_parser(mut self, parser: impl MarkdownParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_formatter(mut self, formatter: impl LinkFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn showing_link(&self) -> bool {
        self.showing_link
    }

    pub fn show_unread_and_favorites(&self) -> bool {
        self.config.show_unread_and_favorites
    }

    pub fn set_show_unread_and_favorites(&mut self, show: bool) {
        self.config.show_unread_and_favorites = show;
    }

    pub fn toggle_unread_and_favorites(&mut self) -> bool {
        self.config.show_unread_and_favorites = !self.config.show_unread_and_favorites;
        self.config.show_unread_and_favorites
    }

    /// The chat the current link resolved to, if any.
    pub fn resolved_chat_id(&self) -> Option<ChatId> {
        let slot = self.resolved.borrow();
        if slot.generation == self.generation {
            slot.chat_id.clone()
        } else {
            None
        }
    }

    /// Notified whenever the slot changes; compare `generation` with
    /// [`ChatListSearch::generation`] before trusting a value.
    pub fn watch_resolution(&self) -> watch::Receiver<Resolution> {
        self.resolved.subscribe()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_resolving(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Handles a new raw value of the search field.
    ///
    /// Must be called from within a Tokio runtime for links to be resolved;
    /// without one the search stays in unresolved link mode.
    pub fn on_search_text_changed(&mut self, text: &str) -> SearchUpdate {
        let text = text.trim();
        if text == self.search_text {
            return SearchUpdate::Unchanged;
        }

        self.reset_resolution();

        match detect_single_link(self.parser.as_ref(), text) {
            Some(link) => {
                let display_text = link_display_text(&link, self.formatter.as_ref())
                    .unwrap_or_else(|| link.text.clone());
                debug!("search text is a single link, entering link mode");

                self.search_text = display_text.clone();
                self.showing_link = true;
                self.in_flight = self.spawn_resolution(link.text.clone());

                SearchUpdate::LinkDetected {
                    display_text,
                    uri: link.text,
                }
            }
            None => {
                self.showing_link = false;
                self.search_text = text.to_string();
                if text.is_empty() {
                    SearchUpdate::Cleared
                } else {
                    SearchUpdate::Search {
                        text: text.to_string(),
                    }
                }
            }
        }
    }

    /// Chats to display for the current search state.
    pub fn filtered_chats(&self, chats: &[Chat]) -> Vec<Chat> {
        let resolved = self.resolved_chat_id();
        ChatFilter {
            show_unread_and_favorites: self.config.show_unread_and_favorites,
            showing_link: self.showing_link,
            resolved_chat_id: resolved.as_deref(),
            search_text: &self.search_text,
        }
        .apply(chats)
    }

    /// Waits for the in-flight resolution, if any, to finish.
    pub async fn settle(&mut self) {
        let Some(handle) = self.in_flight.take() else {
            return;
        };
        if let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!("link resolution task failed: {e}");
        }
    }

    pub fn clear(&mut self) {
        self.reset_resolution();
        self.search_text.clear();
        self.showing_link = false;
    }

    fn reset_resolution(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation += 1;
        self.resolved.send_replace(Resolution {
            generation: self.generation,
            chat_id: None,
        });
    }

    fn spawn_resolution(&self, uri: String) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, pasted link will not be resolved");
            return None;
        };

        Some(runtime.spawn(resolve_link(
            self.planner.clone(),
            self.config.host_id,
            uri,
            self.config.resolve_timeout,
            self.generation,
            self.resolved.clone(),
        )))
    }
}

impl Drop for ChatListSearch {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

async fn resolve_link(
    planner: Arc<dyn ConnectionPlanner>,
    host_id: Option<i64>,
    uri: String,
    timeout: Duration,
    generation: u64,
    slot: Arc<watch::Sender<Resolution>>,
) {
    let outcome = match tokio::time::timeout(timeout, planner.plan_and_connect(host_id, &uri)).await
    {
        Ok(result) => result,
        Err(_) => Err(PlanError::Timeout(timeout)),
    };

    let resolution = match outcome {
        Ok(plan) => plan.resolution(),
        Err(e) => {
            warn!("link resolution failed: {e}");
            return;
        }
    };

    let chat_id = match &resolution {
        LinkResolution::Unknown => {
            debug!("pasted link does not lead to a known chat");
            return;
        }
        known => known.chat_id().map(str::to_string),
    };

    let applied = slot.send_if_modified(|current| {
        if current.generation != generation {
            return false;
        }
        current.chat_id = chat_id;
        true
    });

    if applied {
        info!("pasted link resolved: {resolution:?}");
    } else {
        debug!("dropping stale link resolution (generation {generation})");
    }
}
