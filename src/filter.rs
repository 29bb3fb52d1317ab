//! Chat list filtering.
//!
//! Four mutually exclusive modes, first match wins:
//! 1. a pasted link resolved to a known chat: only that chat;
//! 2. a pasted link still resolving: no text search;
//! 3. no search and no unread/favorites toggle: the whole roster;
//! 4. otherwise per-variant matching of the lowercased search text.
//!
//! Filtering keeps roster order and never fails.

use crate::types::{Chat, ChatInfo};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChatFilter<'a> {
    pub show_unread_and_favorites: bool,
    pub showing_link: bool,
    pub resolved_chat_id: Option<&'a str>,
    pub search_text: &'a str,
}

impl ChatFilter<'_> {
    pub fn apply(&self, chats: &[Chat]) -> Vec<Chat> {
        if let Some(chat_id) = self.resolved_chat_id {
            return chats.iter().filter(|c| c.id() == chat_id).cloned().collect();
        }

        let s = if self.showing_link {
            String::new()
        } else {
            self.search_text.trim().to_lowercase()
        };

        if s.is_empty() && !self.show_unread_and_favorites {
            return chats.to_vec();
        }

        chats
            .iter()
            .filter(|chat| chat_matches(chat, &s))
            .cloned()
            .collect()
    }
}

/// Applies [`ChatFilter`] with the given parameters.
pub fn filter_chats(
    show_unread_and_favorites: bool,
    showing_link: bool,
    resolved_chat_id: Option<&str>,
    search_text: &str,
    chats: &[Chat],
) -> Vec<Chat> {
    ChatFilter {
        show_unread_and_favorites,
        showing_link,
        resolved_chat_id,
        search_text,
    }
    .apply(chats)
}

// `s` is already lowercased; empty means "pinned chats only".
fn chat_matches(chat: &Chat, s: &str) -> bool {
    match &chat.chat_info {
        ChatInfo::Direct { contact } => {
            if s.is_empty() {
                chat.is_pinned()
            } else {
                view_name_contains(&chat.chat_info, s)
                    || contact.profile.display_name.to_lowercase().contains(s)
                    || contact.profile.full_name.to_lowercase().contains(s)
            }
        }
        ChatInfo::Group { .. } => {
            if s.is_empty() {
                chat.is_pinned() || chat.chat_info.is_invited_group()
            } else {
                view_name_contains(&chat.chat_info, s)
            }
        }
        ChatInfo::ContactRequest { .. } => s.is_empty() || view_name_contains(&chat.chat_info, s),
        ChatInfo::ContactConnection { contact_connection } => {
            !s.is_empty() && contact_connection.local_alias.to_lowercase().contains(s)
        }
        ChatInfo::InvalidJson { .. } => false,
    }
}

fn view_name_contains(chat_info: &ChatInfo, s: &str) -> bool {
    chat_info.chat_view_name().to_lowercase().contains(s)
}
