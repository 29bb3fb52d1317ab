use serde::{Deserialize, Serialize};
use std::fmt;

use super::contact::{Contact, PendingContactConnection, UserContactRequest};
use super::group::{GroupInfo, GroupMemberStatus};

// Type Aliases
pub type ChatId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatType {
    Direct,
    Group,
    ContactRequest,
    ContactConnection,
}

impl ChatType {
    /// Prefix used when building chat ids, e.g. `@12` or `#3`.
    pub fn prefix(self) -> &'static str {
        match self {
            ChatType::Direct => "@",
            ChatType::Group => "#",
            ChatType::ContactRequest => "<@",
            ChatType::ContactConnection => ":",
        }
    }

    pub fn chat_id(self, id: i64) -> ChatId {
        format!("{}{}", self.prefix(), id)
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSettings {
    #[serde(default)]
    pub favorite: bool,
    #[serde(default = "default_true")]
    pub send_notifications: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            favorite: false,
            send_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStats {
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub unread_chat: bool,
}

/// What a chat list entry points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChatInfo {
    Direct {
        contact: Contact,
    },
    Group {
        group_info: GroupInfo,
    },
    ContactRequest {
        contact_request: UserContactRequest,
    },
    ContactConnection {
        contact_connection: PendingContactConnection,
    },
    #[serde(rename = "invalidJSON")]
    InvalidJson {
        id: ChatId,
        #[serde(default)]
        json: String,
    },
}

impl ChatInfo {
    pub fn chat_type(&self) -> Option<ChatType> {
        match self {
            ChatInfo::Direct { .. } => Some(ChatType::Direct),
            ChatInfo::Group { .. } => Some(ChatType::Group),
            ChatInfo::ContactRequest { .. } => Some(ChatType::ContactRequest),
            ChatInfo::ContactConnection { .. } => Some(ChatType::ContactConnection),
            ChatInfo::InvalidJson { .. } => None,
        }
    }

    pub fn id(&self) -> ChatId {
        match self {
            ChatInfo::Direct { contact } => contact.chat_id(),
            ChatInfo::Group { group_info } => group_info.chat_id(),
            ChatInfo::ContactRequest { contact_request } => contact_request.chat_id(),
            ChatInfo::ContactConnection { contact_connection } => contact_connection.chat_id(),
            ChatInfo::InvalidJson { id, .. } => id.clone(),
        }
    }

    /// The name shown in the chat list and matched by search.
    pub fn chat_view_name(&self) -> String {
        match self {
            ChatInfo::Direct { contact } => contact.chat_view_name(),
            ChatInfo::Group { group_info } => group_info.chat_view_name(),
            ChatInfo::ContactRequest { contact_request } => contact_request.chat_view_name(),
            ChatInfo::ContactConnection { contact_connection } => {
                contact_connection.chat_view_name()
            }
            ChatInfo::InvalidJson { .. } => "invalid chat data".to_string(),
        }
    }

    pub fn chat_settings(&self) -> Option<&ChatSettings> {
        match self {
            ChatInfo::Direct { contact } => Some(&contact.chat_settings),
            ChatInfo::Group { group_info } => Some(&group_info.chat_settings),
            _ => None,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.chat_settings().is_some_and(|s| s.favorite)
    }

    /// Whether the user has a pending group invitation behind this entry.
    pub fn is_invited_group(&self) -> bool {
        matches!(
            self,
            ChatInfo::Group { group_info }
                if group_info.membership.member_status == GroupMemberStatus::Invited
        )
    }
}

/// A chat list entry: the chat it refers to plus its unread counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_info: ChatInfo,
    #[serde(default)]
    pub chat_stats: ChatStats,
}

impl Chat {
    pub fn new(chat_info: ChatInfo) -> Self {
        Self {
            chat_info,
            chat_stats: ChatStats::default(),
        }
    }

    pub fn with_stats(mut self, unread_count: u32, unread_chat: bool) -> Self {
        self.chat_stats = ChatStats {
            unread_count,
            unread_chat,
        };
        self
    }

    pub fn id(&self) -> ChatId {
        self.chat_info.id()
    }

    /// Favorite, has unread messages, or was explicitly marked unread.
    pub fn is_pinned(&self) -> bool {
        self.chat_info.is_favorite()
            || self.chat_stats.unread_count > 0
            || self.chat_stats.unread_chat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroupMember, Profile};

    fn alice() -> Contact {
        Contact::new(1, Profile::new("alice", "Alice Liddell"))
    }

    #[test]
    fn test_chat_ids_carry_type_prefix() {
        let direct = Chat::new(ChatInfo::Direct { contact: alice() });
        assert_eq!(direct.id(), "@1");

        let group = Chat::new(ChatInfo::Group {
            group_info: GroupInfo::new(7, Profile::new("team", "")),
        });
        assert_eq!(group.id(), "#7");

        assert_eq!(ChatType::ContactRequest.chat_id(3), "<@3");
        assert_eq!(ChatType::ContactConnection.chat_id(4), ":4");
    }

    #[test]
    fn test_is_pinned() {
        let chat = Chat::new(ChatInfo::Direct { contact: alice() });
        assert!(!chat.is_pinned());
        assert!(chat.clone().with_stats(2, false).is_pinned());
        assert!(chat.clone().with_stats(0, true).is_pinned());

        let mut favorite = alice();
        favorite.chat_settings.favorite = true;
        assert!(Chat::new(ChatInfo::Direct { contact: favorite }).is_pinned());
    }

    #[test]
    fn test_invited_group() {
        let mut group_info = GroupInfo::new(1, Profile::new("team", ""));
        let chat_info = ChatInfo::Group {
            group_info: group_info.clone(),
        };
        assert!(!chat_info.is_invited_group());

        group_info.membership = GroupMember::with_status(GroupMemberStatus::Invited);
        assert!(ChatInfo::Group { group_info }.is_invited_group());
    }

    #[test]
    fn test_chat_info_json_shape() {
        let json = r#"{
            "chatInfo": {
                "type": "direct",
                "contact": {
                    "contactId": 5,
                    "localDisplayName": "bob",
                    "profile": {"displayName": "bob", "fullName": "Bob Smith"},
                    "chatSettings": {"favorite": true}
                }
            },
            "chatStats": {"unreadCount": 3}
        }"#;
        let chat: Chat = serde_json::from_str(json).expect("chat should deserialize");
        assert_eq!(chat.id(), "@5");
        assert!(chat.chat_info.is_favorite());
        assert_eq!(chat.chat_stats.unread_count, 3);
        assert!(!chat.chat_stats.unread_chat);

        let invalid: Chat =
            serde_json::from_str(r#"{"chatInfo": {"type": "invalidJSON", "id": "@9"}}"#)
                .expect("invalid chat should deserialize");
        assert_eq!(invalid.id(), "@9");
        assert_eq!(invalid.chat_info.chat_type(), None);
    }
}
