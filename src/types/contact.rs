use serde::{Deserialize, Serialize};

use super::chat::{ChatId, ChatSettings, ChatType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Profile {
    pub fn new(display_name: &str, full_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            full_name: full_name.to_string(),
            image: None,
        }
    }

    /// `display_name`, followed by ` / full_name` when the full name adds something.
    pub fn view_name(&self) -> String {
        if self.full_name.is_empty() || self.full_name == self.display_name {
            self.display_name.clone()
        } else {
            format!("{} / {}", self.display_name, self.full_name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_id: i64,
    #[serde(default)]
    pub local_display_name: String,
    pub profile: Profile,
    #[serde(default)]
    pub local_alias: String,
    #[serde(default)]
    pub chat_settings: ChatSettings,
}

impl Contact {
    pub fn new(contact_id: i64, profile: Profile) -> Self {
        Self {
            contact_id,
            local_display_name: profile.display_name.clone(),
            profile,
            ..Default::default()
        }
    }

    pub fn chat_id(&self) -> ChatId {
        ChatType::Direct.chat_id(self.contact_id)
    }

    pub fn chat_view_name(&self) -> String {
        if self.local_alias.is_empty() {
            self.profile.view_name()
        } else {
            self.local_alias.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContactRequest {
    pub contact_request_id: i64,
    #[serde(default)]
    pub local_display_name: String,
    pub profile: Profile,
}

impl UserContactRequest {
    pub fn new(contact_request_id: i64, profile: Profile) -> Self {
        Self {
            contact_request_id,
            local_display_name: profile.display_name.clone(),
            profile,
        }
    }

    pub fn chat_id(&self) -> ChatId {
        ChatType::ContactRequest.chat_id(self.contact_request_id)
    }

    pub fn chat_view_name(&self) -> String {
        self.profile.view_name()
    }
}

/// A connection the user started (or accepted) that has no contact yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingContactConnection {
    pub pcc_conn_id: i64,
    #[serde(default)]
    pub local_alias: String,
    #[serde(default)]
    pub initiated: bool,
    #[serde(default)]
    pub via_contact_uri: bool,
}

impl PendingContactConnection {
    pub fn new(pcc_conn_id: i64, local_alias: &str) -> Self {
        Self {
            pcc_conn_id,
            local_alias: local_alias.to_string(),
            ..Default::default()
        }
    }

    pub fn chat_id(&self) -> ChatId {
        ChatType::ContactConnection.chat_id(self.pcc_conn_id)
    }

    pub fn chat_view_name(&self) -> String {
        if !self.local_alias.trim().is_empty() {
            self.local_alias.clone()
        } else if self.initiated && self.via_contact_uri {
            "connection via link".to_string()
        } else {
            "pending connection".to_string()
        }
    }
}
