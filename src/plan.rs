//! Connection plans: what connecting via a link would do.
//!
//! The chat core answers a "plan and connect" request with one of these.
//! The chat list only cares whether the link points at a contact or group
//! the user already has, see [`ConnectionPlan::resolution`].

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::PlanError;
use crate::types::{ChatId, Contact, GroupInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InvitationLinkPlan {
    Ok,
    OwnLink,
    Connecting { contact: Option<Contact> },
    Known { contact: Contact },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ContactAddressPlan {
    Ok,
    OwnLink,
    ConnectingConfirmReconnect,
    ConnectingProhibit { contact: Contact },
    Known { contact: Contact },
    ContactViaAddress { contact: Contact },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GroupLinkPlan {
    Ok,
    OwnLink { group_info: GroupInfo },
    ConnectingConfirmReconnect,
    ConnectingProhibit { group_info: Option<GroupInfo> },
    Known { group_info: GroupInfo },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "plan", rename_all = "camelCase")]
pub enum ConnectionPlan {
    InvitationLink(InvitationLinkPlan),
    ContactAddress(ContactAddressPlan),
    GroupLink(GroupLinkPlan),
}

/// The chat a link leads to, if the user already has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkResolution {
    KnownContact(ChatId),
    KnownGroup(ChatId),
    Unknown,
}

impl LinkResolution {
    pub fn chat_id(&self) -> Option<&str> {
        match self {
            LinkResolution::KnownContact(id) | LinkResolution::KnownGroup(id) => Some(id),
            LinkResolution::Unknown => None,
        }
    }
}

impl ConnectionPlan {
    pub fn resolution(&self) -> LinkResolution {
        match self {
            ConnectionPlan::InvitationLink(
                InvitationLinkPlan::Connecting {
                    contact: Some(contact),
                }
                | InvitationLinkPlan::Known { contact },
            )
            | ConnectionPlan::ContactAddress(
                ContactAddressPlan::ConnectingProhibit { contact }
                | ContactAddressPlan::Known { contact }
                | ContactAddressPlan::ContactViaAddress { contact },
            ) => LinkResolution::KnownContact(contact.chat_id()),
            ConnectionPlan::GroupLink(
                GroupLinkPlan::OwnLink { group_info }
                | GroupLinkPlan::ConnectingProhibit {
                    group_info: Some(group_info),
                }
                | GroupLinkPlan::Known { group_info },
            ) => LinkResolution::KnownGroup(group_info.chat_id()),
            _ => LinkResolution::Unknown,
        }
    }
}

/// Asks the chat core what connecting via `uri` would do, connecting right
/// away when the link is new.
#[async_trait]
pub trait ConnectionPlanner: Send + Sync {
    async fn plan_and_connect(
        &self,
        host_id: Option<i64>,
        uri: &str,
    ) -> Result<ConnectionPlan, PlanError>;
}

/// Planner backed by a fixed `uri -> plan` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticPlanner {
    plans: HashMap<String, ConnectionPlan>,
}

impl StaticPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(mut self, uri: &str, plan: ConnectionPlan) -> Self {
        self.plans.insert(uri.to_string(), plan);
        self
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[async_trait]
impl ConnectionPlanner for StaticPlanner {
    async fn plan_and_connect(
        &self,
        host_id: Option<i64>,
        uri: &str,
    ) -> Result<ConnectionPlan, PlanError> {
        debug!("static plan lookup (host {host_id:?})");
        self.plans
            .get(uri)
            .cloned()
            .ok_or_else(|| PlanError::ResolutionFailure("link not in plan table".to_string()))
    }
}
