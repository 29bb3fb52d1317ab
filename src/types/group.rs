use serde::{Deserialize, Serialize};

use super::chat::{ChatId, ChatSettings, ChatType};
use super::contact::Profile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupMemberStatus {
    Removed,
    Left,
    GroupDeleted,
    Invited,
    Introduced,
    IntroInvited,
    Accepted,
    Announced,
    Connected,
    Complete,
    Creator,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    #[serde(default)]
    pub group_member_id: i64,
    #[serde(default)]
    pub member_status: GroupMemberStatus,
}

impl GroupMember {
    pub fn with_status(member_status: GroupMemberStatus) -> Self {
        Self {
            group_member_id: 0,
            member_status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    pub group_id: i64,
    #[serde(default)]
    pub local_display_name: String,
    pub group_profile: Profile,
    /// The user's own membership in this group.
    #[serde(default)]
    pub membership: GroupMember,
    #[serde(default)]
    pub chat_settings: ChatSettings,
}

impl GroupInfo {
    pub fn new(group_id: i64, group_profile: Profile) -> Self {
        Self {
            group_id,
            local_display_name: group_profile.display_name.clone(),
            group_profile,
            ..Default::default()
        }
    }

    pub fn chat_id(&self) -> ChatId {
        ChatType::Group.chat_id(self.group_id)
    }

    pub fn chat_view_name(&self) -> String {
        self.group_profile.view_name()
    }
}
