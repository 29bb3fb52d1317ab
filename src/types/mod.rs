pub mod chat;
pub mod contact;
pub mod group;

pub use chat::{Chat, ChatId, ChatInfo, ChatSettings, ChatStats, ChatType};
pub use contact::{Contact, PendingContactConnection, Profile, UserContactRequest};
pub use group::{GroupInfo, GroupMember, GroupMemberStatus};
