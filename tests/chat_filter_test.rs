use simplex_chatlist::filter_chats;
use simplex_chatlist::types::{
    Chat, ChatInfo, Contact, GroupInfo, GroupMember, GroupMemberStatus, PendingContactConnection,
    Profile, UserContactRequest,
};

fn direct(id: i64, display_name: &str, full_name: &str) -> Chat {
    Chat::new(ChatInfo::Direct {
        contact: Contact::new(id, Profile::new(display_name, full_name)),
    })
}

fn favorite_direct(id: i64, display_name: &str) -> Chat {
    let mut contact = Contact::new(id, Profile::new(display_name, ""));
    contact.chat_settings.favorite = true;
    Chat::new(ChatInfo::Direct { contact })
}

fn group(id: i64, display_name: &str, full_name: &str) -> Chat {
    Chat::new(ChatInfo::Group {
        group_info: GroupInfo::new(id, Profile::new(display_name, full_name)),
    })
}

fn invited_group(id: i64, display_name: &str) -> Chat {
    let mut group_info = GroupInfo::new(id, Profile::new(display_name, ""));
    group_info.membership = GroupMember::with_status(GroupMemberStatus::Invited);
    Chat::new(ChatInfo::Group { group_info })
}

fn contact_request(id: i64, display_name: &str) -> Chat {
    Chat::new(ChatInfo::ContactRequest {
        contact_request: UserContactRequest::new(id, Profile::new(display_name, "")),
    })
}

fn connection(id: i64, alias: &str) -> Chat {
    Chat::new(ChatInfo::ContactConnection {
        contact_connection: PendingContactConnection::new(id, alias),
    })
}

fn invalid(id: &str) -> Chat {
    Chat::new(ChatInfo::InvalidJson {
        id: id.to_string(),
        json: "{".to_string(),
    })
}

fn ids(chats: &[Chat]) -> Vec<String> {
    chats.iter().map(Chat::id).collect()
}

fn mixed_roster() -> Vec<Chat> {
    vec![
        direct(1, "alice", "Alice Liddell"),
        direct(2, "Bob Smith", "").with_stats(3, false),
        favorite_direct(3, "carol"),
        group(1, "team", "The Team"),
        invited_group(2, "book club"),
        group(3, "family", "").with_stats(0, true),
        contact_request(1, "dave"),
        connection(1, "met at the bakery"),
        connection(2, ""),
        invalid("@99"),
    ]
}

#[test]
fn test_empty_search_without_toggle_is_identity() {
    let roster = mixed_roster();
    assert_eq!(filter_chats(false, false, None, "", &roster), roster);
    assert_eq!(filter_chats(false, false, None, "   ", &roster), roster);
}

#[test]
fn test_unread_and_favorites_toggle_shows_pinned_chats() {
    let roster = mixed_roster();
    let shown = filter_chats(true, false, None, "", &roster);
    assert_eq!(ids(&shown), vec!["@2", "@3", "#2", "#3", "<@1"]);
}

#[test]
fn test_invited_group_shown_over_unpinned_direct_chat() {
    let roster = vec![direct(1, "Alice", ""), invited_group(7, "Team")];
    let shown = filter_chats(true, false, None, "", &roster);
    assert_eq!(ids(&shown), vec!["#7"]);
}

#[test]
fn test_direct_chat_matches_display_and_full_name() {
    let roster = mixed_roster();
    assert_eq!(ids(&filter_chats(false, false, None, "bob", &roster)), vec!["@2"]);
    assert_eq!(ids(&filter_chats(false, false, None, "LIDDELL", &roster)), vec!["@1"]);
}

#[test]
fn test_direct_chat_matches_local_alias() {
    let mut contact = Contact::new(4, Profile::new("eve", ""));
    contact.local_alias = "Neighbour".to_string();
    let roster = vec![Chat::new(ChatInfo::Direct { contact }), direct(5, "frank", "")];

    assert_eq!(ids(&filter_chats(false, false, None, "neigh", &roster)), vec!["@4"]);
    // the profile name still matches when an alias hides it from the view name
    assert_eq!(ids(&filter_chats(false, false, None, "eve", &roster)), vec!["@4"]);
}

#[test]
fn test_group_matches_view_name_only() {
    let roster = mixed_roster();
    assert_eq!(ids(&filter_chats(false, false, None, "the team", &roster)), vec!["#1"]);
    assert_eq!(ids(&filter_chats(false, false, None, "club", &roster)), vec!["#2"]);
}

#[test]
fn test_contact_connection_needs_alias_match() {
    let roster = mixed_roster();
    assert_eq!(ids(&filter_chats(false, false, None, "bakery", &roster)), vec![":1"]);
    assert!(ids(&filter_chats(false, false, None, "pending", &roster)).is_empty());
}

#[test]
fn test_contact_request_matches_name() {
    let roster = mixed_roster();
    assert_eq!(ids(&filter_chats(false, false, None, "dav", &roster)), vec!["<@1"]);
}

#[test]
fn test_invalid_chats_only_in_unfiltered_list() {
    let roster = vec![invalid("@1"), direct(2, "invalid", "")];
    assert_eq!(ids(&filter_chats(false, false, None, "invalid", &roster)), vec!["@2"]);
    assert!(filter_chats(true, false, None, "", &roster).is_empty());
}

#[test]
fn test_resolved_chat_narrows_to_single_match() {
    let roster = mixed_roster();
    let shown = filter_chats(true, true, Some("#2"), "whatever", &roster);
    assert_eq!(ids(&shown), vec!["#2"]);
}

#[test]
fn test_unresolved_link_mode_skips_text_search() {
    let roster = mixed_roster();
    assert_eq!(filter_chats(false, true, None, "bob", &roster), roster);

    let pinned = filter_chats(true, true, None, "bob", &roster);
    assert_eq!(pinned, filter_chats(true, false, None, "", &roster));
}

#[test]
fn test_results_are_ordered_subsets_and_idempotent() {
    let roster = mixed_roster();
    let cases: [(bool, bool, Option<&str>, &str); 7] = [
        (false, false, None, ""),
        (true, false, None, ""),
        (false, false, None, "a"),
        (true, false, None, "team"),
        (false, true, None, "a"),
        (false, false, Some("@3"), ""),
        (true, true, Some(":1"), "x"),
    ];

    for (toggle, link, resolved, search) in cases {
        let once = filter_chats(toggle, link, resolved, search, &roster);

        let positions = once
            .iter()
            .map(|chat| roster.iter().position(|c| c == chat).expect("result must come from roster"));
        let mut last = None;
        for pos in positions {
            assert!(last < Some(pos), "roster order must be kept for {search:?}");
            last = Some(pos);
        }

        let twice = filter_chats(toggle, link, resolved, search, &once);
        assert_eq!(once, twice, "filtering must be idempotent for {search:?}");
    }
}
