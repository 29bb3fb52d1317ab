use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Constants
pub const SIMPLEX_WEB_PREFIX: &str = "https://simplex.chat/";
pub const SIMPLEX_APP_PREFIX: &str = "simplex:/";
pub const SMP_SCHEME: &str = "smp://";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimplexUriError {
    #[error("not a SimpleX link: {0}")]
    UnknownScheme(String),
    #[error("unknown link action: {0}")]
    UnknownAction(String),
    #[error("link has no fragment")]
    MissingFragment,
    #[error("link fragment has no query")]
    MissingQuery,
    #[error("link has no smp queue")]
    MissingSmpQueue,
    #[error("invalid SMP server address: {0}")]
    InvalidSmpServer(String),
    #[error("invalid percent-encoding: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SimplexLinkType {
    Contact,
    Invitation,
    Group,
}

impl SimplexLinkType {
    pub fn description(self) -> &'static str {
        match self {
            SimplexLinkType::Contact => "SimpleX contact address",
            SimplexLinkType::Invitation => "SimpleX one-time invitation",
            SimplexLinkType::Group => "SimpleX group link",
        }
    }
}

impl fmt::Display for SimplexLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The parts of a SimpleX connection link that the chat list cares about.
///
/// Accepts both the web form (`https://simplex.chat/contact#/?...`) and the
/// app form (`simplex:/invitation#/?...`). Hosts are taken from every SMP
/// queue in the `smp` parameter, in order, without duplicates or ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplexUri {
    pub link_type: SimplexLinkType,
    pub smp_hosts: Vec<String>,
}

impl FromStr for SimplexUri {
    type Err = SimplexUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SIMPLEX_WEB_PREFIX)
            .or_else(|| s.strip_prefix(SIMPLEX_APP_PREFIX))
            .ok_or_else(|| SimplexUriError::UnknownScheme(s.to_string()))?;

        let (action, fragment) = rest
            .split_once('#')
            .ok_or(SimplexUriError::MissingFragment)?;

        let mut link_type = match action {
            "contact" => SimplexLinkType::Contact,
            "invitation" => SimplexLinkType::Invitation,
            other => return Err(SimplexUriError::UnknownAction(other.to_string())),
        };

        let query = fragment
            .strip_prefix("/?")
            .or_else(|| fragment.strip_prefix('?'))
            .ok_or(SimplexUriError::MissingQuery)?;

        let mut smp = None;
        let mut data = None;
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "smp" => smp = Some(urlencoding::decode(value)?.into_owned()),
                "data" => data = Some(urlencoding::decode(value)?.into_owned()),
                _ => {}
            }
        }

        let smp = smp.ok_or(SimplexUriError::MissingSmpQueue)?;
        let mut smp_hosts: Vec<String> = Vec::new();
        for server in smp.split(';').filter(|s| !s.is_empty()) {
            for host in smp_server_hosts(server)? {
                if !smp_hosts.contains(&host) {
                    smp_hosts.push(host);
                }
            }
        }
        if smp_hosts.is_empty() {
            return Err(SimplexUriError::MissingSmpQueue);
        }

        if link_type == SimplexLinkType::Contact
            && data.as_deref().is_some_and(|d| d.contains("groupLinkId"))
        {
            link_type = SimplexLinkType::Group;
        }

        Ok(SimplexUri {
            link_type,
            smp_hosts,
        })
    }
}

/// Hosts of one `smp://<key hash>@<host>[,<host>][:port]/<queue>` address.
fn smp_server_hosts(server: &str) -> Result<Vec<String>, SimplexUriError> {
    let invalid = || SimplexUriError::InvalidSmpServer(server.to_string());

    let rest = server.strip_prefix(SMP_SCHEME).ok_or_else(invalid)?;
    let (key_hash, after_key) = rest.split_once('@').ok_or_else(invalid)?;
    if key_hash.is_empty() {
        return Err(invalid());
    }

    let authority = after_key.split(['/', '#', '?']).next().unwrap_or_default();
    let hosts: Vec<String> = authority
        .split(',')
        .map(strip_port)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect();

    if hosts.is_empty() {
        return Err(invalid());
    }
    Ok(hosts)
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
