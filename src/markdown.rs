//! Inline markdown used in messages and in the chat list search field.
//!
//! Only inline formats are recognized: emphasis-style delimiters and
//! link-like words. The chat list uses it to spot pasted SimpleX links.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::simplex_uri::{SimplexLinkType, SimplexUri};

/// Inputs larger than this are not parsed at all.
pub const MAX_MARKDOWN_BYTES: usize = 32 * 1024;

const URI_PREFIXES: [&str; 3] = ["https://", "http://", "simplex:"];
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Format {
    Bold,
    Italic,
    StrikeThrough,
    Snippet,
    Secret,
    Uri,
    Email,
    SimplexLink {
        link_type: SimplexLinkType,
        simplex_uri: String,
        smp_hosts: Vec<String>,
    },
}

impl Format {
    pub fn is_simplex_link(&self) -> bool {
        matches!(self, Format::SimplexLink { .. })
    }

    fn for_delimiter(marker: u8) -> Option<Format> {
        match marker {
            b'*' => Some(Format::Bold),
            b'_' => Some(Format::Italic),
            b'~' => Some(Format::StrikeThrough),
            b'`' => Some(Format::Snippet),
            b'#' => Some(Format::Secret),
            _ => None,
        }
    }
}

/// One run of text; `format` is `None` for plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl FormattedText {
    pub fn new(text: &str, format: Option<Format>) -> Self {
        Self {
            text: text.to_string(),
            format,
        }
    }

    pub fn plain(text: &str) -> Self {
        Self::new(text, None)
    }

    pub fn is_simplex_link(&self) -> bool {
        self.format.as_ref().is_some_and(Format::is_simplex_link)
    }
}

/// Splits text into formatted runs.
///
/// Returns `None` when the text cannot be parsed or carries no formatting,
/// so callers can treat "nothing recognized" and "parse failure" alike.
pub trait MarkdownParser: Send + Sync {
    fn parse(&self, text: &str) -> Option<Vec<FormattedText>>;
}

#[derive(Debug, Clone)]
pub struct SimplexMarkdown {
    max_bytes: usize,
}

impl SimplexMarkdown {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for SimplexMarkdown {
    fn default() -> Self {
        Self::new(MAX_MARKDOWN_BYTES)
    }
}

impl MarkdownParser for SimplexMarkdown {
    fn parse(&self, text: &str) -> Option<Vec<FormattedText>> {
        if text.is_empty() {
            return None;
        }
        if text.len() > self.max_bytes {
            debug!(
                "markdown input of {} bytes exceeds limit of {}",
                text.len(),
                self.max_bytes
            );
            return None;
        }

        let runs = parse_runs(text);
        runs.iter().any(|r| r.format.is_some()).then_some(runs)
    }
}

fn parse_runs(text: &str) -> Vec<FormattedText> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    // Only ASCII bytes are ever compared, so every index used for slicing
    // sits on a char boundary.
    while i < bytes.len() {
        let at_word_start = (i == 0 || bytes[i - 1].is_ascii_whitespace())
            && !bytes[i].is_ascii_whitespace();

        if at_word_start
            && let Some((end, run)) = delimited_run(text, i).or_else(|| word_run(text, i))
        {
            push_plain(&mut runs, &text[plain_start..i]);
            runs.push(run);
            i = end;
            plain_start = end;
            continue;
        }
        i += 1;
    }

    push_plain(&mut runs, &text[plain_start..]);
    runs
}

fn push_plain(runs: &mut Vec<FormattedText>, text: &str) {
    if !text.is_empty() {
        runs.push(FormattedText::plain(text));
    }
}

/// `*bold*` and friends. The closing marker must follow a non-space and be
/// followed by whitespace, punctuation or the end of the text. A run never
/// extends over a link or email word, so `#` inside `contact#/` cannot close it.
fn delimited_run(text: &str, start: usize) -> Option<(usize, FormattedText)> {
    let bytes = text.as_bytes();
    let marker = bytes[start];
    let format = Format::for_delimiter(marker)?;

    let inner_start = start + 1;
    let first = *bytes.get(inner_start)?;
    if first.is_ascii_whitespace() || first == marker {
        return None;
    }

    for j in inner_start + 1..bytes.len() {
        if bytes[j - 1].is_ascii_whitespace()
            && !bytes[j].is_ascii_whitespace()
            && word_run(text, j).is_some()
        {
            return None;
        }

        match bytes[j] {
            b'\n' => return None,
            b if b == marker => {
                let closes = bytes
                    .get(j + 1)
                    .is_none_or(|next| next.is_ascii_whitespace() || next.is_ascii_punctuation());
                if closes && !bytes[j - 1].is_ascii_whitespace() {
                    let run = FormattedText::new(&text[inner_start..j], Some(format));
                    return Some((j + 1, run));
                }
            }
            _ => {}
        }
    }
    None
}

fn word_run(text: &str, start: usize) -> Option<(usize, FormattedText)> {
    let end = text[start..]
        .find(|c: char| c.is_ascii_whitespace())
        .map_or(text.len(), |n| start + n);
    let word = text[start..end].trim_end_matches(TRAILING_PUNCTUATION);
    if word.is_empty() {
        return None;
    }

    let format = classify_word(word)?;
    Some((start + word.len(), FormattedText::new(word, Some(format))))
}

fn classify_word(word: &str) -> Option<Format> {
    if let Ok(uri) = word.parse::<SimplexUri>() {
        return Some(Format::SimplexLink {
            link_type: uri.link_type,
            simplex_uri: word.to_string(),
            smp_hosts: uri.smp_hosts,
        });
    }

    if URI_PREFIXES
        .iter()
        .any(|p| word.len() > p.len() && word.starts_with(p))
    {
        return Some(Format::Uri);
    }

    is_email(word).then_some(Format::Email)
}

fn is_email(word: &str) -> bool {
    let Some((local, domain)) = word.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || "._%+-".contains(c));
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
    local_ok && domain_ok
}
