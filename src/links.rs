//! Detection of a single pasted SimpleX link in free text.

use log::debug;

use crate::error::LinkError;
use crate::markdown::{Format, FormattedText, MarkdownParser};
use crate::simplex_uri::SimplexLinkType;

/// Turns a detected link into the text shown in the search field.
pub trait LinkFormatter: Send + Sync {
    fn format(&self, link_type: SimplexLinkType, smp_hosts: &[String]) -> String;
}

/// `"SimpleX contact address (via smp.example)"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLinkFormatter;

impl LinkFormatter for DefaultLinkFormatter {
    fn format(&self, link_type: SimplexLinkType, smp_hosts: &[String]) -> String {
        let host = smp_hosts.first().map_or("?", String::as_str);
        format!("{} (via {})", link_type.description(), host)
    }
}

/// Display text for a link run, `None` if the run is not a SimpleX link.
pub fn link_display_text(link: &FormattedText, formatter: &dyn LinkFormatter) -> Option<String> {
    match &link.format {
        Some(Format::SimplexLink {
            link_type,
            smp_hosts,
            ..
        }) => Some(formatter.format(*link_type, smp_hosts)),
        _ => None,
    }
}

/// Returns the only SimpleX link in `text`, or why there isn't exactly one.
pub fn find_single_link(
    parser: &dyn MarkdownParser,
    text: &str,
) -> Result<FormattedText, LinkError> {
    let runs = parser.parse(text).ok_or(LinkError::ParseFailure)?;
    let mut links: Vec<FormattedText> = runs.into_iter().filter(|r| r.is_simplex_link()).collect();

    match links.len() {
        0 => Err(LinkError::NoLink),
        1 => Ok(links.remove(0)),
        n => Err(LinkError::AmbiguousLink(n)),
    }
}

/// Like [`find_single_link`], but treats every failure as "no link".
pub fn detect_single_link(parser: &dyn MarkdownParser, text: &str) -> Option<FormattedText> {
    match find_single_link(parser, text) {
        Ok(link) => Some(link),
        Err(e) => {
            if !text.is_empty() {
                debug!("no single link in search text: {e}");
            }
            None
        }
    }
}

/// The whole text is one SimpleX link and nothing else.
pub fn is_simplex_link(parser: &dyn MarkdownParser, text: &str) -> bool {
    parser
        .parse(text)
        .is_some_and(|runs| runs.len() == 1 && runs[0].is_simplex_link())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::SimplexMarkdown;

    const LINK_A: &str = "https://simplex.chat/contact#/?v=2-7&smp=smp%3A%2F%2Fkey%40a.example%2Fq1";
    const LINK_B: &str = "simplex:/invitation#/?v=2&smp=smp%3A%2F%2Fkey%40b.example%2Fq2";

    #[test]
    fn test_single_link_found() {
        let parser = SimplexMarkdown::default();
        let link = detect_single_link(&parser, &format!("hey, connect: {LINK_A}"))
            .expect("single link should be detected");
        assert_eq!(link.text, LINK_A);
        assert_eq!(
            link_display_text(&link, &DefaultLinkFormatter).as_deref(),
            Some("SimpleX contact address (via a.example)")
        );
    }

    #[test]
    fn test_link_after_hash_word_is_found() {
        let parser = SimplexMarkdown::default();
        let link = find_single_link(&parser, &format!("join #team via {LINK_A}"))
            .expect("link after #team should be detected");
        assert_eq!(link.text, LINK_A);

        let link = find_single_link(&parser, &format!("*see* {LINK_B} ~later~"))
            .expect("link between formatted words should be detected");
        assert_eq!(link.text, LINK_B);
    }

    #[test]
    fn test_reasons_for_no_link() {
        let parser = SimplexMarkdown::default();
        assert_eq!(find_single_link(&parser, ""), Err(LinkError::ParseFailure));
        assert_eq!(find_single_link(&parser, "alice"), Err(LinkError::ParseFailure));
        assert_eq!(
            find_single_link(&parser, "*bold* https://example.com"),
            Err(LinkError::NoLink)
        );
        assert_eq!(
            find_single_link(&parser, &format!("{LINK_A} {LINK_B}")),
            Err(LinkError::AmbiguousLink(2))
        );
        assert!(detect_single_link(&parser, &format!("{LINK_A}\n{LINK_B}")).is_none());
    }

    #[test]
    fn test_is_simplex_link_requires_whole_text() {
        let parser = SimplexMarkdown::default();
        assert!(is_simplex_link(&parser, LINK_B));
        assert!(!is_simplex_link(&parser, &format!("{LINK_B} please")));
        assert!(!is_simplex_link(&parser, "https://example.com"));
    }

    #[test]
    fn test_formatter_without_hosts() {
        assert_eq!(
            DefaultLinkFormatter.format(SimplexLinkType::Group, &[]),
            "SimpleX group link (via ?)"
        );
        assert_eq!(link_display_text(&FormattedText::plain("x"), &DefaultLinkFormatter), None);
    }
}
