//! Link extraction from Markdown content.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};

/// A link found in a Markdown page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    /// Destination as written
    pub target: String,

    /// Line number in the source file (1-indexed)
    pub line: usize,
}

impl MarkdownLink {
    /// The target without `?query` or `#fragment`.
    pub fn path(&self) -> &str {
        strip_suffixes(&self.target)
    }

    /// Whether the link only points at an anchor on the same page.
    pub fn is_fragment_only(&self) -> bool {
        self.target.starts_with('#')
    }

    /// Whether the link references another Markdown source file.
    pub fn is_file_reference(&self) -> bool {
        let path = self.path();
        path.ends_with(".md") || path.ends_with(".mdx")
    }
}

/// Strip `?query` and `#fragment` from a link target.
pub fn strip_suffixes(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

/// Extract every link destination from Markdown content.
///
/// `line_offset` is the number of lines preceding `content` in its file,
/// e.g. the frontmatter block. Images, e-mail autolinks and URL autolinks are
/// not reported.
pub fn extract_links(content: &str, line_offset: usize) -> Vec<MarkdownLink> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let newlines: Vec<usize> = content.match_indices('\n').map(|(i, _)| i).collect();

    Parser::new_ext(content, options)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::Link {
                link_type, dest_url, ..
            }) if !matches!(link_type, LinkType::Email | LinkType::Autolink) => {
                let line = newlines.partition_point(|&i| i < range.start) + 1 + line_offset;
                Some(MarkdownLink {
                    target: dest_url.to_string(),
                    line,
                })
            }
            _ => None,
        })
        .collect()
}
