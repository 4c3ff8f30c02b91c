//! The markdown-to-HTML converter.
//!
//! Conversion is a fixed pipeline; each stage sees the output of the one
//! before it:
//!
//! 1. Headings (`######` down to `#`)
//! 2. Bold (`**x**`, `__x__`)
//! 3. Italic (`*x*`, `_x_`)
//! 4. Links (`[text](url)`)
//! 5. Lists, via a line scanner with explicit list state
//! 6. Paragraphs, split on blank lines
//! 7. Line breaks for the newlines left inside a block
//! 8. Runs of three or more breaks collapsed to two
//!
//! The list scanner also isolates lists and headings into blocks of their
//! own, so text that follows them without a blank line still becomes a
//! paragraph instead of being glued onto the list.

use std::sync::LazyLock;

use regex::Regex;

use super::styles::style_class;

static HEADINGS: LazyLock<Vec<(usize, Regex)>> = LazyLock::new(|| {
    (1..=6)
        .rev()
        .map(|level| {
            let pattern = format!(r"(?m)^#{{{level}}}[ \t]+(.+?)[ \t]*$");
            (level, Regex::new(&pattern).expect("heading pattern is valid"))
        })
        .collect()
});

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("bold pattern is valid"));

// Content may not start or end with whitespace, which keeps `* item` bullets
// and arithmetic like `2 * 3 * 4` intact.
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").expect("italic pattern is valid")
});

// Word-boundary anchored: `snake_case_names` stay as they are.
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b_([^_\s](?:[^_\n]*[^_\s])?)_\b").expect("italic pattern is valid")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").expect("link pattern is valid"));

static LINK_REPLACEMENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "<a href=\"${{2}}\" class=\"{}\">${{1}}</a>",
        style_class("link").unwrap_or_default()
    )
});

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+][ \t]+(.+)$").expect("list pattern is valid"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.[ \t]+(.+)$").expect("list pattern is valid"));

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<h[1-6]>.*</h[1-6]>$").expect("heading line pattern is valid"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("blank line pattern is valid"));

static EXCESS_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br\s*/?>\s*){3,}").expect("break pattern is valid"));

/// Tags that mark a block as already structured.
const BLOCK_TAGS: &[&str] = &[
    "<h1", "<h2", "<h3", "<h4", "<h5", "<h6", "<ul", "<ol", "<blockquote", "<pre", "<div",
    "<table", "<hr",
];

/// Convert markdown to HTML.
///
/// Never fails: empty or whitespace-only input yields an empty string, and
/// unsupported syntax is carried through as text.
///
/// # Example
///
/// ```
/// use etalase_content::markdown::render;
///
/// assert_eq!(
///     render("- Sablon\n- Bordir"),
///     "<ul><li>Sablon</li><li>Bordir</li></ul>"
/// );
/// ```
pub fn render(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let text = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let text = convert_headings(&text);
    let text = convert_bold(&text);
    let text = convert_italic(&text);
    let text = convert_links(&text);
    let text = convert_lists(&text);
    let html = wrap_paragraphs(&text);
    collapse_breaks(&html)
}

/// Convert an optional markdown value, treating `None` as empty.
pub fn render_opt(markdown: Option<&str>) -> String {
    markdown.map(render).unwrap_or_default()
}

fn convert_headings(text: &str) -> String {
    HEADINGS.iter().fold(text.to_string(), |acc, (level, re)| {
        re.replace_all(&acc, format!("<h{level}>${{1}}</h{level}>").as_str())
            .into_owned()
    })
}

fn convert_bold(text: &str) -> String {
    let text = BOLD_STARS.replace_all(text, "<strong>${1}</strong>");
    BOLD_UNDERSCORES
        .replace_all(&text, "<strong>${1}</strong>")
        .into_owned()
}

fn convert_italic(text: &str) -> String {
    let text = ITALIC_STAR.replace_all(text, "<em>${1}</em>");
    ITALIC_UNDERSCORE
        .replace_all(&text, "<em>${1}</em>")
        .into_owned()
}

fn convert_links(text: &str) -> String {
    LINK.replace_all(text, LINK_REPLACEMENT.as_str()).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    None,
    Unordered,
    Ordered,
}

impl ListState {
    fn open_tag(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Unordered => "<ul>",
            Self::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Unordered => "</ul>",
            Self::Ordered => "</ol>",
        }
    }
}

enum Line<'a> {
    Item(ListState, &'a str),
    Heading,
    Text,
}

fn classify(line: &str) -> Line<'_> {
    if let Some(item) = UNORDERED_ITEM.captures(line).and_then(|c| c.get(1)) {
        return Line::Item(ListState::Unordered, item.as_str());
    }
    if let Some(item) = ORDERED_ITEM.captures(line).and_then(|c| c.get(1)) {
        return Line::Item(ListState::Ordered, item.as_str());
    }
    if HEADING_LINE.is_match(line) {
        return Line::Heading;
    }
    Line::Text
}

/// Collects output lines; a list under construction is kept on one line.
struct ListScanner {
    lines: Vec<String>,
    state: ListState,
    current: String,
}

impl ListScanner {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            state: ListState::None,
            current: String::new(),
        }
    }

    /// Start a new block unless the previous line already ended one.
    fn separate(&mut self) {
        if self.lines.last().is_some_and(|l| !l.trim().is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn close(&mut self) {
        if self.state == ListState::None {
            return;
        }
        self.current.push_str(self.state.close_tag());
        self.lines.push(std::mem::take(&mut self.current));
        self.lines.push(String::new());
        self.state = ListState::None;
    }

    fn item(&mut self, kind: ListState, content: &str) {
        if self.state != kind {
            self.close();
            self.separate();
            self.current.push_str(kind.open_tag());
            self.state = kind;
        }
        self.current.push_str("<li>");
        self.current.push_str(content);
        self.current.push_str("</li>");
    }

    fn heading(&mut self, line: &str) {
        self.close();
        self.separate();
        self.lines.push(line.to_string());
        self.lines.push(String::new());
    }

    fn text(&mut self, line: &str) {
        self.close();
        self.lines.push(line.to_string());
    }

    fn finish(mut self) -> String {
        self.close();
        self.lines.join("\n")
    }
}

fn convert_lists(text: &str) -> String {
    let mut scanner = ListScanner::new();
    for line in text.split('\n') {
        match classify(line) {
            Line::Item(kind, content) => scanner.item(kind, content),
            Line::Heading => scanner.heading(line),
            Line::Text => scanner.text(line),
        }
    }
    scanner.finish()
}

fn wrap_paragraphs(text: &str) -> String {
    BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let block = if BLOCK_TAGS.iter().any(|tag| block.starts_with(tag)) {
                block.to_string()
            } else {
                format!("<p>{block}</p>")
            };
            block.replace('\n', "<br>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_breaks(html: &str) -> String {
    EXCESS_BREAKS.replace_all(html, "<br><br>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Degenerate input
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_empty() {
        assert_eq!(render(""), "");
        assert_eq!(render("   \n\n  "), "");
    }

    #[test]
    fn test_render_opt_none() {
        assert_eq!(render_opt(None), "");
        assert_eq!(render_opt(Some("hi")), "<p>hi</p>");
    }

    #[test]
    fn test_render_deterministic() {
        let input = "# A\n\n- x\n- y\n\n**b** _c_ [d](/e)";
        assert_eq!(render(input), render(input));
    }

    // ------------------------------------------------------------------------
    // Headings
    // ------------------------------------------------------------------------

    #[test]
    fn test_heading_h1_only() {
        let html = render("# Title");
        assert_eq!(html, "<h1>Title</h1>");
        assert_eq!(html.matches("<h1>Title</h1>").count(), 1);
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6 {
            let input = format!("{} Level", "#".repeat(level));
            assert_eq!(render(&input), format!("<h{level}>Level</h{level}>"));
        }
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(render("#hashtag"), "<p>#hashtag</p>");
    }

    #[test]
    fn test_seven_hashes_is_not_heading() {
        assert_eq!(render("####### deep"), "<p>####### deep</p>");
    }

    #[test]
    fn test_heading_followed_by_text_without_blank_line() {
        assert_eq!(
            render("## Layanan\nSablon dan bordir"),
            "<h2>Layanan</h2>\n<p>Sablon dan bordir</p>"
        );
    }

    // ------------------------------------------------------------------------
    // Inline formatting
    // ------------------------------------------------------------------------

    #[test]
    fn test_bold_and_italic() {
        let html = render("**bold** and *italic*");
        assert_eq!(html, "<p><strong>bold</strong> and <em>italic</em></p>");
        assert_eq!(html.matches("<strong>bold</strong>").count(), 1);
        assert_eq!(html.matches("<em>italic</em>").count(), 1);
    }

    #[test]
    fn test_underscore_variants() {
        assert_eq!(
            render("__tebal__ dan _miring_"),
            "<p><strong>tebal</strong> dan <em>miring</em></p>"
        );
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            render("**a** x **b**"),
            "<p><strong>a</strong> x <strong>b</strong></p>"
        );
    }

    #[test]
    fn test_snake_case_not_italicized() {
        assert_eq!(render("use snake_case_names"), "<p>use snake_case_names</p>");
    }

    #[test]
    fn test_spaced_asterisks_not_italicized() {
        assert_eq!(render("2 * 3 * 4"), "<p>2 * 3 * 4</p>");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("Lihat [katalog](/products)"),
            "<p>Lihat <a href=\"/products\" class=\"text-primary-600 hover:underline\">katalog</a></p>"
        );
    }

    #[test]
    fn test_link_with_bold_text() {
        let html = render("[**Pesan**](https://wa.me/62812)");
        assert!(html.contains("<a href=\"https://wa.me/62812\""));
        assert!(html.contains("><strong>Pesan</strong></a>"));
    }

    // ------------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------------

    #[test]
    fn test_unordered_list() {
        let html = render("- a\n- b\n- c");
        assert_eq!(html, "<ul><li>a</li><li>b</li><li>c</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_unordered_markers_merge() {
        assert_eq!(
            render("- a\n* b\n+ c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            render("1. Pilih bahan\n2. Kirim desain\n10. Produksi"),
            "<ol><li>Pilih bahan</li><li>Kirim desain</li><li>Produksi</li></ol>"
        );
    }

    #[test]
    fn test_list_then_paragraph() {
        let html = render("- a\n- b\n\nParagraph text");
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>\n<p>Paragraph text</p>");
        let list_end = html.find("</ul>").unwrap();
        let para_start = html.find("<p>").unwrap();
        assert!(list_end < para_start);
    }

    #[test]
    fn test_list_then_paragraph_without_blank_line() {
        assert_eq!(
            render("- a\n- b\nParagraph text"),
            "<ul><li>a</li><li>b</li></ul>\n<p>Paragraph text</p>"
        );
    }

    #[test]
    fn test_paragraph_then_list_without_blank_line() {
        assert_eq!(
            render("Keunggulan:\n- awet\n- murah"),
            "<p>Keunggulan:</p>\n<ul><li>awet</li><li>murah</li></ul>"
        );
    }

    #[test]
    fn test_list_type_switch_closes_and_reopens() {
        assert_eq!(
            render("- a\n1. b\n- c"),
            "<ul><li>a</li></ul>\n<ol><li>b</li></ol>\n<ul><li>c</li></ul>"
        );
    }

    #[test]
    fn test_lists_separated_by_blank_line_stay_separate() {
        assert_eq!(
            render("- a\n\n- b"),
            "<ul><li>a</li></ul>\n<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_bullet_with_inline_emphasis() {
        assert_eq!(
            render("* item with *emph*"),
            "<ul><li>item with <em>emph</em></li></ul>"
        );
    }

    #[test]
    fn test_nested_list_passes_through_as_text() {
        let html = render("- a\n  - nested");
        assert!(html.starts_with("<ul><li>a</li></ul>"));
        assert!(html.contains("- nested"));
    }

    #[test]
    fn test_horizontal_rule_dashes_not_a_list() {
        assert_eq!(render("---"), "<p>---</p>");
    }

    // ------------------------------------------------------------------------
    // Paragraphs and breaks
    // ------------------------------------------------------------------------

    #[test]
    fn test_single_paragraph_wrapper() {
        let html = render("Kaos **katun** _combed_ 30s");
        assert_eq!(html.matches("<p>").count(), 1);
        assert_eq!(html, "<p>Kaos <strong>katun</strong> <em>combed</em> 30s</p>");
    }

    #[test]
    fn test_multiple_paragraphs() {
        assert_eq!(render("one\n\n\n\ntwo"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn test_whitespace_only_line_separates_paragraphs() {
        assert_eq!(render("one\n   \ntwo"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn test_line_break_inside_paragraph() {
        assert_eq!(render("line1\nline2"), "<p>line1<br>line2</p>");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(render("one\r\n\r\ntwo\r\nthree"), "<p>one</p>\n<p>two<br>three</p>");
    }

    #[test]
    fn test_existing_block_tag_not_wrapped() {
        assert_eq!(
            render("<div class=\"promo\">Diskon</div>"),
            "<div class=\"promo\">Diskon</div>"
        );
    }

    #[test]
    fn test_excess_breaks_collapse() {
        assert_eq!(render("a<br><br><br><br>b"), "<p>a<br><br>b</p>");
    }

    #[test]
    fn test_unsupported_syntax_passes_through() {
        let html = render("```\nlet x = 1;\n```\n\n> quote\n\n| a | b |");
        assert!(html.contains("```<br>let x = 1;<br>```"));
        assert!(html.contains("<p>> quote</p>"));
        assert!(html.contains("<p>| a | b |</p>"));
    }

    #[test]
    fn test_full_document() {
        let input = "# Tentang Kami\n\nKami adalah **konveksi** di Bandung.\n\n## Layanan\n\n- Sablon\n- Bordir\n\nHubungi [kami](/contact).";
        let expected = "<h1>Tentang Kami</h1>\n\
             <p>Kami adalah <strong>konveksi</strong> di Bandung.</p>\n\
             <h2>Layanan</h2>\n\
             <ul><li>Sablon</li><li>Bordir</li></ul>\n\
             <p>Hubungi <a href=\"/contact\" class=\"text-primary-600 hover:underline\">kami</a>.</p>";
        assert_eq!(render(input), expected);
    }
}
