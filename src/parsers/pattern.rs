use crate::error::ExtractError;
use crate::results::{
    Container, Element, ElementAttrs, Heading, Image, Link, List, ListKind, Metadata,
    PageSnapshot, Paragraph, Position, Structure, TextBlock,
};
use crate::utils::truncate_chars;
use regex::Regex;
use std::sync::LazyLock;

/// Tags whose text runs become text blocks, in scan order
pub const TEXT_BLOCK_TAGS: [&str; 11] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "div", "a", "li",
];

/// Container tags recorded in the structure
pub const CONTAINER_TAGS: [&str; 7] = [
    "div", "section", "article", "main", "aside", "header", "footer",
];

/// Text blocks must be longer than this many characters after trimming
pub const MIN_TEXT_BLOCK_CHARS: usize = 3;

/// Element text is truncated to this many characters
pub const MAX_ELEMENT_TEXT_CHARS: usize = 100;

/// Patterns run against the unmodified document
struct HeadPatterns {
    script: Regex,
    style: Regex,
    title: Regex,
    description: Regex,
    keywords: Regex,
    viewport: Regex,
    charset: Regex,
}

/// Patterns run against the script/style-stripped working copy
struct BodyPatterns {
    text_blocks: Vec<(&'static str, Regex)>,
    headings: Vec<(u8, Regex)>,
    paragraph: Regex,
    link: Regex,
    image: Regex,
    list_open: Regex,
    list_item: Regex,
    ul_close: Regex,
    ol_close: Regex,
    container: Regex,
    element: Regex,
    attribute: Regex,
}

static HEAD: LazyLock<Result<HeadPatterns, regex::Error>> = LazyLock::new(HeadPatterns::compile);
static BODY: LazyLock<Result<BodyPatterns, regex::Error>> = LazyLock::new(BodyPatterns::compile);

fn head_patterns() -> Result<&'static HeadPatterns, ExtractError> {
    HEAD.as_ref().map_err(|e| ExtractError::Pattern(e.clone()))
}

fn body_patterns() -> Result<&'static BodyPatterns, ExtractError> {
    BODY.as_ref().map_err(|e| ExtractError::Pattern(e.clone()))
}

/// `<tag ...>text</tag>` for a fixed tag name, capturing attributes and text
fn text_tag_pattern(tag: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)<{tag}([^>]*)>([^<]+)</{tag}>"))
}

fn meta_name_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"(?i)<meta[^>]*name=["']{name}["'][^>]*content=["']([^"']+)["']"#
    ))
}

impl HeadPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            script: Regex::new(r"(?is)<script[^>]*>.*?</script>")?,
            style: Regex::new(r"(?is)<style[^>]*>.*?</style>")?,
            title: Regex::new(r"(?i)<title[^>]*>([^<]+)</title>")?,
            description: meta_name_pattern("description")?,
            keywords: meta_name_pattern("keywords")?,
            viewport: meta_name_pattern("viewport")?,
            charset: Regex::new(r#"(?i)<meta[^>]*charset=["']([^"']+)["']"#)?,
        })
    }

    fn title(&self, html: &str) -> String {
        first_capture(&self.title, html)
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }

    fn metadata(&self, html: &str, title: &str) -> Metadata {
        let value = |re: &Regex| first_capture(re, html).unwrap_or_default().to_string();
        Metadata {
            title: title.to_string(),
            description: value(&self.description),
            keywords: value(&self.keywords),
            viewport: value(&self.viewport),
            charset: value(&self.charset),
        }
    }

    fn strip_scripts_and_styles(&self, html: &str) -> String {
        let without_scripts = self.script.replace_all(html, "");
        self.style.replace_all(&without_scripts, "").into_owned()
    }
}

impl BodyPatterns {
    fn compile() -> Result<Self, regex::Error> {
        let text_blocks = TEXT_BLOCK_TAGS
            .iter()
            .map(|tag| text_tag_pattern(tag).map(|re| (*tag, re)))
            .collect::<Result<Vec<_>, _>>()?;
        let headings = (1..=6u8)
            .map(|level| text_tag_pattern(&format!("h{level}")).map(|re| (level, re)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            text_blocks,
            headings,
            paragraph: text_tag_pattern("p")?,
            link: text_tag_pattern("a")?,
            image: Regex::new(r"(?i)<img([^>]*)>")?,
            list_open: Regex::new(r"(?i)<(ul|ol)([^>]*)>")?,
            list_item: text_tag_pattern("li")?,
            ul_close: Regex::new(r"(?i)</ul>")?,
            ol_close: Regex::new(r"(?i)</ol>")?,
            container: Regex::new(&format!(
                r"(?i)<({})([^>]*)>([^<]+)</([A-Za-z0-9_]+)>",
                CONTAINER_TAGS.join("|")
            ))?,
            element: Regex::new(r"<([A-Za-z0-9_]+)([^>]*)>([^<]+)</([A-Za-z0-9_]+)>")?,
            attribute: Regex::new(
                r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#,
            )?,
        })
    }

    fn text_blocks(&self, html: &str) -> Vec<TextBlock> {
        let mut blocks = Vec::new();
        for (tag, re) in &self.text_blocks {
            for caps in re.captures_iter(html) {
                let text = caps[2].trim();
                if text.chars().count() > MIN_TEXT_BLOCK_CHARS {
                    blocks.push(TextBlock {
                        text: text.to_string(),
                        tag: (*tag).to_string(),
                    });
                }
            }
        }
        blocks
    }

    /// Every `<name ...>text</name>` in the document
    ///
    /// The close tag may name a prefix of the open tag (`<span>x</sp>`); the
    /// shorter name is then the element's tag. A mismatched pair restarts the
    /// scan one character after the failed opening `<`.
    fn elements(&self, html: &str) -> Vec<Element> {
        let mut elements = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.element.captures_at(html, pos) {
            let whole = caps.get(0).map_or(pos..html.len(), |m| m.range());
            let open = caps[1].to_ascii_lowercase();
            let close = caps[4].to_ascii_lowercase();

            if !open.starts_with(&close) {
                pos = whole.start + 1;
                continue;
            }

            let text = caps[3].trim();
            if !text.is_empty() {
                elements.push(Element {
                    tag: close,
                    text: truncate_chars(text, MAX_ELEMENT_TEXT_CHARS),
                    position: Position::default(),
                });
            }
            pos = whole.end;
        }

        elements
    }

    fn structure(&self, html: &str) -> Structure {
        Structure {
            headings: self.headings(html),
            paragraphs: self
                .paragraph
                .captures_iter(html)
                .map(|caps| Paragraph {
                    text: caps[2].trim().to_string(),
                    attrs: self.element_attrs(&caps[1]),
                })
                .collect(),
            links: self
                .link
                .captures_iter(html)
                .map(|caps| Link {
                    text: caps[2].trim().to_string(),
                    href: self.attribute(&caps[1], "href").unwrap_or_default(),
                    attrs: self.element_attrs(&caps[1]),
                })
                .collect(),
            images: self
                .image
                .captures_iter(html)
                .map(|caps| Image {
                    src: self.attribute(&caps[1], "src").unwrap_or_default(),
                    alt: self.attribute(&caps[1], "alt").unwrap_or_default(),
                    attrs: self.element_attrs(&caps[1]),
                })
                .collect(),
            lists: self.lists(html),
            containers: self.containers(html),
        }
    }

    fn headings(&self, html: &str) -> Vec<Heading> {
        let mut headings = Vec::new();
        for (level, re) in &self.headings {
            for caps in re.captures_iter(html) {
                headings.push(Heading {
                    level: *level,
                    text: caps[2].trim().to_string(),
                    attrs: self.element_attrs(&caps[1]),
                });
            }
        }
        headings
    }

    /// `<ul>`/`<ol>` bodies up to the first matching close tag
    fn lists(&self, html: &str) -> Vec<List> {
        let mut lists = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.list_open.captures_at(html, pos) {
            let Some(open) = caps.get(0) else { break };
            let Some(kind) = ListKind::from_tag(&caps[1]) else {
                pos = open.start() + 1;
                continue;
            };
            let close_re = match kind {
                ListKind::Ul => &self.ul_close,
                ListKind::Ol => &self.ol_close,
            };

            match close_re.find_at(html, open.end()) {
                Some(close) => {
                    let body = &html[open.end()..close.start()];
                    lists.push(List {
                        kind,
                        items: self
                            .list_item
                            .captures_iter(body)
                            .map(|item| item[2].trim().to_string())
                            .collect(),
                        attrs: self.element_attrs(&caps[2]),
                    });
                    pos = close.end();
                }
                None => pos = open.start() + 1,
            }
        }

        lists
    }

    fn containers(&self, html: &str) -> Vec<Container> {
        let mut containers = Vec::new();
        let mut pos = 0;

        while let Some(caps) = self.container.captures_at(html, pos) {
            let whole = caps.get(0).map_or(pos..html.len(), |m| m.range());
            if !caps[1].eq_ignore_ascii_case(&caps[4]) {
                pos = whole.start + 1;
                continue;
            }
            containers.push(Container {
                tag: caps[1].to_ascii_lowercase(),
                attrs: self.element_attrs(&caps[2]),
            });
            pos = whole.end;
        }

        containers
    }

    /// Value of a named attribute in the raw attribute text of an opening tag
    fn attribute(&self, raw: &str, name: &str) -> Option<String> {
        self.attribute
            .captures_iter(raw)
            .find(|caps| caps[1].eq_ignore_ascii_case(name))
            .and_then(|caps| {
                caps.get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str().to_string())
            })
    }

    fn element_attrs(&self, raw: &str) -> ElementAttrs {
        let non_empty = |name: &str| self.attribute(raw, name).filter(|v| !v.trim().is_empty());
        ElementAttrs {
            class: non_empty("class"),
            id: non_empty("id"),
            style: non_empty("style"),
        }
    }
}

fn first_capture<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Builds a full snapshot from raw HTML by tag-pattern scanning
///
/// This is not an HTML parser. Each tag family is scanned on its own: an
/// opening tag, a run of text containing no `<`, then the closing tag of the
/// same name. Nested markup never matches.
///
/// Patterns are compiled once. A compile failure is reported as an
/// [`ExtractError`] so the caller can fall back to a minimal snapshot.
pub fn extract(html: &str, url: &str) -> Result<PageSnapshot, ExtractError> {
    let head = head_patterns()?;
    let body = body_patterns()?;

    // Title and metadata come from the untouched document.
    let title = head.title(html);
    let metadata = head.metadata(html, &title);
    let clean = head.strip_scripts_and_styles(html);

    Ok(PageSnapshot {
        url: url.to_string(),
        title,
        text_blocks: body.text_blocks(&clean),
        elements: body.elements(&clean),
        structure: body.structure(&clean),
        metadata,
    })
}

/// Best-effort snapshot with title, metadata and text blocks only
pub fn extract_minimal(html: &str, url: &str) -> PageSnapshot {
    let mut snapshot = PageSnapshot::empty(url);

    if let Ok(head) = head_patterns() {
        snapshot.title = head.title(html);
        snapshot.metadata = head.metadata(html, &snapshot.title);
        if let Ok(body) = body_patterns() {
            snapshot.text_blocks = body.text_blocks(&head.strip_scripts_and_styles(html));
        }
    }

    snapshot
}
