use crate::similarity::HasText;
use serde::{Deserialize, Serialize};

/// Structured extraction result for one HTML document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Source identifier of the page
    pub url: String,

    /// Page title (empty if none was found)
    pub title: String,

    /// Text runs found in recognized inline/block tags
    pub text_blocks: Vec<TextBlock>,

    /// Flat list of text-only elements
    pub elements: Vec<Element>,

    /// Categorized structure of the page
    pub structure: Structure,

    /// Document metadata from the head
    pub metadata: Metadata,
}

impl PageSnapshot {
    /// Create an empty snapshot for the given URL
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }
}

/// A run of page text and the tag it was found in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Trimmed text content
    pub text: String,

    /// Lowercase tag name
    pub tag: String,
}

/// An element whose only content is text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,

    /// Trimmed text, truncated to 100 characters
    pub text: String,

    /// Always zeroed
    pub position: Position,
}

/// Placeholder geometry; layout is never rendered so this stays zeroed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Identity and inline style attributes read from an opening tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementAttrs {
    /// Class attribute (if present and non-empty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Id attribute (if present and non-empty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Inline style text (if present and non-empty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ElementAttrs {
    /// Two elements correspond when they share a class or an id
    pub fn matches(&self, other: &ElementAttrs) -> bool {
        let same = |a: &Option<String>, b: &Option<String>| matches!((a, b), (Some(x), Some(y)) if x == y);
        same(&self.class, &other.class) || same(&self.id, &other.id)
    }

    /// Inline style text, lowercased; empty when absent
    pub fn style_lowercase(&self) -> String {
        self.style.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// Page entities grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Headings h1 to h6, grouped by level
    pub headings: Vec<Heading>,

    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,

    /// Anchors in document order
    pub links: Vec<Link>,

    /// Images in document order
    pub images: Vec<Image>,

    /// Unordered and ordered lists
    pub lists: Vec<List>,

    /// Layout containers holding only text
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1 to 6
    pub level: u8,

    /// Trimmed heading text
    pub text: String,

    #[serde(flatten)]
    pub attrs: ElementAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    #[serde(flatten)]
    pub attrs: ElementAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Trimmed anchor text
    pub text: String,

    /// Link target (empty if absent)
    pub href: String,

    #[serde(flatten)]
    pub attrs: ElementAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image source (empty if absent)
    pub src: String,

    /// Alternative text (empty if absent)
    pub alt: String,

    #[serde(flatten)]
    pub attrs: ElementAttrs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ul,
    Ol,
}

impl ListKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "ul" => Some(ListKind::Ul),
            "ol" => Some(ListKind::Ol),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Unordered or ordered
    #[serde(rename = "type")]
    pub kind: ListKind,

    /// Trimmed text of each list item
    pub items: Vec<String>,

    #[serde(flatten)]
    pub attrs: ElementAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub tag: String,
    #[serde(flatten)]
    pub attrs: ElementAttrs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub viewport: String,
    pub charset: String,
}

impl HasText for TextBlock {
    fn text(&self) -> &str {
        &self.text
    }
}

impl HasText for Heading {
    fn text(&self) -> &str {
        &self.text
    }
}

impl HasText for Paragraph {
    fn text(&self) -> &str {
        &self.text
    }
}

impl HasText for Link {
    fn text(&self) -> &str {
        &self.text
    }
}

// Images are compared by their alternative text.
impl HasText for Image {
    fn text(&self) -> &str {
        &self.alt
    }
}

/// Gives uniform access to the identity attributes of structure entries
pub trait Styled {
    fn attrs(&self) -> &ElementAttrs;
}

macro_rules! impl_styled {
    ($($ty:ty),*) => {
        $(impl Styled for $ty {
            fn attrs(&self) -> &ElementAttrs {
                &self.attrs
            }
        })*
    };
}

impl_styled!(Heading, Paragraph, Link, Image, List, Container);

/// Every sub-score that feeds the content and placement scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub title: u8,
    pub text_content: u8,
    pub structure: u8,
    pub metadata: u8,
    pub positioning: u8,
    pub layout: u8,
    pub hierarchy: u8,
    pub styling: u8,
}

/// Outcome of comparing a pre-go-live page with its current counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub overall_score: u8,
    pub content_score: u8,
    pub placement_score: u8,

    /// Human-readable diagnostic listing, one fact per line
    pub details: String,

    pub breakdown: ScoreBreakdown,

    pub pre_go_live: PageSnapshot,
    pub current: PageSnapshot,
}

impl ComparisonResult {
    /// Classify the overall score against a pass threshold
    pub fn verdict(&self, threshold: u8) -> Verdict {
        Verdict::from_score(self.overall_score, threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_score(score: u8, threshold: u8) -> Self {
        if score >= threshold {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}
