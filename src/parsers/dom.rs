use crate::error::ExtractError;
use crate::parsers::pattern::{
    CONTAINER_TAGS, MAX_ELEMENT_TEXT_CHARS, MIN_TEXT_BLOCK_CHARS, TEXT_BLOCK_TAGS,
};
use crate::results::{
    Container, Element, ElementAttrs, Heading, Image, Link, List, ListKind, Metadata,
    PageSnapshot, Paragraph, Position, Structure, TextBlock,
};
use crate::utils::truncate_chars;
use scraper::{ElementRef, Html, Selector};

/// Tags whose text content is never page text
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Span and div blocks are taken only when they hold text and no child elements
const LEAF_ONLY_BLOCK_TAGS: [&str; 2] = ["span", "div"];

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(format!("{css}: {e}")))
}

/// Parses HTML into a tree and builds a snapshot from it
///
/// Produces the same snapshot shape as the pattern extractor. Headings,
/// paragraphs, links and list items use their whole descendant text, so
/// nested inline markup no longer hides content.
pub fn extract(html: &str, url: &str) -> Result<PageSnapshot, ExtractError> {
    let doc = Html::parse_document(html);

    let title = select_first_text(&doc, "title")?;
    let metadata = metadata(&doc, &title)?;

    let snapshot = PageSnapshot {
        url: url.to_string(),
        title,
        text_blocks: text_blocks(&doc)?,
        elements: elements(&doc)?,
        structure: structure(&doc)?,
        metadata,
    };

    ::log::debug!(
        "DOM extractor found {} text blocks and {} elements in {}",
        snapshot.text_blocks.len(),
        snapshot.elements.len(),
        url
    );

    Ok(snapshot)
}

fn select_first_text(doc: &Html, css: &str) -> Result<String, ExtractError> {
    let sel = selector(css)?;
    Ok(doc
        .select(&sel)
        .next()
        .map(|e| normalized_text(&e))
        .unwrap_or_default())
}

fn metadata(doc: &Html, title: &str) -> Result<Metadata, ExtractError> {
    let meta_selector = selector("meta")?;
    let mut metadata = Metadata {
        title: title.to_string(),
        ..Metadata::default()
    };

    for meta in doc.select(&meta_selector) {
        let element = meta.value();
        if metadata.charset.is_empty() {
            if let Some(charset) = element.attr("charset") {
                metadata.charset = charset.to_string();
            }
        }

        let (Some(name), Some(content)) = (element.attr("name"), element.attr("content")) else {
            continue;
        };
        let slot = match name.to_ascii_lowercase().as_str() {
            "description" => &mut metadata.description,
            "keywords" => &mut metadata.keywords,
            "viewport" => &mut metadata.viewport,
            _ => continue,
        };
        if slot.is_empty() {
            *slot = content.to_string();
        }
    }

    Ok(metadata)
}

fn text_blocks(doc: &Html) -> Result<Vec<TextBlock>, ExtractError> {
    let mut blocks = Vec::new();
    for tag in TEXT_BLOCK_TAGS {
        let sel = selector(tag)?;
        let leaf_only = LEAF_ONLY_BLOCK_TAGS.contains(&tag);
        for element in doc.select(&sel) {
            if leaf_only && has_element_children(&element) {
                continue;
            }
            let text = normalized_text(&element);
            if text.chars().count() > MIN_TEXT_BLOCK_CHARS {
                blocks.push(TextBlock {
                    text,
                    tag: tag.to_string(),
                });
            }
        }
    }
    Ok(blocks)
}

/// Leaf elements with text, in document order
fn elements(doc: &Html) -> Result<Vec<Element>, ExtractError> {
    let all = selector("*")?;
    Ok(doc
        .select(&all)
        .filter(|e| !SKIPPED_TAGS.contains(&e.value().name()))
        .filter(|e| !has_element_children(e))
        .filter_map(|e| {
            let text = normalized_text(&e);
            (!text.is_empty()).then(|| Element {
                tag: e.value().name().to_string(),
                text: truncate_chars(&text, MAX_ELEMENT_TEXT_CHARS),
                position: Position::default(),
            })
        })
        .collect())
}

fn structure(doc: &Html) -> Result<Structure, ExtractError> {
    let mut headings = Vec::new();
    for level in 1..=6u8 {
        let sel = selector(&format!("h{level}"))?;
        headings.extend(doc.select(&sel).map(|e| Heading {
            level,
            text: normalized_text(&e),
            attrs: attrs(&e),
        }));
    }

    let paragraph_selector = selector("p")?;
    let link_selector = selector("a")?;
    let image_selector = selector("img")?;
    let list_selector = selector("ul, ol")?;
    let item_selector = selector("li")?;
    let container_selector = selector(&CONTAINER_TAGS.join(", "))?;

    let paragraphs = doc
        .select(&paragraph_selector)
        .map(|e| Paragraph {
            text: normalized_text(&e),
            attrs: attrs(&e),
        })
        .collect();

    let links = doc
        .select(&link_selector)
        .map(|e| Link {
            text: normalized_text(&e),
            href: e.value().attr("href").unwrap_or_default().to_string(),
            attrs: attrs(&e),
        })
        .collect();

    let images = doc
        .select(&image_selector)
        .map(|e| Image {
            src: e.value().attr("src").unwrap_or_default().to_string(),
            alt: e.value().attr("alt").unwrap_or_default().to_string(),
            attrs: attrs(&e),
        })
        .collect();

    let lists = doc
        .select(&list_selector)
        .filter_map(|e| {
            let kind = ListKind::from_tag(e.value().name())?;
            Some(List {
                kind,
                items: e.select(&item_selector).map(|li| normalized_text(&li)).collect(),
                attrs: attrs(&e),
            })
        })
        .collect();

    let containers = doc
        .select(&container_selector)
        .filter(|e| !has_element_children(e) && e.text().next().is_some())
        .map(|e| Container {
            tag: e.value().name().to_string(),
            attrs: attrs(&e),
        })
        .collect();

    Ok(Structure {
        headings,
        paragraphs,
        links,
        images,
        lists,
        containers,
    })
}

fn has_element_children(element: &ElementRef) -> bool {
    element.children().any(|child| child.value().is_element())
}

/// Descendant text with whitespace collapsed to single spaces
fn normalized_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn attrs(element: &ElementRef) -> ElementAttrs {
    let non_empty = |name: &str| {
        element
            .value()
            .attr(name)
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    };
    ElementAttrs {
        class: non_empty("class"),
        id: non_empty("id"),
        style: non_empty("style"),
    }
}
