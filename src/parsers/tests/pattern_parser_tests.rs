use super::SAMPLE_PAGE;
use crate::parsers::pattern;
use crate::results::ListKind;

#[cfg(test)]
mod head_tests {
    use super::*;

    #[test]
    fn test_title_and_metadata() {
        let snapshot = pattern::extract(SAMPLE_PAGE, "https://example.com").unwrap();
        assert_eq!(snapshot.url, "https://example.com");
        assert_eq!(snapshot.title, "Example Page");
        assert_eq!(snapshot.metadata.title, "Example Page");
        assert_eq!(snapshot.metadata.description, "A sample page");
        assert_eq!(snapshot.metadata.keywords, "sample, test");
        assert_eq!(snapshot.metadata.viewport, "width=device-width");
        assert_eq!(snapshot.metadata.charset, "utf-8");
    }

    #[test]
    fn test_single_quoted_meta() {
        let html = "<meta name='description' content='Single quoted'>";
        let snapshot = pattern::extract(html, "u").unwrap();
        assert_eq!(snapshot.metadata.description, "Single quoted");
    }

    #[test]
    fn test_missing_head_is_empty() {
        let snapshot = pattern::extract("<p>Body only</p>", "u").unwrap();
        assert_eq!(snapshot.title, "");
        assert_eq!(snapshot.metadata.description, "");
        assert_eq!(snapshot.metadata.charset, "");
    }

    #[test]
    fn test_title_inside_script_is_still_found() {
        // The title is read from the unmodified document, before stripping.
        let html = "<script>document.write('<title>From script</title>')</script>";
        let snapshot = pattern::extract(html, "u").unwrap();
        assert_eq!(snapshot.title, "From script");
        assert!(snapshot.elements.is_empty());
    }

    #[test]
    fn test_each_script_and_style_is_stripped_on_its_own() {
        let html = "<SCRIPT type=x>'<p>js1</p>'</SCRIPT><p>Keep this one</p>\
                    <script>'<p>js2</p>'</script>\
                    <STYLE>.a::before { content: '<p>css1</p>' }</STYLE><p>Also kept</p>\
                    <style>.b::after { content: '<p>css2</p>' }</style>";
        let snapshot = pattern::extract(html, "u").unwrap();

        let paragraphs: Vec<&str> = snapshot
            .structure
            .paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(paragraphs, vec!["Keep this one", "Also kept"]);

        let tags: Vec<&str> = snapshot.elements.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["p", "p"]);
    }
}

#[cfg(test)]
mod text_block_tests {
    use super::*;

    #[test]
    fn test_blocks_follow_tag_scan_order() {
        let snapshot = pattern::extract(SAMPLE_PAGE, "u").unwrap();
        let blocks: Vec<(&str, &str)> = snapshot
            .text_blocks
            .iter()
            .map(|b| (b.tag.as_str(), b.text.as_str()))
            .collect();
        assert_eq!(
            blocks,
            vec![
                ("h1", "Welcome Home"),
                ("p", "Intro paragraph"),
                ("div", "Box text"),
                ("a", "About us"),
                ("li", "Two items"),
            ]
        );
    }

    #[test]
    fn test_short_blocks_are_dropped() {
        let snapshot = pattern::extract("<p>abc</p><p>abcd</p><p>   ab   </p>", "u").unwrap();
        assert_eq!(snapshot.text_blocks.len(), 1);
        assert_eq!(snapshot.text_blocks[0].text, "abcd");
    }

    #[test]
    fn test_scan_order_is_not_document_order() {
        let snapshot = pattern::extract("<p>Para first</p><h3>Heading later</h3>", "u").unwrap();
        assert_eq!(snapshot.text_blocks[0].tag, "h3");
        assert_eq!(snapshot.text_blocks[1].tag, "p");
    }

    #[test]
    fn test_tags_are_case_insensitive() {
        let snapshot = pattern::extract("<P CLASS=\"x\">Upper case</P>", "u").unwrap();
        assert_eq!(snapshot.text_blocks[0].tag, "p");
        assert_eq!(snapshot.structure.paragraphs[0].text, "Upper case");
        assert_eq!(snapshot.structure.paragraphs[0].attrs.class.as_deref(), Some("x"));
    }
}

#[cfg(test)]
mod element_tests {
    use super::*;

    #[test]
    fn test_elements_of_sample_page() {
        let snapshot = pattern::extract(SAMPLE_PAGE, "u").unwrap();
        let tags: Vec<&str> = snapshot.elements.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(
            tags,
            vec!["title", "h1", "h2", "p", "div", "a", "li", "li", "b"]
        );
        assert!(snapshot.elements.iter().all(|e| e.position.width == 0));
    }

    #[test]
    fn test_element_text_is_truncated() {
        let long = "x".repeat(150);
        let html = format!("<span>{long}</span>");
        let snapshot = pattern::extract(&html, "u").unwrap();
        assert_eq!(snapshot.elements[0].text.chars().count(), 100);
    }

    #[test]
    fn test_mismatched_close_tag_is_skipped() {
        let snapshot = pattern::extract("<em>loose</strong><i>ok</i>", "u").unwrap();
        assert_eq!(snapshot.elements.len(), 1);
        assert_eq!(snapshot.elements[0].tag, "i");
    }

    #[test]
    fn test_close_tag_naming_a_prefix_matches() {
        let snapshot = pattern::extract("<span>short</sp>", "u").unwrap();
        assert_eq!(snapshot.elements.len(), 1);
        assert_eq!(snapshot.elements[0].tag, "sp");
    }

    #[test]
    fn test_whitespace_only_elements_are_ignored() {
        let snapshot = pattern::extract("<b>   </b>", "u").unwrap();
        assert!(snapshot.elements.is_empty());
    }
}

#[cfg(test)]
mod structure_tests {
    use super::*;

    #[test]
    fn test_structure_of_sample_page() {
        let snapshot = pattern::extract(SAMPLE_PAGE, "u").unwrap();
        let s = &snapshot.structure;

        assert_eq!(s.headings.len(), 2);
        assert_eq!(s.headings[0].level, 1);
        assert_eq!(s.headings[0].text, "Welcome Home");
        assert_eq!(s.headings[0].attrs.class.as_deref(), Some("hero"));
        assert_eq!(s.headings[1].level, 2);

        // The nested paragraph defeats the pattern; the scripted one was stripped.
        assert_eq!(s.paragraphs.len(), 1);
        assert_eq!(s.paragraphs[0].attrs.id.as_deref(), Some("intro"));
        assert_eq!(s.paragraphs[0].attrs.style.as_deref(), Some("margin: 0"));

        assert_eq!(s.links.len(), 1);
        assert_eq!(s.links[0].href, "/about");

        assert_eq!(s.images.len(), 1);
        assert_eq!(s.images[0].alt, "Logo");
        assert_eq!(s.images[0].src, "/logo.png");

        assert_eq!(s.lists.len(), 1);
        assert_eq!(s.lists[0].kind, ListKind::Ul);
        assert_eq!(s.lists[0].items, vec!["One", "Two items"]);
        assert_eq!(s.lists[0].attrs.class.as_deref(), Some("nav"));

        assert_eq!(s.containers.len(), 1);
        assert_eq!(s.containers[0].tag, "div");
    }

    #[test]
    fn test_lists_in_document_order() {
        let html = "<ol><li>A1</li><li>B2</li></ol><UL><li>C3</li></UL>";
        let snapshot = pattern::extract(html, "u").unwrap();
        let kinds: Vec<ListKind> = snapshot.structure.lists.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![ListKind::Ol, ListKind::Ul]);
        assert_eq!(snapshot.structure.lists[1].items, vec!["C3"]);
    }

    #[test]
    fn test_unclosed_list_is_ignored() {
        let snapshot = pattern::extract("<ul><li>dangling</li>", "u").unwrap();
        assert!(snapshot.structure.lists.is_empty());
    }

    #[test]
    fn test_self_nested_container_counts_inner_only() {
        let snapshot = pattern::extract("<div><div>Inner</div></div>", "u").unwrap();
        assert_eq!(snapshot.structure.containers.len(), 1);
    }

    #[test]
    fn test_empty_attribute_is_absent() {
        let snapshot = pattern::extract("<h2 class=\"\" id=main>Plain</h2>", "u").unwrap();
        let attrs = &snapshot.structure.headings[0].attrs;
        assert_eq!(attrs.class, None);
        assert_eq!(attrs.id.as_deref(), Some("main"));
    }

    #[test]
    fn test_prefixed_attribute_names_are_not_confused() {
        let snapshot = pattern::extract("<p data-class=\"fake\">Text here</p>", "u").unwrap();
        assert_eq!(snapshot.structure.paragraphs[0].attrs.class, None);
    }

    #[test]
    fn test_empty_document() {
        let snapshot = pattern::extract("", "empty").unwrap();
        assert_eq!(snapshot, crate::results::PageSnapshot::empty("empty"));
    }
}

#[cfg(test)]
mod minimal_tests {
    use super::*;

    #[test]
    fn test_minimal_snapshot_keeps_head_and_blocks() {
        let snapshot = pattern::extract_minimal(SAMPLE_PAGE, "u");
        assert_eq!(snapshot.title, "Example Page");
        assert_eq!(snapshot.metadata.description, "A sample page");
        assert_eq!(snapshot.text_blocks.len(), 5);
        assert!(snapshot.elements.is_empty());
        assert!(snapshot.structure.headings.is_empty());
        assert!(snapshot.structure.images.is_empty());
    }
}
