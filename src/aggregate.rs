use crate::comparators::{content, placement};
use crate::results::{ComparisonResult, PageSnapshot, ScoreBreakdown};
use crate::utils::round_score;
use std::thread;

/// Share of the content score in the overall score
pub const CONTENT_SHARE: f64 = 0.6;

/// Share of the placement score in the overall score
pub const PLACEMENT_SHARE: f64 = 0.4;

/// Compare two snapshots and combine the content and placement scores
///
/// The two comparators only read the snapshots, so they run side by side on
/// scoped threads.
pub fn compare(pre_go_live: &PageSnapshot, current: &PageSnapshot) -> ComparisonResult {
    let (content, placement) = thread::scope(|scope| {
        let content = scope.spawn(|| content::compare(pre_go_live, current));
        let placement = placement::compare(pre_go_live, current);
        let content = content
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (content, placement)
    });

    let overall_score = overall_score(content.score, placement.score);
    ::log::debug!(
        "Scores: content {}%, placement {}%, overall {}%",
        content.score,
        placement.score,
        overall_score
    );

    ComparisonResult {
        overall_score,
        content_score: content.score,
        placement_score: placement.score,
        details: details(pre_go_live, current),
        breakdown: ScoreBreakdown {
            title: content.title,
            text_content: content.text_content,
            structure: content.structure,
            metadata: content.metadata,
            positioning: placement.positioning,
            layout: placement.layout,
            hierarchy: placement.hierarchy,
            styling: placement.styling,
        },
        pre_go_live: pre_go_live.clone(),
        current: current.clone(),
    }
}

pub fn overall_score(content_score: u8, placement_score: u8) -> u8 {
    round_score(
        CONTENT_SHARE * f64::from(content_score) + PLACEMENT_SHARE * f64::from(placement_score),
    )
}

/// Diagnostic listing of both pages; plays no part in scoring
pub fn details(pre_go_live: &PageSnapshot, current: &PageSnapshot) -> String {
    [
        format!("Pre-Go-Live URL: {}", pre_go_live.url),
        format!("Current URL: {}", current.url),
        format!("Pre-Go-Live Title: {}", pre_go_live.title),
        format!("Current Title: {}", current.title),
        format!("Pre-Go-Live Elements: {}", pre_go_live.elements.len()),
        format!("Current Elements: {}", current.elements.len()),
        format!("Pre-Go-Live Text Blocks: {}", pre_go_live.text_blocks.len()),
        format!("Current Text Blocks: {}", current.text_blocks.len()),
    ]
    .join("\n")
}

/// Human-readable report of a result against a threshold
pub fn summary(result: &ComparisonResult, threshold: u8) -> String {
    let b = &result.breakdown;
    let lines = [
        format!("Overall Match: {}%", result.overall_score),
        format!("Content Match: {}%", result.content_score),
        format!("Placement Match: {}%", result.placement_score),
        format!("Threshold: {}%", threshold),
        format!("Result: {}", result.verdict(threshold)),
        String::new(),
        "Content factors:".to_string(),
        format!("  Title similarity: {}%", b.title),
        format!("  Text content similarity: {}%", b.text_content),
        format!("  Structure similarity: {}%", b.structure),
        format!("  Metadata similarity: {}%", b.metadata),
        "Placement factors:".to_string(),
        format!("  Element positioning: {}%", b.positioning),
        format!("  Layout structure: {}%", b.layout),
        format!("  Visual hierarchy: {}%", b.hierarchy),
        format!("  Styling differences: {}%", b.styling),
        String::new(),
        "Details:".to_string(),
        result.details.clone(),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::pattern;
    use crate::results::Verdict;

    const GOLDEN_PAGE: &str = "<title>Hi</title><h1>Welcome</h1><p>Short text here</p>";

    #[test]
    fn test_overall_score_weights() {
        assert_eq!(overall_score(100, 100), 100);
        assert_eq!(overall_score(0, 0), 0);
        assert_eq!(overall_score(26, 29), 27);
        assert_eq!(overall_score(100, 0), 60);
        assert_eq!(overall_score(0, 100), 40);
    }

    #[test]
    fn test_identical_documents_score_100() {
        let a = pattern::extract(GOLDEN_PAGE, "https://pre.example.com").unwrap();
        let b = pattern::extract(GOLDEN_PAGE, "https://example.com").unwrap();
        let result = compare(&a, &b);
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.content_score, 100);
        assert_eq!(result.placement_score, 100);
    }

    #[test]
    fn test_empty_snapshots_score_100() {
        let result = compare(&PageSnapshot::empty("a"), &PageSnapshot::empty("b"));
        assert_eq!(result.overall_score, 100);
        assert_eq!(
            result.breakdown,
            ScoreBreakdown {
                title: 100,
                text_content: 100,
                structure: 100,
                metadata: 100,
                positioning: 100,
                layout: 100,
                hierarchy: 100,
                styling: 100,
            }
        );
    }

    #[test]
    fn test_page_against_empty_document() {
        let a = pattern::extract(GOLDEN_PAGE, "a").unwrap();
        let b = pattern::extract("", "b").unwrap();
        assert_eq!(b, PageSnapshot::empty("b"));

        let result = compare(&a, &b);
        let f = result.breakdown;
        assert_eq!(f.title, 0);
        assert_eq!(f.text_content, 0);
        assert_eq!(f.positioning, 0);
        assert_eq!(f.hierarchy, 0);
        // Headings and paragraphs are one-sided; links, images and lists are both empty.
        assert_eq!(f.structure, 45);
        // Only the title differs; empty description/keywords/viewport are equal.
        assert_eq!(f.metadata, 60);
        assert_eq!(f.layout, 55);
        assert_eq!(f.styling, 100);

        assert_eq!(result.content_score, 26);
        assert_eq!(result.placement_score, 29);
        assert_eq!(result.overall_score, 27);
        assert!(result.content_score < 100 && result.placement_score < 100);
    }

    #[test]
    fn test_threshold_boundary_passes() {
        let a = pattern::extract(GOLDEN_PAGE, "a").unwrap();
        let b = pattern::extract("", "b").unwrap();
        let result = compare(&a, &b);
        assert_eq!(result.verdict(result.overall_score), Verdict::Pass);
        assert_eq!(result.verdict(result.overall_score + 1), Verdict::Fail);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let pages = [
            "",
            GOLDEN_PAGE,
            "<ul><li>a</li></ul><img alt=x><p style='display:grid' class=c>Para</p>",
            "<h6>Deep</h6><h1>Top</h1><a href=#>Link text</a><section>Side</section>",
        ];
        for a in pages {
            for b in pages {
                let result = compare(
                    &pattern::extract(a, "a").unwrap(),
                    &pattern::extract(b, "b").unwrap(),
                );
                assert!(result.overall_score <= 100);
                assert!(result.content_score <= 100);
                assert!(result.placement_score <= 100);
            }
        }
    }

    #[test]
    fn test_details_listing() {
        let a = pattern::extract(GOLDEN_PAGE, "https://pre.example.com").unwrap();
        let b = PageSnapshot::empty("https://example.com");
        let details = details(&a, &b);
        let lines: Vec<&str> = details.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Pre-Go-Live URL: https://pre.example.com");
        assert_eq!(lines[2], "Pre-Go-Live Title: Hi");
        assert_eq!(lines[4], "Pre-Go-Live Elements: 3");
        assert_eq!(lines[7], "Current Text Blocks: 0");
    }

    #[test]
    fn test_summary_mentions_verdict() {
        let result = compare(&PageSnapshot::empty("a"), &PageSnapshot::empty("b"));
        let text = summary(&result, 90);
        assert!(text.contains("Overall Match: 100%"));
        assert!(text.contains("Result: PASS"));
    }
}
