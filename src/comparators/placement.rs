use crate::results::{Element, Heading, PageSnapshot, Structure, Styled};
use crate::similarity::best_match_average;
use crate::utils::{count_ratio, round_score, weighted_score};
use std::collections::HashMap;

pub const POSITIONING_WEIGHT: u32 = 50;
pub const LAYOUT_WEIGHT: u32 = 30;
pub const HIERARCHY_WEIGHT: u32 = 15;
pub const STYLING_WEIGHT: u32 = 15;

/// Inline style keywords that affect layout
pub const STYLE_KEYWORDS: [&str; 9] = [
    "margin", "padding", "width", "height", "display", "position", "float", "flex", "grid",
];

/// Placement score and the factors it was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementScores {
    pub positioning: u8,
    pub layout: u8,
    pub hierarchy: u8,
    pub styling: u8,
    pub score: u8,
}

/// Compares element distribution, layout ratios, heading hierarchy and styling
///
/// Layout is approximated from tag distribution and structure counts;
/// rendered geometry and element positions are never computed.
pub fn compare(pre_go_live: &PageSnapshot, current: &PageSnapshot) -> PlacementScores {
    let positioning = element_positioning(&pre_go_live.elements, &current.elements);
    let layout = layout_ratio(&pre_go_live.structure, &current.structure);
    let hierarchy = visual_hierarchy(
        &pre_go_live.structure.headings,
        &current.structure.headings,
    );
    let styling = styling_differences(&pre_go_live.structure, &current.structure);

    ::log::debug!(
        "Placement factors: positioning {}%, layout {}%, hierarchy {}%, styling {}%",
        positioning,
        layout,
        hierarchy,
        styling
    );

    let score = weighted_score(&[
        (positioning, POSITIONING_WEIGHT),
        (layout, LAYOUT_WEIGHT),
        (hierarchy, HIERARCHY_WEIGHT),
        (styling, STYLING_WEIGHT),
    ]);

    PlacementScores {
        positioning,
        layout,
        hierarchy,
        styling,
        score,
    }
}

/// 70% tag distribution, 30% element count
pub fn element_positioning(a: &[Element], b: &[Element]) -> u8 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let tags_a: Vec<&str> = a.iter().map(|e| e.tag.as_str()).collect();
    let tags_b: Vec<&str> = b.iter().map(|e| e.tag.as_str()).collect();
    let distribution = tag_distribution(&tags_a, &tags_b);
    let count = count_similarity(a.len(), b.len());

    round_score(0.7 * f64::from(distribution) + 0.3 * f64::from(count))
}

/// Mean relative frequency difference over the union of tags
///
/// Differences are summed in first-seen order over `a` then `b`.
pub fn tag_distribution(a: &[&str], b: &[&str]) -> u8 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(usize, usize)> = Vec::new();
    for (side, tags) in [a, b].into_iter().enumerate() {
        for tag in tags {
            let slot = *index.entry(*tag).or_insert_with(|| {
                counts.push((0, 0));
                counts.len() - 1
            });
            if side == 0 {
                counts[slot].0 += 1;
            } else {
                counts[slot].1 += 1;
            }
        }
    }

    let mut total_difference = 0.0;
    let mut compared = 0usize;
    for (count_a, count_b) in counts {
        let max = count_a.max(count_b);
        if max > 0 {
            total_difference += count_a.abs_diff(count_b) as f64 / max as f64;
            compared += 1;
        }
    }

    let mean_difference = if compared > 0 {
        total_difference / compared as f64
    } else {
        0.0
    };
    round_score((100.0 - mean_difference * 100.0).max(0.0))
}

/// Similarity of two element counts
pub fn count_similarity(a: usize, b: usize) -> u8 {
    let max = a.max(b);
    if max == 0 {
        return 100;
    }
    round_score((100.0 - a.abs_diff(b) as f64 / max as f64 * 100.0).max(0.0))
}

/// Weighted count ratios of headings, paragraphs, links, images and lists
pub fn layout_ratio(a: &Structure, b: &Structure) -> u8 {
    let weighted = count_ratio(a.headings.len(), b.headings.len()) * 0.25
        + count_ratio(a.paragraphs.len(), b.paragraphs.len()) * 0.20
        + count_ratio(a.links.len(), b.links.len()) * 0.15
        + count_ratio(a.images.len(), b.images.len()) * 0.25
        + count_ratio(a.lists.len(), b.lists.len()) * 0.15;

    round_score(weighted * 100.0)
}

/// Best-match over heading levels, 20 points lost per level of distance
pub fn visual_hierarchy(a: &[Heading], b: &[Heading]) -> u8 {
    best_match_average(a, b, |left, right| level_similarity(left.level, right.level))
}

pub fn level_similarity(a: u8, b: u8) -> u8 {
    if a == b {
        100
    } else {
        100u8.saturating_sub(a.abs_diff(b).saturating_mul(20))
    }
}

/// Layout keyword mismatches between elements sharing a class or id
///
/// Each pre-go-live element is paired with the first current element of the
/// same category whose class or id is equal. Without any pair the pages are
/// not penalized.
pub fn styling_differences(a: &Structure, b: &Structure) -> u8 {
    let tallies = [
        style_tally(&a.headings, &b.headings),
        style_tally(&a.paragraphs, &b.paragraphs),
        style_tally(&a.links, &b.links),
        style_tally(&a.images, &b.images),
        style_tally(&a.lists, &b.lists),
        style_tally(&a.containers, &b.containers),
    ];

    let pairs: usize = tallies.iter().map(|t| t.pairs).sum();
    let mismatches: usize = tallies.iter().map(|t| t.mismatches).sum();

    if pairs == 0 {
        return 100;
    }
    round_score((100.0 - mismatches as f64 / pairs as f64 * 100.0).max(0.0))
}

#[derive(Debug, Default, Clone, Copy)]
struct StyleTally {
    pairs: usize,
    mismatches: usize,
}

fn style_tally<T: Styled>(a: &[T], b: &[T]) -> StyleTally {
    let mut tally = StyleTally::default();

    for left in a {
        let Some(right) = b.iter().find(|right| left.attrs().matches(right.attrs())) else {
            continue;
        };
        tally.pairs += 1;

        let style_a = left.attrs().style_lowercase();
        let style_b = right.attrs().style_lowercase();
        tally.mismatches += STYLE_KEYWORDS
            .iter()
            .filter(|keyword| style_a.contains(*keyword) != style_b.contains(*keyword))
            .count();
    }

    tally
}
