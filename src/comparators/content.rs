use crate::results::{List, Metadata, PageSnapshot, Structure};
use crate::similarity::{best_match_average, compare_sets, similarity};
use crate::utils::weighted_score;

pub const TITLE_WEIGHT: u32 = 10;
pub const TEXT_CONTENT_WEIGHT: u32 = 40;
pub const STRUCTURE_WEIGHT: u32 = 30;
pub const METADATA_WEIGHT: u32 = 20;

/// Content score and the factors it was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentScores {
    pub title: u8,
    pub text_content: u8,
    pub structure: u8,
    pub metadata: u8,
    pub score: u8,
}

/// Compares title, text blocks, structure and metadata of two pages
pub fn compare(pre_go_live: &PageSnapshot, current: &PageSnapshot) -> ContentScores {
    let title = similarity(&pre_go_live.title, &current.title);
    let text_content = compare_sets(&pre_go_live.text_blocks, &current.text_blocks);
    let structure = structure_similarity(&pre_go_live.structure, &current.structure);
    let metadata = metadata_similarity(&pre_go_live.metadata, &current.metadata);

    ::log::debug!(
        "Content factors: title {}%, text {}%, structure {}%, metadata {}%",
        title,
        text_content,
        structure,
        metadata
    );

    let score = weighted_score(&[
        (title, TITLE_WEIGHT),
        (text_content, TEXT_CONTENT_WEIGHT),
        (structure, STRUCTURE_WEIGHT),
        (metadata, METADATA_WEIGHT),
    ]);

    ContentScores {
        title,
        text_content,
        structure,
        metadata,
        score,
    }
}

/// Headings 30, paragraphs 25, links 20, images 15, lists 10
pub fn structure_similarity(a: &Structure, b: &Structure) -> u8 {
    weighted_score(&[
        (compare_sets(&a.headings, &b.headings), 30),
        (compare_sets(&a.paragraphs, &b.paragraphs), 25),
        (compare_sets(&a.links, &b.links), 20),
        (compare_sets(&a.images, &b.images), 15),
        (compare_lists(&a.lists, &b.lists), 10),
    ])
}

/// Best-match over lists, scoring each pair by its item sets
pub fn compare_lists(a: &[List], b: &[List]) -> u8 {
    best_match_average(a, b, |left, right| compare_sets(&left.items, &right.items))
}

/// Title 40, description 30, keywords 20, viewport 10
///
/// The charset is extracted but does not take part in scoring.
pub fn metadata_similarity(a: &Metadata, b: &Metadata) -> u8 {
    weighted_score(&[
        (similarity(&a.title, &b.title), 40),
        (similarity(&a.description, &b.description), 30),
        (similarity(&a.keywords, &b.keywords), 20),
        (similarity(&a.viewport, &b.viewport), 10),
    ])
}
