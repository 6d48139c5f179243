// Both comparators are pure functions of two snapshots.
pub mod content;
pub mod placement;

pub use content::ContentScores;
pub use placement::PlacementScores;
