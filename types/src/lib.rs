pub mod content;
pub mod criteria;
pub mod formatting;

// Re-exports for convenience
pub use content::{
    AbilityChange, AbilityOnlyRecord, Changelog, ChangelogContent, HeroChangeRecord,
    ItemChangeRecord, Note, ScalingPattern,
};
pub use criteria::FilterCriteria;
