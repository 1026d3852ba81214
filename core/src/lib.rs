pub mod catalog;
pub mod classify;
pub mod document;
pub mod filter;
pub mod scaling;

// Re-exports for convenience
pub use catalog::{AbilityEntry, CatalogError, EntityRegistry, HeroEntry, ItemEntry, ItemKind};
pub use classify::{classify_announcement, classify_document, extract_abilities};
pub use document::{Block, Document};
pub use filter::EntityKind;
pub use scaling::extract_patterns;
