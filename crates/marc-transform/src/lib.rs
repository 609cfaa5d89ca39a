//! MARCXML record transformation.
//!
//! - **normalize**: whitespace and comma cleanup applied to every subfield value
//! - **punctuation**: string helpers shared by the rules
//! - **rules**: the ordered, category-keyed rule table and its engine
//! - **extent**: extent cleanup and multi-value / parenthetical splitting
//! - **dates**: `undated` / `fix circa date` inference from the 008 field

pub mod dates;
pub mod extent;
pub mod normalize;
pub mod punctuation;
pub mod rules;

pub use normalize::{normalize_record, normalize_text};
pub use rules::{Rule, RuleEngine, TransformReport};
