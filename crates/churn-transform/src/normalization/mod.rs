//! Column-level normalization rules.
//!
//! - **numeric**: monetary repair and integer flag coercion
//! - **binary**: Yes/No label recoding
//! - **names**: collision-checked column renaming

pub mod binary;
pub mod names;
pub mod numeric;
