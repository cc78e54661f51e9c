//! Small pure helpers shared across layers.
//!
//! - [`image_url`] - Public image URL derivation from storage keys

pub mod image_url;
