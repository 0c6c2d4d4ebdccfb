// src/repo/mod.rs
// =============================================================================
// Repository mode: recursive walk of the GitHub contents API.
//
// Submodules:
// - api: Listing URL translation and listing decoding
// - tree: The depth-first walk that builds a RepoTree
// =============================================================================

mod api;
mod tree;

pub use api::{decode_listing, listing_url, EntryKind, ListingEntry};
pub use tree::scrape_tree;
