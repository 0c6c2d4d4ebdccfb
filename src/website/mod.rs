// src/website/mod.rs
// =============================================================================
// Website mode: breadth-first crawl over hyperlinks.
//
// Submodules:
// - html: Extracts title, paragraph text and links from one page
// - queue: The breadth-first crawl loop with page and depth budgets
// =============================================================================

mod html;
mod queue;

pub use html::{parse_page, resolve_url, ParsedPage, NO_TITLE};
pub use queue::crawl_website;
