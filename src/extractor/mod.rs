//! Pure extraction helpers: no I/O, only text in and normalized values out.

pub mod category;
pub mod date;
pub mod link;
pub mod listing;

pub use category::infer_category;
pub use date::DateNormalizer;
pub use link::normalize_link;
pub use listing::{extract_listings, ListingLayout, ParsedPage, RawListing};
