//! Supporting services for the storefront.

pub mod feed;

pub use feed::{FeedItem, FeedService};
