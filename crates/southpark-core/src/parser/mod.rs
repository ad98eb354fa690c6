//! Page data parsers
//!
//! Contains the embedded data extractor, the season layout resolver and
//! the episode normalizer. None of them touch the network.

pub mod episode;
pub mod page_data;
pub mod season;

pub use episode::build_episode;
pub use page_data::extract_page_data;
pub use season::{Continuation, SeasonLayout, resolve_layout, season_urls, unique_episodes};
