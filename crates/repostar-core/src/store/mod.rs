// In-memory state containers. Nothing here touches disk.
pub mod favorites;
pub mod results;

pub use favorites::Favorites;
pub use results::SearchResults;
