// Core state and search logic, independent of any terminal
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod providers;
pub mod search;
pub mod session;
pub mod store;

pub use config::Config;
pub use debounce::Debouncer;
pub use error::Error;
pub use models::{RepoId, RepositoryRecord};
pub use search::SearchProvider;
pub use session::{Completion, SearchOutcome, SearchSession, SearchState, Ticket};
pub use store::{Favorites, SearchResults};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
