//! Search Port
//!
//! Abstract interface for search providers registered with the host.

use async_trait::async_trait;

use crate::domain::entities::ResultItem;
use crate::domain::errors::SearchError;

/// Search provider interface
///
/// The host calls `search` as the user types and `abort` before the next
/// keystroke is searched.
///
/// # Example
///
/// ```rust,ignore
/// use mapapp::ports::SearchImpl;
///
/// struct Gazetteer { /* ... */ }
///
/// #[async_trait]
/// impl SearchImpl for Gazetteer {
///     fn name(&self) -> &str {
///         "gazetteer"
///     }
///
///     async fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError> {
///         // Query the gazetteer
///     }
/// }
/// ```
#[async_trait]
pub trait SearchImpl: Send + Sync {
    /// Provider name shown by the host
    fn name(&self) -> &str;

    /// Search for `query`, returning items in provider order
    async fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError>;

    /// Cancel outstanding searches
    ///
    /// Must be safe to call at any time, including with nothing in flight.
    fn abort(&self) {}
}
