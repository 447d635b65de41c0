//! Map Application Host Contracts
//!
//! Types and interfaces shared between the map application and its plugins.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Host-side data
//!   - `entities/`: Geometries, features, result items and info views
//!   - `value_objects/`: Projections, extents and i18n dictionaries
//!   - `errors/`: Domain and search error types
//!
//! - **Ports** (`ports/`): Interfaces plugins implement
//!   - `search`: Search providers
//!   - `plugin`: Plugin lifecycle and configuration
//!
//! - **App** (`app`): The application handed to plugins, with its search registry
//!
//! # Usage
//!
//! ```rust,ignore
//! use mapapp::{App, Plugin, SearchImpl};
//!
//! let mut app = App::new();
//! plugin.initialize(&mut app)?;
//! let provider = app.search.get(plugin.name()).unwrap();
//! let items = provider.search("Hauptstr. 1").await?;
//! ```

pub mod app;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use app::{App, SearchRegistry};
pub use domain::{
    DomainError, Ellipsoid, EpsgCode, Extent, ExtentOptions, Feature, Geometry, I18nDictionary,
    InfoView, Position, Projection, ProjectionOptions, ResultItem, SearchError,
};
pub use ports::{ConfigEditor, Plugin, PluginMetadata, SearchImpl};
