//! Song catalog: the pool of candidate tracks a quiz is built from.
//!
//! Two sources are supported: a Deezer playlist fetched over HTTP and a
//! local music directory. Both only ever hand out tracks with a usable
//! preview reference and never fail loudly: errors are logged and turn
//! into an empty pool.

mod deezer;
mod error;
mod local;
mod model;

pub use deezer::DeezerCatalog;
pub use local::LocalCatalog;
pub use model::{CatalogFetcher, Track};
