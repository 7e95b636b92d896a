//! The storefront view engine: the derived view pipeline, the seeded
//! shuffle, pagination, the catalog store, the scroll driver, and the
//! session that ties them to URL sync.

mod paging;
mod pipeline;
mod scroll;
mod session;
mod shuffle;
mod store;

pub use paging::PageCursor;
pub use pipeline::{derive_filtered, derive_view};
pub use scroll::{ScrollDriver, ScrollMetrics};
pub use session::{SessionConfig, StorefrontSession};
pub use shuffle::shuffle;
pub use store::{collection_facets, vendor_facets, CatalogStore, LoadStatus};
