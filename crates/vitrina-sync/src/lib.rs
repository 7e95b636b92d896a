//! Bidirectional binding between in-memory UI state and the browser
//! address bar: deep links into product detail views, search-term
//! restoration, and back/forward navigation without reload.
//!
//! The address bar itself is behind the [`AddressBar`] trait so the
//! controller is testable against an in-memory history stack.

mod address;
mod controller;
mod handle;
mod query_string;

pub use address::{AddressBar, MemoryHistory};
pub use controller::{ClosedVia, SyncController, SyncMode, SyncUpdate, PRODUCT_PARAM, SEARCH_PARAM};
pub use handle::{match_handle, slugify};
pub use query_string::{get_param, remove_param, set_param};
