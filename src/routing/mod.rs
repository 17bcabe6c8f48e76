//! Routing module
//!
//! Maps request paths onto files under the registered entries:
//! - Location matching on path-segment boundaries
//! - Ordered fallthrough across entries sharing a location
//! - Index-file lookup for directory requests

pub mod matcher;
mod router;

pub use router::{Dispatch, Router};
