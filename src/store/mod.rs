// Store module: the async seam the analyzer's inputs arrive through.

pub mod snapshot;
pub mod traits;

pub use snapshot::{fetch_many, fetch_series, Snapshot, SnapshotStore};
pub use traits::PriceStore;
