//! candyprep: candy dataset preparation and clustering.
//!
//! A small pipeline over the candy power-ranking table: min-max score
//! normalization, a weighted-geometric-mean desirability metric,
//! standardized feature extraction, feature/target splitting, and Ward
//! hierarchical clustering into a fixed number of groups. The whole
//! surface hangs off the stateful [`CandyProcessor`], which supports
//! chained in-place transforms and reset to its post-derivation snapshot.

pub mod column;
pub mod error;
pub mod io;
pub mod ml;
pub mod processor;
pub mod table;

// Re-export commonly used types
pub use column::{Column, Float64Column, Int64Column, StringColumn};
pub use error::{Error, Result};
pub use processor::{CandyProcessor, CLUSTER_COLUMN};
pub use table::Table;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
