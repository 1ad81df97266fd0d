pub mod matcher;
pub mod scan;
pub mod sync;

mod error;

pub use error::{Error, Result};
pub use matcher::{LexicalMatcher, Matcher};
pub use scan::{ScanReport, Scanner};
pub use sync::{CatalogSyncer, SyncReport, SyncTask};
