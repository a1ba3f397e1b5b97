pub mod entrypoint;
pub mod failed;
pub mod filename;
pub mod layout;
pub mod logger;
pub mod processor;
pub mod record;

pub use entrypoint::{run, DirectoryProcessor};
pub use layout::Layout;
pub use processor::{PdfInventory, ProcessingSummary};
