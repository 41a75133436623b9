//! CLI command handlers. Each command is in its own file.

mod inspect;
mod run;

pub use inspect::run_inspect;
pub use run::{run_download, DownloadOverrides};
