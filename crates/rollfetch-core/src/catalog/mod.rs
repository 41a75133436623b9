//! Catalog model: booth download tasks and their grouping by assembly.
//!
//! The catalog is a flat list of (assembly, booth, URL) records produced by
//! the upstream scraper. Grouping partitions it into per-assembly task lists
//! so concurrency and progress reporting can be scoped to one assembly at a
//! time.

mod load;
mod sanitize;

pub use load::{load_catalog, parse_catalog, CatalogError};
pub use sanitize::sanitize_component;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Composite grouping key: assembly constituency number + name.
///
/// Ordering is `(ac_no, ac_name)`, which fixes the order assemblies are
/// processed in across runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub ac_no: u32,
    pub ac_name: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.ac_no, self.ac_name)
    }
}

/// One unit of work: fetch a booth's roll PDF and store it.
///
/// Immutable once built; consumed exactly once by a download worker.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub group: GroupKey,
    /// Booth number, unique within its assembly.
    pub booth_no: String,
    pub url: String,
}

impl DownloadTask {
    /// Destination file for this task: `<out_root>/<ac_no> - <ac_name>/<booth_no>.pdf`.
    ///
    /// Pure function of the group key and booth number, so re-runs always
    /// target the same path.
    pub fn destination_path(&self, out_root: &Path) -> PathBuf {
        out_root
            .join(sanitize_component(&self.group.to_string()))
            .join(format!("{}.pdf", sanitize_component(&self.booth_no)))
    }
}

/// All tasks of one assembly, in catalog order. Never empty.
#[derive(Debug, Clone)]
pub struct TaskGroup {
    pub key: GroupKey,
    pub tasks: Vec<DownloadTask>,
}

/// Partition the catalog into per-assembly groups, sorted by group key.
///
/// Every task lands in exactly one group; within a group the catalog order
/// is preserved.
pub fn group_catalog(catalog: Vec<DownloadTask>) -> Vec<TaskGroup> {
    let mut by_key: BTreeMap<GroupKey, Vec<DownloadTask>> = BTreeMap::new();
    for task in catalog {
        by_key.entry(task.group.clone()).or_default().push(task);
    }
    by_key
        .into_iter()
        .map(|(key, tasks)| TaskGroup { key, tasks })
        .collect()
}
