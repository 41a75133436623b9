//! CSV catalog loading and validation.
//!
//! The scraper stage exports one row per booth with assembly identifiers and
//! the roll PDF URL. Any malformed row is fatal at load time; per-task
//! failures only exist once downloading starts.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{DownloadTask, GroupKey};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog row: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid AC number {value:?}")]
    BadAcNo { row: usize, value: String },
    #[error("row {row}: invalid URL {value:?}: {source}")]
    BadUrl {
        row: usize,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("row {row}: duplicate booth {booth_no} in assembly {group}")]
    DuplicateBooth {
        row: usize,
        group: String,
        booth_no: String,
    },
    #[error(
        "row {row}: booth {booth_no} in assembly {group} resolves to the same file as booth {other} after sanitization"
    )]
    DestinationCollision {
        row: usize,
        group: String,
        booth_no: String,
        other: String,
    },
    #[error("catalog contains no rows")]
    Empty,
}

/// One catalog row as exported by the scraper. `District` and `Booth Name`
/// columns may be present but are not used by the download engine.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "AC No")]
    ac_no: String,
    #[serde(rename = "AC Name")]
    ac_name: String,
    #[serde(rename = "Booth No")]
    booth_no: String,
    #[serde(rename = "URL")]
    url: String,
}

/// Load and validate a catalog CSV file.
pub fn load_catalog(path: &Path) -> Result<Vec<DownloadTask>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(file)
}

/// Parse catalog rows from any reader. Enforces the load-time invariants:
/// parsable AC numbers, valid URLs, booth numbers unique per assembly, and a
/// non-empty catalog.
///
/// Uniqueness is checked on the *sanitized* destination components, not the
/// raw fields: sanitization is not injective, and two raw booth numbers that
/// sanitize to the same filename would race on the same path at download
/// time.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<DownloadTask>, CatalogError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut tasks = Vec::new();
    // sanitized (dir, file) -> raw booth number that claimed it
    let mut seen: HashMap<(String, String), String> = HashMap::new();

    for (i, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        // +2: rows are 1-based and the header occupies row 1.
        let row = i + 2;
        let rec = record?;

        let ac_no_str = rec.ac_no.trim();
        let ac_no: u32 = ac_no_str.parse().map_err(|_| CatalogError::BadAcNo {
            row,
            value: ac_no_str.to_string(),
        })?;

        let url = rec.url.trim().to_string();
        url::Url::parse(&url).map_err(|source| CatalogError::BadUrl {
            row,
            value: url.clone(),
            source,
        })?;

        let group = GroupKey {
            ac_no,
            ac_name: rec.ac_name.trim().to_string(),
        };
        let booth_no = rec.booth_no.trim().to_string();

        let dest_key = (
            super::sanitize_component(&group.to_string()),
            super::sanitize_component(&booth_no),
        );
        if let Some(other) = seen.get(&dest_key) {
            if *other == booth_no {
                return Err(CatalogError::DuplicateBooth {
                    row,
                    group: group.to_string(),
                    booth_no,
                });
            }
            return Err(CatalogError::DestinationCollision {
                row,
                group: group.to_string(),
                booth_no,
                other: other.clone(),
            });
        }
        seen.insert(dest_key, booth_no.clone());

        tasks.push(DownloadTask {
            group,
            booth_no,
            url,
        });
    }

    if tasks.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(tasks)
}
