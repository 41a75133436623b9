//! `rollfetch inspect <catalog>` – validate a catalog and show group counts.

use anyhow::{Context, Result};
use rollfetch_core::catalog::{group_catalog, load_catalog};
use std::path::Path;

pub fn run_inspect(catalog_path: &Path) -> Result<()> {
    let catalog = load_catalog(catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let total = catalog.len();
    let groups = group_catalog(catalog);

    println!("{:<8} {:<30} {:>8}", "AC NO", "AC NAME", "BOOTHS");
    for g in &groups {
        println!("{:<8} {:<30} {:>8}", g.key.ac_no, g.key.ac_name, g.tasks.len());
    }
    println!("{} assemblies, {} booths total", groups.len(), total);
    Ok(())
}
