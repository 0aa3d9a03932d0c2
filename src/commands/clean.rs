//! Clean the output directory

use anyhow::{anyhow, Result};
use std::fs;

use crate::Folio;

/// Delete the output directory
pub fn run(folio: &Folio) -> Result<()> {
    let out = &folio.output_dir;
    if out.exists() {
        fs::remove_dir_all(out).map_err(|e| anyhow!("Failed to delete {:?}: {}", out, e))?;
        tracing::info!("Deleted: {:?}", out);
    } else {
        tracing::debug!("Nothing to clean at {:?}", out);
    }
    Ok(())
}
