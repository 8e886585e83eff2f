use std::fs;
use std::path::{Path, PathBuf};

use finstat_core::dataset::FinancialDataset;

/// Read a dataset JSON file and run it through dataset validation.
pub fn read_dataset(path: &str) -> Result<FinancialDataset, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let dataset = FinancialDataset::from_json_str(&contents)
        .map_err(|e| format!("Failed to load '{}': {}", resolved.display(), e))?;
    Ok(dataset)
}

/// Resolve the path against the working directory and check it points at a
/// regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }

    Ok(resolved)
}
