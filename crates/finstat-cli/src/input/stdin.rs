use std::io::{self, Read};

use finstat_core::dataset::FinancialDataset;

/// Attempt to read a dataset JSON document from stdin if data is being
/// piped. Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin_dataset() -> Result<Option<FinancialDataset>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let dataset = FinancialDataset::from_json_str(trimmed)
        .map_err(|e| format!("Failed to load dataset from stdin: {e}"))?;
    Ok(Some(dataset))
}
