use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use common::read_headers;

pub fn show_headers(file: &Path) -> Result<()> {
    trace!("Entering show_headers function");
    debug!("Reading CSV headers from {}", file.display());

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let headers = read_headers(&text);
    debug!("Detected {} columns", headers.len());

    for header in headers {
        println!("{}", header);
    }
    Ok(())
}
