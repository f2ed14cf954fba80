use std::{path::Path, process::Command};

use log::{debug, info};

use super::makefile::{pandoc_args, PandocOptions};
use crate::error::{Error, Result};

/// Converts one document right away instead of leaving it to `make`.
pub(super) fn convert(target: &str, source: &Path, output: &Path, options: &PandocOptions) -> Result<()> {
    let args = pandoc_args(source, output, options);
    debug!("{} {}", options.program, args.join(" "));

    let result = Command::new(&options.program)
        .args(&args)
        .output()
        .map_err(Error::io(&options.program))?;
    for stream in [&result.stdout, &result.stderr] {
        let text = String::from_utf8_lossy(stream);
        if !text.trim().is_empty() {
            info!("{} ({target}): {}", options.program, text.trim_end());
        }
    }

    if !result.status.success() {
        return Err(Error::Pandoc {
            id: target.to_string(),
            status: result.status,
        });
    }
    Ok(())
}
