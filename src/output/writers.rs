//! Output writing to stdout or a file

use crate::error::{Result, TangleError};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Write formatted output to a file, or stdout when no path is given
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(TangleError::MissingReportDir {
                        path: parent.to_path_buf(),
                    });
                }
            }
            fs::write(path, content).map_err(|source| TangleError::ReportWrite {
                path: path.to_path_buf(),
                source,
            })
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| {
                    if content.ends_with('\n') {
                        Ok(())
                    } else {
                        handle.write_all(b"\n")
                    }
                })
                .map_err(|source| TangleError::StdoutWrite { source })
        }
    }
}
