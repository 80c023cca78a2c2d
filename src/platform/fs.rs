// LogSift - platform/fs.rs
//
// Filesystem access for log input and report output.
// Maps io errors onto the typed error hierarchy with path context.

use crate::util::error::{ExportError, ScanError};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Open a log file for a sequential line scan.
///
/// Any failure to open (missing file, permission denied, directory) is
/// reported as `FileNotFound`. The handle is closed when the reader drops.
pub fn open_log(path: &Path) -> Result<BufReader<File>, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    // Opening a directory succeeds on some platforms; reject it up front.
    match file.metadata() {
        Ok(meta) if meta.is_dir() => Err(ScanError::FileNotFound {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "is a directory"),
        }),
        _ => Ok(BufReader::new(file)),
    }
}

/// Confirm the log file can be opened, without reading it.
pub fn check_log_file(path: &Path) -> Result<(), ScanError> {
    open_log(path).map(|_| ())
}

/// Create (or truncate) a report file inside `output_dir`.
///
/// The directory is created if it does not exist.
pub fn create_output(output_dir: &Path, name: &str) -> Result<(PathBuf, BufWriter<File>), ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|e| ExportError::Io {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    let path = output_dir.join(name);
    let file = File::create(&path).map_err(|e| ExportError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok((path, BufWriter::new(file)))
}
