//! Gzip-compressed tar archiving for cache entries.

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use larder_core::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn creation(dest: &Path, source: std::io::Error) -> Error {
    Error::ArchiveCreation {
        path: dest.to_path_buf(),
        source,
    }
}

fn extraction(src: &Path, source: std::io::Error) -> Error {
    Error::ArchiveExtraction {
        path: src.to_path_buf(),
        source,
    }
}

/// Bundle `paths` into one gzip-compressed tar archive at `dest`.
///
/// Relative paths are resolved against `work_dir` and stored under the
/// name the caller gave; absolute paths are stored under their
/// `work_dir`-relative name when they live below it, otherwise as
/// given. A path that does not exist fails the whole archive.
pub fn create(paths: &[PathBuf], dest: &Path, work_dir: &Path) -> Result<()> {
    let file = File::create(dest).map_err(|e| creation(dest, e))?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for p in paths {
        let abs = if p.is_absolute() {
            p.clone()
        } else {
            work_dir.join(p)
        };
        if !abs.exists() {
            return Err(creation(
                dest,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no such path: {}", abs.display()),
                ),
            ));
        }
        let name = if p.is_absolute() {
            p.strip_prefix(work_dir).unwrap_or(p)
        } else {
            p.as_path()
        };

        if abs.is_dir() {
            builder
                .append_dir_all(name, &abs)
                .map_err(|e| creation(dest, e))?;
        } else {
            builder
                .append_path_with_name(&abs, name)
                .map_err(|e| creation(dest, e))?;
        }
    }

    let encoder = builder.into_inner().map_err(|e| creation(dest, e))?;
    let mut writer = encoder.finish().map_err(|e| creation(dest, e))?;
    writer.flush().map_err(|e| creation(dest, e))?;
    Ok(())
}

/// Unpack the archive at `src` into `work_dir`, recreating the relative
/// path structure recorded at creation time.
pub fn extract(src: &Path, work_dir: &Path) -> Result<()> {
    let file = File::open(src).map_err(|e| extraction(src, e))?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);
    archive.unpack(work_dir).map_err(|e| extraction(src, e))?;
    Ok(())
}
