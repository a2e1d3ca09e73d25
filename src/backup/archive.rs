//! Gzip-compressed tar archives of a whole directory.
//!
//! The source directory's own name is the single top-level entry of the
//! archive. Symlinks are stored as links and never followed. Neither
//! operation cleans up after itself on failure; callers remove partial output.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use tar::{Archive, Builder};

/// Name the directory will carry inside the archive.
pub fn top_level_name(source_dir: &Path) -> io::Result<OsString> {
    source_dir
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no directory name", source_dir.display()),
            )
        })
}

/// Packs `source_dir` into `dest` as `.tar.gz`.
pub fn create(source_dir: &Path, dest: &Path, compression_level: u32) -> io::Result<()> {
    let name = top_level_name(source_dir)?;

    let file = File::create(dest)?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::new(compression_level));
    let mut builder = Builder::new(encoder);
    builder.follow_symlinks(false);
    builder.append_dir_all(&name, source_dir)?;

    let encoder = builder.into_inner()?;
    let writer = encoder.finish()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

/// Unpacks `archive` under `dest_parent`, recreating the top-level directory.
pub fn extract(archive: &Path, dest_parent: &Path) -> io::Result<()> {
    let file = File::open(archive)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive.unpack(dest_parent)
}

/// Walks every entry header; fails if the archive is truncated or corrupt.
pub fn entry_count(archive: &Path) -> io::Result<usize> {
    let file = File::open(archive)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut count = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        entry.path()?;
        io::copy(&mut entry, &mut io::sink())?;
        count += 1;
    }
    Ok(count)
}
