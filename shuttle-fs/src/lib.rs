//! Capability-based UTF-8 file helpers for the shuttle command line.
//!
//! The CLI reads one request file and optionally writes one result file.
//! Paths arrive as [`camino`] UTF-8 paths and every operation goes through a
//! `cap-std` directory handle opened with ambient authority, so callers never
//! touch `std::fs` directly.
#![forbid(unsafe_code)]

use std::io::{self, Write};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
/// Propagates the underlying open failure, including `NotFound`.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
/// Returns `NotFound` when the file or its parent is missing, and any other
/// metadata failure as-is.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = parent_and_name(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Write `contents` to `path`, creating parent directories and replacing any
/// existing file.
///
/// # Errors
/// Propagates directory creation, open and write failures.
pub fn write_utf8_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let name = file_name(path)?;
    let (anchor, below) = anchor(parent_of(path))?;
    let dir = if below.as_str().is_empty() {
        anchor
    } else {
        anchor.create_dir_all(&below)?;
        anchor.open_dir(&below)?
    };
    let mut file = dir.create(name)?;
    file.write_all(contents)?;
    file.flush()
}

fn parent_of(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

fn file_name(path: &Utf8Path) -> io::Result<&str> {
    path.file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))
}

fn parent_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let name = file_name(path)?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent_of(path), ambient_authority())?;
    Ok((dir, name))
}

/// Open the directory `dir` starts from and return the path below it.
///
/// Leading root, drive, `.` and `..` components stay in the anchor so the
/// remainder only descends, which is all a `cap-std` handle permits. Output
/// paths such as `../plans/today.json` therefore resolve against `..`.
fn anchor(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut base = Utf8PathBuf::new();
    let mut below = Utf8PathBuf::new();
    for component in dir.components() {
        if below.as_str().is_empty() && !matches!(component, Utf8Component::Normal(_)) {
            base.push(component);
        } else {
            below.push(component);
        }
    }
    if base.as_str().is_empty() {
        base.push(".");
    }
    let handle = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((handle, below))
}
