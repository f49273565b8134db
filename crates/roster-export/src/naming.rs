use chrono::{DateTime, Local, Utc};
use roster_core::rules::FileNaming;
use roster_core::text::fold;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const FALLBACK_SLUG: &str = "equip";

/// Lowercase, accent-free, hyphen-separated form of a team name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in fold(name).chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        return FALLBACK_SLUG.to_string();
    }
    slug
}

/// `YYYYMMDD_HHMMSS` in local time.
pub fn timestamp_token(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%Y%m%d_%H%M%S")
        .to_string()
}

pub fn base_name(team_name: &str, ts: i64, naming: FileNaming) -> String {
    let slug = slugify(team_name);
    let stamp = timestamp_token(ts);
    match naming {
        FileNaming::SlugFirst => format!("{slug}_{stamp}"),
        FileNaming::TimestampFirst => format!("{stamp}_{slug}"),
    }
}

/// Output files created exclusively under one base name, in suffix order.
#[derive(Debug)]
pub struct Reservation {
    pub base: String,
    pub files: Vec<(PathBuf, File)>,
}

/// Creates every `<candidate><suffix>` in `dir` with `create_new`, trying
/// `base`, `base-2`, `base-3`, ... until one candidate claims all of them.
/// Files claimed for a rejected candidate are removed again.
pub fn reserve(dir: &Path, base: &str, suffixes: &[&str]) -> io::Result<Reservation> {
    let mut counter = 1;
    loop {
        let candidate = if counter == 1 {
            base.to_string()
        } else {
            format!("{base}-{counter}")
        };
        if let Some(files) = claim(dir, &candidate, suffixes)? {
            return Ok(Reservation {
                base: candidate,
                files,
            });
        }
        counter += 1;
    }
}

fn claim(
    dir: &Path,
    candidate: &str,
    suffixes: &[&str],
) -> io::Result<Option<Vec<(PathBuf, File)>>> {
    let mut files: Vec<(PathBuf, File)> = Vec::with_capacity(suffixes.len());
    for suffix in suffixes {
        let path = dir.join(format!("{candidate}{suffix}"));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => files.push((path, file)),
            Err(err) => {
                for (claimed, file) in files {
                    drop(file);
                    let _ = fs::remove_file(claimed);
                }
                if err.kind() == io::ErrorKind::AlreadyExists {
                    return Ok(None);
                }
                return Err(err);
            }
        }
    }
    Ok(Some(files))
}
