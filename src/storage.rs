use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};
use percent_encoding::{percent_decode_str, AsciiSet, CONTROLS};

use crate::error::AppError;
use crate::models::FileEntry;

/// Characters escaped in a single path segment of a link
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A request path mapped onto the filesystem
#[derive(Debug)]
pub struct Resolved {
    /// Decoded request path for display, always starting with `/`
    pub display: String,
    /// Normalised, percent-encoded request path, always starting with `/`
    pub href: String,
    pub path: PathBuf,
}

/// The directory the server is scoped to. Every path handed out by this type
/// lies inside it.
#[derive(Clone, Debug)]
pub struct RootDir {
    root: PathBuf,
}

impl RootDir {
    /// The root is canonicalised once here when it exists, so containment
    /// checks compare against a symlink-free path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::fs::canonicalize(&root).unwrap_or(root);
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Map a raw request path onto the filesystem.
    ///
    /// Segments are decoded to raw bytes, so names that are not valid UTF-8
    /// stay reachable. `..` and drive prefixes are refused outright.
    pub fn resolve(&self, raw_path: &str) -> Result<Resolved, AppError> {
        let decoded = percent_decode_str(raw_path).collect::<Vec<u8>>();
        let decoded =
            os_string_from_bytes(decoded).ok_or_else(|| AppError::NotFound(raw_path.to_string()))?;

        let mut path = self.root.clone();
        let mut href = String::new();
        for component in Path::new(&decoded).components() {
            match component {
                Component::RootDir | Component::CurDir => {}
                Component::Normal(segment) => {
                    path.push(segment);
                    href.push('/');
                    href.push_str(&encode_segment(segment));
                }
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(AppError::PathEscapesRoot(decoded.to_string_lossy().into_owned()));
                }
            }
        }
        if href.is_empty() {
            href.push('/');
        }

        let display = decoded.to_string_lossy();
        let display = if display.starts_with('/') {
            display.into_owned()
        } else {
            format!("/{}", display)
        };
        Ok(Resolved { display, href, path })
    }

    /// Refuse paths that leave the root once symlinks are followed.
    /// `path` must exist.
    pub async fn ensure_contained(&self, path: &Path) -> Result<(), AppError> {
        let target = tokio::fs::canonicalize(path).await?;
        if target.starts_with(&self.root) {
            Ok(())
        } else {
            Err(AppError::PathEscapesRoot(path.display().to_string()))
        }
    }

    /// Destination for an uploaded file. Only a bare file name is accepted.
    pub async fn upload_destination(&self, file_name: &str) -> Result<PathBuf, AppError> {
        let mut components = Path::new(file_name).components();
        let name = match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name,
            _ => return Err(AppError::PathEscapesRoot(file_name.to_string())),
        };

        let destination = self.root.join(name);
        // An existing symlink would redirect the write elsewhere.
        if let Ok(meta) = tokio::fs::symlink_metadata(&destination).await {
            if meta.file_type().is_symlink() {
                match self.ensure_contained(&destination).await {
                    Ok(()) => {}
                    // Dangling link, the target cannot be checked.
                    Err(AppError::IoError(_)) => {
                        return Err(AppError::PathEscapesRoot(file_name.to_string()));
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(destination)
    }

    /// Immediate children of `dir`, sorted by name, linked under `href`
    /// (an already encoded request path).
    pub async fn list(&self, dir: &Path, href: &str) -> Result<Vec<FileEntry>, AppError> {
        let mut reader = tokio::fs::read_dir(dir).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            let file_name = entry.file_name();
            // Follow symlinks; a dangling one is listed as an empty file.
            let meta = match tokio::fs::metadata(entry.path()).await {
                Ok(meta) => Some(meta),
                Err(_) => entry.metadata().await.ok(),
            };
            let is_dir = meta.as_ref().map_or(false, |m| m.is_dir());
            let size = meta.as_ref().map_or(0, |m| if m.is_dir() { 0 } else { m.len() });
            let modified = meta
                .as_ref()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Local>::from);

            let mut link = join_href(href, &encode_segment(&file_name));
            let mut display = file_name.to_string_lossy().into_owned();
            if is_dir {
                link.push('/');
                display.push('/');
            }

            entries.push(FileEntry {
                name: display,
                link,
                is_dir,
                size,
                modified,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn join_href(base: &str, segment: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, segment)
    } else {
        format!("{}/{}", base, segment)
    }
}

/// Percent-encode one file name for use in an `href`, byte for byte.
#[cfg(unix)]
fn encode_segment(name: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;
    percent_encoding::percent_encode(name.as_bytes(), SEGMENT).to_string()
}

#[cfg(not(unix))]
fn encode_segment(name: &OsStr) -> String {
    percent_encoding::utf8_percent_encode(&name.to_string_lossy(), SEGMENT).to_string()
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> Option<OsString> {
    use std::os::unix::ffi::OsStringExt;
    Some(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> Option<OsString> {
    String::from_utf8(bytes).ok().map(OsString::from)
}

pub fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }
    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}
