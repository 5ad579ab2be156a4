use chrono::{DateTime, Local};

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Name shown to the user; directories carry a trailing `/`
    pub name: String,
    /// Absolute request path of the entry, percent-encoded
    pub link: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Where a listing was requested from
#[derive(Debug)]
pub struct Listing {
    /// Decoded request path, always starting with `/`
    pub path: String,
    /// Same path percent-encoded, used to build links
    pub href: String,
    pub entries: Vec<FileEntry>,
}

impl Listing {
    /// Link to the parent directory, `None` at the root
    pub fn parent_link(&self) -> Option<String> {
        let trimmed = self.href.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        let parent = &trimmed[..trimmed.rfind('/').map_or(0, |pos| pos + 1)];
        Some(if parent.is_empty() { "/" } else { parent }.to_string())
    }
}
