use std::path::PathBuf;

/// Default listening port
pub const DEFAULT_PORT: u16 = 9999;

/// Largest multipart body the upload endpoint accepts
pub const MAX_UPLOAD_SIZE: usize = 1024 << 20; // 1 GiB

/// Which set of routes the server exposes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// QR code, upload page and upload endpoint
    Upload,
    /// Directory listing and file download
    Browse,
}

/// Application configuration, built once at startup and shared read-only
#[derive(Clone, Debug)]
pub struct Config {
    pub root: PathBuf,
    pub port: u16,
    pub advertise_host: String,
    pub mode: Mode,
    pub max_upload_size: usize, // in bytes
    pub open_browser: bool,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, mode: Mode, advertise_host: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            port: DEFAULT_PORT,
            advertise_host: advertise_host.into(),
            mode,
            max_upload_size: MAX_UPLOAD_SIZE,
            open_browser: true,
        }
    }

    /// Base URL users reach the server at, e.g. `http://192.168.1.20:9999`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.advertise_host, self.port)
    }

    /// URL encoded into the QR code
    pub fn upload_page_url(&self) -> String {
        format!("{}/index", self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_use_advertise_host_and_port() {
        let config = Config::new("/tmp", Mode::Upload, "192.168.1.20");
        assert_eq!(config.base_url(), "http://192.168.1.20:9999");
        assert_eq!(config.upload_page_url(), "http://192.168.1.20:9999/index");
    }

    #[test]
    fn upload_limit_is_one_gibibyte() {
        let config = Config::new("/tmp", Mode::Browse, "localhost");
        assert_eq!(config.max_upload_size, 1_073_741_824);
    }
}
