use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, Mode, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(
    name = "qrdrop",
    about = "QrDrop: share files over the local network",
    long_about = "Without -v, serves a QR code and an upload page so a phone can send files into PATH.\n\
                  With -v, serves a browsable listing of PATH so files can be downloaded.",
    version,
    author
)]
pub struct Cli {
    /// Directory to upload into, or to browse with -v
    pub path: PathBuf,

    /// Browse and download files instead of receiving uploads
    #[arg(short = 'v', long = "view")]
    pub view: bool,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Do not open a browser after startup
    #[arg(long)]
    pub no_open: bool,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.view {
            Mode::Browse
        } else {
            Mode::Upload
        }
    }

    /// Build the server configuration. The root must be an existing directory.
    pub fn into_config(self, advertise_host: String) -> Result<Config, String> {
        let root = std::fs::canonicalize(&self.path)
            .map_err(|e| format!("Cannot open '{}': {}", self.path.display(), e))?;
        if !root.is_dir() {
            return Err(format!("'{}' is not a directory", self.path.display()));
        }

        let mut config = Config::new(root, self.mode(), advertise_host);
        config.port = self.port;
        config.open_browser = !self.no_open;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_path_selects_upload_mode() {
        let cli = Cli::try_parse_from(["qrdrop", "/srv/share"]).unwrap();
        assert_eq!(cli.mode(), Mode::Upload);
        assert_eq!(cli.path, PathBuf::from("/srv/share"));
        assert_eq!(cli.port, 9999);
        assert!(!cli.no_open);
    }

    #[test]
    fn view_flag_selects_browse_mode() {
        let cli = Cli::try_parse_from(["qrdrop", "-v", "/srv/share"]).unwrap();
        assert_eq!(cli.mode(), Mode::Browse);
        assert_eq!(cli.path, PathBuf::from("/srv/share"));
    }

    #[test]
    fn other_shapes_are_usage_errors() {
        assert!(Cli::try_parse_from(["qrdrop"]).is_err());
        assert!(Cli::try_parse_from(["qrdrop", "-v"]).is_err());
        assert!(Cli::try_parse_from(["qrdrop", "-x", "/srv/share"]).is_err());
        assert!(Cli::try_parse_from(["qrdrop", "a", "b"]).is_err());
    }

    #[test]
    fn into_config_requires_existing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        std::fs::write(&file, b"x").unwrap();

        let cli = Cli::try_parse_from(["qrdrop", file.to_str().unwrap()]).unwrap();
        assert!(cli.into_config("localhost".into()).is_err());

        let missing = temp.path().join("missing");
        let cli = Cli::try_parse_from(["qrdrop", missing.to_str().unwrap()]).unwrap();
        assert!(cli.into_config("localhost".into()).is_err());
    }

    #[test]
    fn into_config_carries_flags() {
        let temp = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "qrdrop",
            "-v",
            "--port",
            "8080",
            "--no-open",
            temp.path().to_str().unwrap(),
        ])
        .unwrap();

        let config = cli.into_config("10.0.0.5".into()).unwrap();
        assert_eq!(config.mode, Mode::Browse);
        assert_eq!(config.port, 8080);
        assert!(!config.open_browser);
        assert_eq!(config.base_url(), "http://10.0.0.5:8080");
        assert_eq!(config.root, std::fs::canonicalize(temp.path()).unwrap());
    }
}
