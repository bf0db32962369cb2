use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::{DEFAULT_DIRECTIVE, DEFAULT_QUALIFIER};

/// Where the assets come from and where the header goes.
///
/// Loaded from an IDM file, any field left out keeps its default:
///
/// ```text
/// input-dir ./data/easyWifi
/// output-dir ./src
/// header-name frontend.h
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory whose regular files get embedded. Not walked recursively.
    pub input_dir: PathBuf,
    /// Directory the header is written into, created if missing.
    pub output_dir: PathBuf,
    /// File name of the generated header.
    pub header_name: String,
    /// Storage qualifier placed after each array declarator.
    pub qualifier: String,
    /// First line of the header.
    pub directive: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: "./data/easyWifi".into(),
            output_dir: "./src/".into(),
            header_name: "frontend.h".into(),
            qualifier: DEFAULT_QUALIFIER.into(),
            directive: DEFAULT_DIRECTIVE.into(),
        }
    }
}

impl Config {
    /// Load configuration from an IDM file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| {
            format!("failed to read config {}", path.display())
        })?;
        idm::from_str(&text)
            .with_context(|| format!("bad config file {}", path.display()))
    }

    /// Full path of the generated header.
    pub fn header_path(&self) -> PathBuf {
        self.output_dir.join(&self.header_name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_paths() {
        let config = Config::default();
        assert_eq!(
            config.header_path(),
            Path::new("./src/").join("frontend.h")
        );
        assert_eq!(config.qualifier, "PROGMEM");
    }

    #[test]
    fn partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontend-header.idm");
        fs::write(&path, "input-dir web\nheader-name assets.h\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("web"));
        assert_eq!(config.header_name, "assets.h");
        assert_eq!(config.output_dir, Config::default().output_dir);
        assert_eq!(config.directive, DEFAULT_DIRECTIVE);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("nope.idm")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.idm"));
    }
}
