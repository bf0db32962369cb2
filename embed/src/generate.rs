use std::{
    fmt::Write as _,
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tempfile::NamedTempFile;

use crate::{
    assign_idents, compress, discover_inputs, render_preamble, Config,
    Constant,
};

/// What a [`Generator::generate`] run did.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    /// Header was (re)written with this many asset constants.
    Written { path: PathBuf, constants: usize },
    /// Existing header already had the exact contents, left untouched.
    Unchanged { path: PathBuf },
    /// Input directory had no regular files, nothing was written.
    NoInputs,
}

/// Result of comparing the header on disk against a fresh rendering.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Status {
    UpToDate,
    Stale,
    Missing,
    NoInputs,
}

/// Turns the asset directory named in a [`Config`] into a header file.
#[derive(Clone, Debug)]
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Generator { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Produce the full header text in memory.
    ///
    /// Returns `None` if there are no input files.
    pub fn render(&self) -> anyhow::Result<Option<String>> {
        Ok(self.assemble()?.map(|(text, _)| text))
    }

    /// Write the header, replacing any previous one.
    ///
    /// The new contents go to a temporary file next to the header that is
    /// renamed into place only once everything succeeded, so a failed run
    /// never leaves a truncated header behind.
    pub fn generate(&self) -> anyhow::Result<Outcome> {
        let Some((text, constants)) = self.assemble()? else {
            log::info!("No files found in the input directory.");
            return Ok(Outcome::NoInputs);
        };

        let path = self.config.header_path();
        if fs::read(&path).is_ok_and(|old| old == text.as_bytes()) {
            log::info!("Header file unchanged: {}", path.display());
            return Ok(Outcome::Unchanged { path });
        }

        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).with_context(|| {
            format!("failed to create output directory {}", dir.display())
        })?;

        let mut tmp = NamedTempFile::new_in(dir).with_context(|| {
            format!("failed to create temporary file in {}", dir.display())
        })?;
        tmp.write_all(text.as_bytes())
            .and_then(|_| match header_permissions(&path) {
                Some(perms) => tmp.as_file().set_permissions(perms),
                None => Ok(()),
            })
            .and_then(|_| tmp.as_file().sync_all())
            .with_context(|| {
                format!("failed to write {}", tmp.path().display())
            })?;
        // The error owns the temp file, drop it right away so it gets removed.
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to replace {}", path.display()))?;

        log::info!("Header file generated: {}", path.display());
        Ok(Outcome::Written { path, constants })
    }

    /// Compare the header on disk with what [`generate`](Self::generate)
    /// would write, without touching anything.
    pub fn check(&self) -> anyhow::Result<Status> {
        let Some(text) = self.render()? else {
            return Ok(Status::NoInputs);
        };

        let path = self.config.header_path();
        match fs::read(&path) {
            Ok(old) if old == text.as_bytes() => Ok(Status::UpToDate),
            Ok(_) => Ok(Status::Stale),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Ok(Status::Missing)
            }
            Err(e) => Err(e)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// Header text and number of constants in it.
    fn assemble(&self) -> anyhow::Result<Option<(String, usize)>> {
        let inputs = discover_inputs(&self.config.input_dir)?;
        if inputs.is_empty() {
            return Ok(None);
        }

        // Name clashes are caught before any compression work happens.
        let named = assign_idents(&inputs)?;

        let mut ret = render_preamble(&self.config.directive);
        for (ident, path) in &named {
            log::info!("Processing: {}", path.display());
            let bytes = compress(path)?;
            write!(
                ret,
                "{}",
                Constant {
                    ident,
                    bytes: &bytes,
                    qualifier: &self.config.qualifier,
                }
            )?;
        }

        Ok(Some((ret, named.len())))
    }
}

/// Permissions for a freshly written header.
///
/// Temporary files are created owner-only, the header keeps the mode of the
/// one it replaces or gets a plain world-readable one.
fn header_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

// No owner-only temp file mode to undo elsewhere.
#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(root: &Path) -> Config {
        Config {
            input_dir: root.join("data"),
            output_dir: root.join("src"),
            ..Default::default()
        }
    }

    #[test]
    fn no_inputs_leaves_header_alone() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        fs::create_dir(&config.input_dir).unwrap();
        fs::create_dir(&config.output_dir).unwrap();
        fs::write(config.header_path(), "old").unwrap();

        let generator = Generator::new(config.clone());
        assert_eq!(generator.generate().unwrap(), Outcome::NoInputs);
        assert_eq!(generator.check().unwrap(), Status::NoInputs);
        assert_eq!(fs::read_to_string(config.header_path()).unwrap(), "old");
    }

    #[test]
    fn no_inputs_creates_nothing() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        fs::create_dir(&config.input_dir).unwrap();

        Generator::new(config.clone()).generate().unwrap();
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn check_states() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        fs::create_dir(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("main.js"), "let a = 1;").unwrap();

        let generator = Generator::new(config.clone());
        assert_eq!(generator.check().unwrap(), Status::Missing);

        generator.generate().unwrap();
        assert_eq!(generator.check().unwrap(), Status::UpToDate);

        fs::write(config.input_dir.join("main.js"), "let a = 2;").unwrap();
        assert_eq!(generator.check().unwrap(), Status::Stale);
    }

    #[cfg(unix)]
    #[test]
    fn keeps_header_mode() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        fs::create_dir(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("main.js"), "let a = 1;").unwrap();

        let generator = Generator::new(config.clone());
        generator.generate().unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode();
        assert_eq!(mode(config.header_path().as_path()) & 0o777, 0o644);

        fs::set_permissions(
            config.header_path(),
            fs::Permissions::from_mode(0o664),
        )
        .unwrap();
        fs::write(config.input_dir.join("main.js"), "let a = 2;").unwrap();
        assert!(matches!(
            generator.generate().unwrap(),
            Outcome::Written { .. }
        ));
        assert_eq!(mode(config.header_path().as_path()) & 0o777, 0o664);
    }

    #[test]
    fn rerun_is_unchanged() {
        let root = tempfile::tempdir().unwrap();
        let config = config(root.path());
        fs::create_dir(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("a.txt"), "aaaa").unwrap();

        let generator = Generator::new(config.clone());
        assert_eq!(
            generator.generate().unwrap(),
            Outcome::Written {
                path: config.header_path(),
                constants: 1
            }
        );
        assert_eq!(
            generator.generate().unwrap(),
            Outcome::Unchanged {
                path: config.header_path()
            }
        );
    }
}
