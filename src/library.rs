use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::palette::Palette;

/// Flat list of named palettes persisted as a JSON file.
///
/// Lives at `$XDG_DATA_HOME/gamut/palettes.json` (falling back to
/// `~/.local/share/gamut/palettes.json`). Missing file loads as an empty
/// library; palettes keep insertion order.
#[derive(Debug, Default)]
pub struct Library {
    palettes: Vec<Palette>,
    path: PathBuf,
}

impl Library {
    /// Open the library at the default location, creating nothing on disk
    /// until the first save.
    pub fn open_default() -> Result<Self> {
        Self::open(default_path())
    }

    /// Open a library file at an explicit path.
    pub fn open(path: PathBuf) -> Result<Self> {
        let palettes = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read palette library: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("corrupt palette library: {}", path.display()))?
        } else {
            Vec::new()
        };
        Ok(Self { palettes, path })
    }

    /// Write the library back to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create library directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(&self.palettes)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write palette library: {}", self.path.display()))?;
        info!(path = %self.path.display(), count = self.palettes.len(), "saved palette library");
        Ok(())
    }

    /// Add a palette. Names are unique; adding an existing name is an error.
    pub fn add(&mut self, palette: Palette) -> Result<()> {
        if self.get(&palette.name).is_some() {
            bail!("a palette named `{}` already exists", palette.name);
        }
        self.palettes.push(palette);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// Remove a palette by name. Errors if no palette has that name.
    pub fn remove(&mut self, name: &str) -> Result<Palette> {
        let index = self
            .palettes
            .iter()
            .position(|p| p.name == name)
            .with_context(|| format!("no palette named `{name}`"))?;
        Ok(self.palettes.remove(index))
    }

    /// All palettes in insertion order.
    pub fn list(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolve the default library file path.
fn default_path() -> PathBuf {
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    data_home.join("gamut").join("palettes.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn sample(name: &str) -> Palette {
        Palette::new(
            name,
            vec![
                Color::from_hex("#3366cc").unwrap(),
                Color::from_hex("#ff8800").unwrap(),
            ],
        )
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::open(dir.path().join("palettes.json")).unwrap();
        assert!(library.list().is_empty());
    }

    #[test]
    fn add_save_reopen_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("palettes.json");

        let mut library = Library::open(path.clone()).unwrap();
        library.add(sample("sunset")).unwrap();
        library.add(sample("ocean")).unwrap();
        library.save().unwrap();

        let reopened = Library::open(path).unwrap();
        assert_eq!(reopened.list().len(), 2);
        assert_eq!(reopened.list()[0].name, "sunset");
        assert_eq!(reopened.list()[1].name, "ocean");
        assert_eq!(reopened.get("sunset").unwrap().colors.len(), 2);
    }

    #[test]
    fn duplicate_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::open(dir.path().join("palettes.json")).unwrap();
        library.add(sample("sunset")).unwrap();

        let err = library.add(sample("sunset")).unwrap_err();
        assert!(
            err.to_string().contains("already exists"),
            "unexpected error: {err}"
        );
        assert_eq!(library.list().len(), 1);
    }

    #[test]
    fn remove_existing_palette() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::open(dir.path().join("palettes.json")).unwrap();
        library.add(sample("sunset")).unwrap();

        let removed = library.remove("sunset").unwrap();
        assert_eq!(removed.name, "sunset");
        assert!(library.list().is_empty());
    }

    #[test]
    fn remove_unknown_palette_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = Library::open(dir.path().join("palettes.json")).unwrap();
        let err = library.remove("nope").unwrap_err();
        assert!(
            err.to_string().contains("no palette named"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palettes.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Library::open(path).unwrap_err();
        assert!(
            err.to_string().contains("corrupt palette library"),
            "unexpected error: {err}"
        );
    }
}
