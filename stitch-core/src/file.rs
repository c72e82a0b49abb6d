use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Something that ends up as a file below an output root.
pub trait GeneratedFile {
    /// Path of the file below `base`.
    fn path(&self, base: &Path) -> PathBuf;

    /// Rules for writing this file.
    fn rules(&self) -> FileRules {
        FileRules::default()
    }

    /// File content.
    fn render(&self) -> String;

    /// Write the file below `base`.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        apply_rules(&path, &self.render(), &self.rules())
    }
}

fn apply_rules(path: &Path, content: &str, rules: &FileRules) -> Result<WriteResult> {
    if path.exists() {
        if rules.overwrite == Overwrite::IfMissing {
            return Ok(WriteResult::Skipped);
        }
        // Leave identical files alone so downstream compilers see no change.
        if rules.skip_unchanged
            && std::fs::read_to_string(path).is_ok_and(|existing| existing == content)
        {
            return Ok(WriteResult::Unchanged);
        }
    }
    write_file(path, content)?;
    Ok(WriteResult::Written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// Outcome of a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written,
    /// File already had the same content.
    Unchanged,
    /// File exists and the rules forbid overwriting it.
    Skipped,
}

/// A file with a fixed path and content.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a file that is always overwritten.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules.
    pub fn write(&self) -> Result<WriteResult> {
        apply_rules(&self.path, &self.content, &self.rules)
    }
}

/// Rules that determine how a file should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
    /// Do not rewrite a file whose content is already identical.
    pub skip_unchanged: bool,
}

/// How to handle existing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated code).
    Always,
    /// Only create if the file doesn't exist.
    IfMissing,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::Always,
            skip_unchanged: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Resource {
        name: &'static str,
        body: &'static str,
    }

    impl GeneratedFile for Resource {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("resources").join(self.name)
        }

        fn render(&self) -> String {
            self.body.to_string()
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("Foo.java");

        write_file(&path, "class Foo {}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "class Foo {}");
    }

    #[test]
    fn test_file_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Foo.java");
        fs::write(&path, "old").unwrap();

        let result = File::new(&path, "new").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_file_write_reports_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Foo.java");
        fs::write(&path, "same").unwrap();

        let result = File::new(&path, "same").write().unwrap();

        assert_eq!(result, WriteResult::Unchanged);
    }

    #[test]
    fn test_file_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Foo.java");
        fs::write(&path, "hand written").unwrap();

        let file = File::new(&path, "generated").with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
            skip_unchanged: true,
        });

        assert_eq!(file.write().unwrap(), WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand written");
    }

    #[test]
    fn test_generated_file_write_uses_path() {
        let temp = TempDir::new().unwrap();
        let resource = Resource {
            name: "rules.pro",
            body: "-keep class Foo",
        };

        assert_eq!(resource.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("resources/rules.pro")).unwrap(),
            "-keep class Foo"
        );
    }
}
