use color_eyre::eyre::Result;
use std::path::Path;

/// Converts a path to a POSIX-style string, replacing backslashes with forward slashes.
#[must_use]
pub fn to_posix_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

pub trait MakeRelativePath {
    /// Strip `root` from the path and return the remainder as a POSIX-style string.
    fn make_relative(&self, root: &Path) -> Result<String>;
}

impl MakeRelativePath for Path {
    fn make_relative(&self, root: &Path) -> Result<String> {
        let relative = self.strip_prefix(root)?;
        Ok(to_posix_string(relative))
    }
}
