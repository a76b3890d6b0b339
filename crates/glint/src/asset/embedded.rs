//! Files compiled into the crate.
//!
//! The default shader sources live under `assets/` and are embedded with
//! `include_dir!`. A missing embedded path is a packaging mistake, so the
//! readers here panic instead of returning an error.

use glint_render::ShaderSource;
use include_dir::{Dir, DirEntry, include_dir};

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// A wrapper around a directory embedded with `include_dir!`.
#[derive(Clone, Copy)]
pub struct EmbeddedDir {
    dir: &'static Dir<'static>,
}

impl EmbeddedDir {
    pub const fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// The assets shipped with Glint.
    pub fn builtin() -> Self {
        Self::new(&ASSETS)
    }

    /// Get a file's contents.
    ///
    /// # Panics
    ///
    /// Panics if no file is embedded at `path`.
    pub fn read(&self, path: &str) -> &'static [u8] {
        match self.dir.get_file(path) {
            Some(file) => file.contents(),
            None => panic!("embedded asset not found: {path}"),
        }
    }

    /// Get a file's contents as UTF-8 text.
    ///
    /// # Panics
    ///
    /// Panics if no file is embedded at `path` or it is not valid UTF-8.
    pub fn read_text(&self, path: &str) -> &'static str {
        match self.dir.get_file(path).map(|file| file.contents_utf8()) {
            Some(Some(text)) => text,
            Some(None) => panic!("embedded asset is not UTF-8: {path}"),
            None => panic!("embedded asset not found: {path}"),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.dir.get_file(path).is_some()
    }

    /// All embedded file paths, recursively.
    pub fn list_files(&self) -> Vec<&'static str> {
        let mut paths = Vec::new();
        collect_files(self.dir, &mut paths);
        paths
    }
}

fn collect_files(dir: &'static Dir<'static>, paths: &mut Vec<&'static str>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(subdir) => collect_files(subdir, paths),
            DirEntry::File(file) => {
                if let Some(path) = file.path().to_str() {
                    paths.push(path);
                }
            }
        }
    }
}

/// Load one of the built-in shader programs (`quad`, `line`, `text`).
///
/// # Panics
///
/// Panics if the program is not embedded.
pub fn builtin_shader(name: &str) -> ShaderSource {
    let dir = EmbeddedDir::builtin();
    ShaderSource::new(
        dir.read_text(&format!("shaders/{name}.vert")),
        dir.read_text(&format!("shaders/{name}.frag")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shaders_are_embedded() {
        for name in ["quad", "line", "text"] {
            let source = builtin_shader(name);
            assert!(source.validate().is_ok(), "{name} failed validation");
        }
        assert!(EmbeddedDir::builtin().list_files().len() >= 6);
    }

    #[test]
    #[should_panic(expected = "embedded asset not found")]
    fn test_missing_embedded_file_panics() {
        EmbeddedDir::builtin().read("shaders/missing.vert");
    }
}
