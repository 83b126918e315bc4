use std::path::{Path, PathBuf};

/// Where the composited image for an input is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Overwrite the input screenshot.
    InPlace,
    /// Write `<stem>.png` into the directory.
    Directory(PathBuf),
    /// Write to exactly this path.
    File(PathBuf),
    /// Write `<stem>+bezel.png` next to the input.
    Suffixed,
}

impl Destination {
    pub fn resolve(&self, input: &Path) -> PathBuf {
        match self {
            Destination::InPlace => input.to_path_buf(),
            Destination::Directory(dir) => dir.join(format!("{}.png", file_stem(input))),
            Destination::File(path) => path.clone(),
            Destination::Suffixed => input.with_file_name(format!("{}+bezel.png", file_stem(input))),
        }
    }
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string())
}
