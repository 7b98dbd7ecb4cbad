use std::fmt;

/// Snapshot of an image's state.
///
/// `operations` is a copy; editing it never touches the image it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// `0` while unloaded, otherwise `3` or `4`.
    pub channels: u8,
    pub operations: Vec<String>,
    pub loaded: bool,
}

/// Multi-line summary: dimensions, channels, load state and numbered operations.
impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size: {}x{}", self.width, self.height)?;
        writeln!(f, "channels: {}", self.channels)?;
        writeln!(f, "loaded: {}", if self.loaded { "yes" } else { "no" })?;
        write!(f, "operations: {}", self.operations.len())?;
        for (i, op) in self.operations.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, op)?;
        }
        Ok(())
    }
}
