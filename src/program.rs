use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Immutable program text, indexed by instruction position.
///
/// Every character is kept, including ones that are not instructions, so
/// positions reported in errors line up with the source file.
#[derive(Debug, Clone, Default)]
pub struct Program {
    chars: Vec<char>,
}

impl Program {
    pub fn new(source: &str) -> Self {
        Self { chars: source.chars().collect() }
    }

    /// Read the whole file at `path` as program text.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD, which executes as a no-op.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(&String::from_utf8_lossy(&bytes)))
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, ip: usize) -> Option<char> {
        self.chars.get(ip).copied()
    }

    pub fn source(&self) -> String {
        self.chars.iter().collect()
    }
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_keeps_every_character() {
        let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
        write!(tf, "+ comment\n.").unwrap();
        let program = Program::load(tf.path()).expect("program should load");
        assert_eq!(program.len(), 11);
        assert_eq!(program.get(0), Some('+'));
        assert_eq!(program.get(10), Some('.'));
        assert_eq!(program.get(11), None);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.b");
        let err = Program::load(&missing).unwrap_err();
        assert!(matches!(err, LoadError::Read { ref path, .. } if path == &missing));
    }

    #[test]
    fn invalid_utf8_becomes_noop_characters() {
        let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
        tf.write_all(&[b'+', 0xff, b'.']).unwrap();
        let program = Program::load(tf.path()).expect("program should load");
        assert_eq!(program.source(), "+\u{fffd}.");
    }
}
