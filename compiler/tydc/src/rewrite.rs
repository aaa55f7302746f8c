//! Rewriting renamed call sites in the package's files.

use std::fs;
use std::io;
use std::path::PathBuf;

use tyd_engine::SourceRewriter;
use tyd_source::SourceEdit;

/// Applies edits to files under a package directory, one at a time.
pub struct FsRewriter {
    dir: PathBuf,
}

impl FsRewriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsRewriter { dir: dir.into() }
    }
}

impl SourceRewriter for FsRewriter {
    fn rewrite(&mut self, edit: &SourceEdit) -> io::Result<()> {
        let path = self.dir.join(&edit.file);
        let mut text = fs::read_to_string(&path)?;
        let end = edit.offset + edit.old.len();
        if text.get(edit.offset..end) != Some(edit.old.as_str()) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{}: expected `{}` at byte {}",
                    edit.file, edit.old, edit.offset
                ),
            ));
        }
        text.replace_range(edit.offset..end, &edit.new);
        fs::write(&path, text)?;
        tracing::debug!(file = %path.display(), offset = edit.offset, "rewrote call site");
        Ok(())
    }
}
