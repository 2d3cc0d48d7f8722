use crate::error::{DrillError, Result};
use crate::text;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const COPY_CHUNK: usize = 4096;

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(reader.lines().collect::<io::Result<Vec<_>>>()?)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Copies `src` to `dst` in fixed-size chunks. Returns bytes copied.
/// Copying a file onto itself is an `InvalidInput` error.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    let mut reader = BufReader::new(File::open(src)?);
    if let Ok(dst_real) = fs::canonicalize(dst) {
        if fs::canonicalize(src)? == dst_real {
            return Err(DrillError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot copy {} onto itself", src.display()),
            )));
        }
    }
    let mut writer = BufWriter::new(File::create(dst)?);
    let mut buffer = [0u8; COPY_CHUNK];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n])?;
        total += n as u64;
    }
    writer.flush()?;
    debug!(src = %src.display(), dst = %dst.display(), bytes = total, "copied");
    Ok(total)
}

/// Whitespace-separated words across all lines.
pub fn count_words(path: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut words = 0;
    for line in reader.lines() {
        words += text::words(&line?).count();
    }
    Ok(words)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeWordCount {
    pub total: usize,
    pub files: Vec<(PathBuf, usize)>,
}

/// Counts words in every file under `dir` with the given extension
/// (without the dot). Unreadable entries are skipped with a warning.
pub fn count_words_in_tree(dir: &Path, extension: &str) -> Result<TreeWordCount> {
    let mut result = TreeWordCount::default();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(extension)
        {
            continue;
        }
        let count = count_words(path)?;
        result.total += count;
        result.files.push((path.to_path_buf(), count));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.txt");
        write_text(&path, "Hello file\nsecond line").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["Hello file", "second line"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_lines(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, DrillError::Io(_)));
    }

    #[test]
    fn test_copy_file_larger_than_chunk() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("in.txt");
        let dst = dir.path().join("out.txt");
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &payload).unwrap();

        assert_eq!(copy_file(&src, &dst).unwrap(), 10_000);
        assert_eq!(fs::read(&dst).unwrap(), payload);
    }

    #[test]
    fn test_copy_empty_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty");
        fs::write(&src, b"").unwrap();
        assert_eq!(copy_file(&src, &dir.path().join("copy")).unwrap(), 0);
    }

    #[test]
    fn test_copy_onto_itself_keeps_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("precious.txt");
        fs::write(&path, "precious content").unwrap();

        let err = copy_file(&path, &path).unwrap_err();
        assert!(matches!(err, DrillError::Io(ref e) if e.kind() == io::ErrorKind::InvalidInput));
        assert_eq!(fs::read_to_string(&path).unwrap(), "precious content");

        let aliased = dir.path().join(".").join("precious.txt");
        assert!(copy_file(&path, &aliased).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "precious content");
    }

    #[test]
    fn test_count_words_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, "one two  three\n\n   \nfour\n").unwrap();
        assert_eq!(count_words(&path).unwrap(), 4);
    }

    #[test]
    fn test_count_words_in_tree() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.txt"), "alpha beta").unwrap();
        fs::write(dir.path().join("nested/b.txt"), "gamma").unwrap();
        fs::write(dir.path().join("c.md"), "ignored words here").unwrap();

        let counts = count_words_in_tree(dir.path(), "txt").unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.files.len(), 2);
        assert!(counts.files[0].0.ends_with("a.txt"));
    }
}
