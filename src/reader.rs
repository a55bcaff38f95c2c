
use std::{fs::File, io::{self, Read}, path::{Path, PathBuf}};

// ------------------------------------------------------------

/// Reads at most `capacity - 1` bytes of `path`, one byte being reserved the way a
/// terminated buffer would. A longer file is cut short without complaint.
pub fn read_source<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<String>
{
    read_bounded(path, capacity).map(|(text, _)| text)
}

// Pulls one byte past the limit so a cut is seen even when the file
// reports no length, as procfs entries and pipes do.
fn read_bounded<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<(String, bool)>
{
    let limit = capacity.saturating_sub(1);
    let mut bytes = Vec::new();
    File::open(path)?
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)?;
    let truncated = bytes.len() > limit;
    bytes.truncate(limit);
    Ok((String::from_utf8_lossy(&bytes).into_owned(), truncated))
}

// ------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ShaderSource
{
    pub path: PathBuf,
    pub text: String,
    pub truncated: bool
}

impl ShaderSource
{
    pub fn load<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<Self>
    {
        let (text, truncated) = read_bounded(&path, capacity)?;
        if truncated
        {
            log::warn!
            (
                "{} exceeds {} bytes and was truncated",
                path.as_ref().display(),
                capacity.saturating_sub(1)
            );
        }
        Ok
        (
            Self
            {
                path: path.as_ref().to_owned(),
                text,
                truncated
            }
        )
    }
}

// ------------------------------------------------------------

#[cfg(test)]
mod tests
{
    use super::*;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf
    {
        let path = std::env::temp_dir().join
        (
            format!("learnopengl-triangle-{}-{name}", std::process::id())
        );
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn short_file_is_read_whole()
    {
        let path = scratch_file("short.vert", b"#version 330 core\n");
        let source = ShaderSource::load(&path, 8192).unwrap();
        assert_eq!(source.text, "#version 330 core\n");
        assert!(!source.truncated);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn long_file_keeps_capacity_minus_one_bytes()
    {
        let path = scratch_file("long.frag", &[b'a'; 20]);
        let source = ShaderSource::load(&path, 8).unwrap();
        assert_eq!(source.text, "aaaaaaa");
        assert!(source.truncated);
        assert_eq!(read_source(&path, 8).unwrap().len(), 7);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn exact_fit_is_not_truncated()
    {
        let path = scratch_file("exact.vert", b"abcdefg");
        let source = ShaderSource::load(&path, 8).unwrap();
        assert_eq!(source.text, "abcdefg");
        assert!(!source.truncated);
        std::fs::remove_file(path).unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn cut_is_detected_without_a_reported_length()
    {
        let path = Path::new("/proc/self/status");
        assert_eq!(std::fs::metadata(path).unwrap().len(), 0);
        let source = ShaderSource::load(path, 16).unwrap();
        assert_eq!(source.text.len(), 15);
        assert!(source.truncated);
    }

    #[test]
    fn zero_capacity_reads_nothing()
    {
        let path = scratch_file("zero.vert", b"void main() {}");
        assert_eq!(read_source(&path, 0).unwrap(), "");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error()
    {
        let path = std::env::temp_dir().join("learnopengl-triangle-does-not-exist.vert");
        let error = read_source(&path, 8192).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}
