//! Reading resume and job description text

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;

/// Path argument meaning "read from stdin"
pub const STDIN: &str = "-";

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN
}

/// Read a file, or stdin for `-`, with surrounding whitespace removed
pub fn read_source(path: &Path, what: &str) -> Result<String> {
    let text = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("Failed to read {} from stdin", what))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {} from {}", what, path.display()))?
    };
    Ok(text.trim().to_string())
}

/// Only one input can come from stdin
pub fn check_single_stdin(paths: &[&Path]) -> Result<()> {
    if paths.iter().filter(|p| is_stdin(p)).count() > 1 {
        bail!("Only one of --resume and --job-description can be read from stdin");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_source_trims() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "\n  EXPERIENCE:\n  • Led migrations  \n").unwrap();

        let text = read_source(file.path(), "resume").unwrap();
        assert_eq!(text, "EXPERIENCE:\n  • Led migrations");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/resume.txt"), "resume").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read resume from /nonexistent/resume.txt"));
    }

    #[test]
    fn test_single_stdin() {
        let dash = Path::new("-");
        let file = Path::new("resume.txt");
        assert!(check_single_stdin(&[dash, file]).is_ok());
        assert!(check_single_stdin(&[file, file]).is_ok());
        assert!(check_single_stdin(&[dash, dash]).is_err());
    }
}
