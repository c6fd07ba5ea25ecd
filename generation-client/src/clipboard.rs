//! Copy text to the system clipboard
//!
//! Uses whichever platform copy tool is installed, fed through stdin.

use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ClipboardError;

/// Copy tools tried in order, with the arguments that make them read stdin
const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by an external copy command
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: PathBuf,
    args: Vec<String>,
}

impl SystemClipboard {
    /// Find the first copy tool available in PATH
    pub fn detect() -> Result<Self, ClipboardError> {
        CANDIDATES
            .iter()
            .find_map(|(name, args)| {
                which::which(name).ok().map(|program| Self {
                    program,
                    args: args.iter().map(|a| a.to_string()).collect(),
                })
            })
            .ok_or_else(|| {
                let names: Vec<&str> = CANDIDATES.iter().map(|(name, _)| *name).collect();
                ClipboardError::Unavailable(names.join(", "))
            })
    }

    /// Use a specific command that reads the text from stdin
    pub fn with_command(program: impl Into<PathBuf>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        debug!("Copying {} bytes with {}", text.len(), self.program_name());

        let spawn_error = |source: std::io::Error| ClipboardError::Spawn {
            program: self.program_name(),
            source,
        };

        // Some tools fork a daemon that keeps inherited pipes open, so only stdin is piped
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(spawn_error)?;
        }

        let status = child.wait().await.map_err(spawn_error)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Failed {
                program: self.program_name(),
                status: status.code(),
            })
        }
    }
}

/// In-memory clipboard for tests
#[derive(Debug, Default)]
pub struct MockClipboard {
    contents: Mutex<Option<String>>,
    fail: bool,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail
    pub fn failing() -> Self {
        Self {
            contents: Mutex::new(None),
            fail: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Failed {
                program: "mock".to_string(),
                status: Some(1),
            });
        }
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_string());
        Ok(())
    }
}
