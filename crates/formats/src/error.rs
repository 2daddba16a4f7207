use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ContentError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        what: &'static str,
        source: serde_json::Error,
    },
}

impl ContentError {
    pub(crate) fn parse(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ContentError::Parse { what, source }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ContentError::Parse { what, source } => write!(f, "malformed {what}: {source}"),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Io { source, .. } => Some(source),
            ContentError::Parse { source, .. } => Some(source),
        }
    }
}

pub(crate) fn read_file(path: &std::path::Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}
