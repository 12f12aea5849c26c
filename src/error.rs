use std::fmt;
use std::path::PathBuf;

pub type MsgResult<T> = Result<T, MsgError>;

#[derive(Debug)]
pub enum MsgError {
    Io {
        context: String,
        source: std::io::Error,
    },
    JsonParse {
        context: String,
        source: serde_json::Error,
    },
    NotAnArray {
        file: PathBuf,
        found: &'static str,
    },
}

impl MsgError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        MsgError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        MsgError::JsonParse {
            context: context.into(),
            source,
        }
    }

    pub fn not_an_array(file: impl Into<PathBuf>, found: &'static str) -> Self {
        MsgError::NotAnArray {
            file: file.into(),
            found,
        }
    }
}

impl fmt::Display for MsgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsgError::Io { context, source } => write!(f, "{context}: {source}"),
            MsgError::JsonParse { context, source } => write!(f, "{context}: {source}"),
            MsgError::NotAnArray { file, found } => write!(
                f,
                "{} is not a JSON array (top-level value is {found})",
                file.display()
            ),
        }
    }
}

impl std::error::Error for MsgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MsgError::Io { source, .. } => Some(source),
            MsgError::JsonParse { source, .. } => Some(source),
            MsgError::NotAnArray { .. } => None,
        }
    }
}
