use core::fmt;

/// Result alias for `demon`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by community discovery and its I/O helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
    /// A requested center node is not part of the graph.
    NodeNotFound(String),
    /// Malformed edge-list input.
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// Underlying reader or writer failed.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::NodeNotFound(node) => write!(f, "node {node} is not in the graph"),
            Error::Parse { line, message } => write!(f, "line {line}: {message}"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidParameter {
            name: "epsilon",
            message: "must lie in [0, 1]",
        };
        assert_eq!(err.to_string(), "invalid parameter 'epsilon': must lie in [0, 1]");

        let err = Error::Parse {
            line: 3,
            message: "expected two node ids".into(),
        };
        assert_eq!(err.to_string(), "line 3: expected two node ids");
        assert_eq!(Error::NodeNotFound("7".into()).to_string(), "node 7 is not in the graph");
    }

    #[test]
    fn test_every_variant_has_a_message() {
        let all = [
            Error::InvalidParameter {
                name: "max_rounds",
                message: "must be positive",
            },
            Error::NodeNotFound("1".into()),
            Error::Parse {
                line: 1,
                message: "bad".into(),
            },
            Error::Io("closed".into()),
        ];
        for err in all {
            let msg = err.to_string();
            assert!(!msg.is_empty());
            match err {
                Error::InvalidParameter { .. } => assert!(msg.starts_with("invalid parameter")),
                Error::NodeNotFound(_) => assert!(msg.starts_with("node ")),
                Error::Parse { .. } => assert!(msg.starts_with("line ")),
                Error::Io(_) => assert!(msg.starts_with("i/o error")),
            }
        }
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.ncol");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(ref m) if m.contains("missing.ncol")));
    }
}
