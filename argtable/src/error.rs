use crate::transform::TransformError;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Every way a parse can end without producing a result.
///
/// Help and version requests travel the same path as failures so that a
/// single boundary decides how the process terminates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown argument [{0}]")]
    UnknownArgument(String),

    #[error("missing argument for [{0}]")]
    MissingArgument(String),

    #[error("invalid value [{value}]{}", spelling_suffix(.spelling))]
    InvalidValue {
        value: String,
        spelling: Option<String>,
        #[source]
        source: TransformError,
    },

    #[error("argument {0} is not valid Unicode")]
    NotUnicode(String),

    #[error("help requested")]
    WantsHelp,

    #[error("version requested")]
    WantsVersion,
}

fn spelling_suffix(spelling: &Option<String>) -> String {
    match spelling {
        Some(s) => format!(" for {}", s),
        None => String::new(),
    }
}

impl ParseError {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseError::WantsHelp | ParseError::WantsVersion => 0,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(ParseError::WantsHelp.exit_code(), 0);
        assert_eq!(ParseError::WantsVersion.exit_code(), 0);
        assert_eq!(ParseError::UnknownArgument("--x".into()).exit_code(), 1);
        assert_eq!(ParseError::MissingArgument("LENGTH".into()).exit_code(), 1);
        assert_eq!(ParseError::NotUnicode("\\xff".into()).exit_code(), 1);
    }

    #[test]
    fn invalid_value_display() {
        let err = ParseError::InvalidValue {
            value: "4x".into(),
            spelling: Some("LENGTH".into()),
            source: TransformError::BadSuffix('x'),
        };
        assert_eq!(err.to_string(), "invalid value [4x] for LENGTH");

        let err = ParseError::InvalidValue {
            value: "4x".into(),
            spelling: None,
            source: TransformError::BadSuffix('x'),
        };
        assert_eq!(err.to_string(), "invalid value [4x]");
        assert!(std::error::Error::source(&err).is_some());
    }
}
