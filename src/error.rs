use thiserror::Error;

/// Alias for a `Result` with the error type [`IniError`].
pub type Result<T> = std::result::Result<T, IniError>;

#[derive(Debug, Error)]
pub enum IniError {
    /// A section lookup found no child with this name, or the node is not a
    /// section at all.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A node could not be converted to the requested type.
    ///
    /// [`Node::get`](crate::Node::get) and [`Node::get_to`](crate::Node::get_to)
    /// absorb this variant; [`Node::try_get`](crate::Node::try_get) and the
    /// serde bridge surface it.
    #[error("Cannot convert {found} to {expected}")]
    Conversion {
        expected: &'static str,
        found: String,
    },

    #[error("Malformed line {line}: '{content}'")]
    Parse { line: usize, content: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl IniError {
    /// Build a [`IniError::Conversion`]; `found` describes the offending input.
    pub fn conversion(expected: &'static str, found: impl Into<String>) -> Self {
        IniError::Conversion {
            expected,
            found: found.into(),
        }
    }

    /// Whether this error is a recoverable conversion failure (as opposed to a
    /// structural one like [`IniError::KeyNotFound`]).
    pub fn is_conversion(&self) -> bool {
        matches!(self, IniError::Conversion { .. })
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for IniError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        IniError::Custom(msg.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::de::Error for IniError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        IniError::Custom(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        IniError::KeyNotFound(field.to_string())
    }
}
