//! Error type definitions for scheme operations

/// Primary error type for scheme operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key bytes have the wrong length or fail component-level parsing
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Ciphertext length does not match the scheme
    InvalidCiphertext {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Seed length does not match the scheme
    InvalidSeed {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A key or ciphertext belongs to a different scheme than the one invoked
    TypeMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },

    /// The randomness source failed
    RandomGeneration {
        context: &'static str,
    },

    /// A component scheme reported an error
    Component {
        context: &'static str,
        message: String,
    },
}

/// Result type for scheme operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Invalid key error for a length mismatch
    pub fn invalid_key_len(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidKey {
            context,
            message: format!("expected {} bytes, got {}", expected, actual),
        }
    }

    /// Invalid key error for a parse failure
    pub fn invalid_key(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            context,
            message: message.into(),
        }
    }

    /// Type mismatch between the invoked scheme and the key's scheme
    pub fn type_mismatch(context: &'static str, expected: &str, actual: &str) -> Self {
        Self::TypeMismatch {
            context,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Wrapped error from a component scheme or primitive
    pub fn component(context: &'static str, message: impl Into<String>) -> Self {
        Self::Component {
            context,
            message: message.into(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidKey { context, message } => {
                write!(f, "invalid key: {}: {}", context, message)
            }
            Self::InvalidCiphertext {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "invalid ciphertext: {}: expected {} bytes, got {}",
                    context, expected, actual
                )
            }
            Self::InvalidSeed {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "invalid seed: {}: expected {} bytes, got {}",
                    context, expected, actual
                )
            }
            Self::TypeMismatch {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "type mismatch: {}: expected a {} key, got {}",
                    context, expected, actual
                )
            }
            Self::RandomGeneration { context } => {
                write!(f, "random generation failed: {}", context)
            }
            Self::Component { context, message } => {
                write!(f, "component failure: {}: {}", context, message)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context_and_sizes() {
        let err = Error::InvalidSeed {
            context: "combiner",
            expected: 96,
            actual: 95,
        };
        assert_eq!(
            err.to_string(),
            "invalid seed: combiner: expected 96 bytes, got 95"
        );
    }

    #[test]
    fn invalid_key_len_formats_message() {
        let err = Error::invalid_key_len("x25519", 32, 31);
        assert_eq!(err.to_string(), "invalid key: x25519: expected 32 bytes, got 31");
    }
}
