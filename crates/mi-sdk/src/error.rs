//! Error types for building and mutating instances

use crate::types::MiType;

/// Result type for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// Errors raised while building descriptors or setting field values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SdkError {
    /// No property with this name is declared by the class
    #[error("No such property: {class}.{name}")]
    NoSuchProperty {
        /// Class name
        class: String,
        /// Requested property name
        name: String,
    },

    /// Value tag differs from the declared property type
    #[error("Type mismatch on {property}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Property name
        property: String,
        /// Declared type
        expected: MiType,
        /// Type of the supplied value
        actual: MiType,
    },

    /// Descriptor is malformed (duplicate or out-of-range field slots)
    #[error("Invalid class {class}: {reason}")]
    InvalidClass {
        /// Class name
        class: String,
        /// What is wrong with it
        reason: String,
    },
}
