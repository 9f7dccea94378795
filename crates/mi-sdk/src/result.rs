//! Provider result codes

/// Result code a provider posts to its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MiResult {
    /// Success
    Ok = 0,
    /// Unspecified failure
    Failed = 1,
    /// Access denied
    AccessDenied = 2,
    /// Invalid namespace
    InvalidNamespace = 3,
    /// Invalid parameter
    InvalidParameter = 4,
    /// Invalid class
    InvalidClass = 5,
    /// Not found
    NotFound = 6,
    /// Not supported
    NotSupported = 7,
    /// Class has child classes
    ClassHasChildren = 8,
    /// Class has instances
    ClassHasInstances = 9,
    /// Invalid superclass
    InvalidSuperclass = 10,
    /// Already exists
    AlreadyExists = 11,
    /// No such property
    NoSuchProperty = 12,
    /// Type mismatch
    TypeMismatch = 13,
    /// Query language not supported
    QueryLanguageNotSupported = 14,
    /// Invalid query
    InvalidQuery = 15,
    /// Method not available
    MethodNotAvailable = 16,
    /// Method not found
    MethodNotFound = 17,
    /// Namespace not empty
    NamespaceNotEmpty = 20,
    /// Invalid enumeration context
    InvalidEnumerationContext = 21,
    /// Invalid operation timeout
    InvalidOperationTimeout = 22,
    /// Pull has been abandoned
    PullHasBeenAbandoned = 23,
    /// Pull cannot be abandoned
    PullCannotBeAbandoned = 24,
    /// Filtered enumeration not supported
    FilteredEnumerationNotSupported = 25,
    /// Continuation on error not supported
    ContinuationOnErrorNotSupported = 26,
    /// Server limits exceeded
    ServerLimitsExceeded = 27,
    /// Server is shutting down
    ServerIsShuttingDown = 28,
}

impl MiResult {
    const ALL: [MiResult; 27] = [
        MiResult::Ok,
        MiResult::Failed,
        MiResult::AccessDenied,
        MiResult::InvalidNamespace,
        MiResult::InvalidParameter,
        MiResult::InvalidClass,
        MiResult::NotFound,
        MiResult::NotSupported,
        MiResult::ClassHasChildren,
        MiResult::ClassHasInstances,
        MiResult::InvalidSuperclass,
        MiResult::AlreadyExists,
        MiResult::NoSuchProperty,
        MiResult::TypeMismatch,
        MiResult::QueryLanguageNotSupported,
        MiResult::InvalidQuery,
        MiResult::MethodNotAvailable,
        MiResult::MethodNotFound,
        MiResult::NamespaceNotEmpty,
        MiResult::InvalidEnumerationContext,
        MiResult::InvalidOperationTimeout,
        MiResult::PullHasBeenAbandoned,
        MiResult::PullCannotBeAbandoned,
        MiResult::FilteredEnumerationNotSupported,
        MiResult::ContinuationOnErrorNotSupported,
        MiResult::ServerLimitsExceeded,
        MiResult::ServerIsShuttingDown,
    ];

    /// Numeric code
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Result for a numeric code (18 and 19 are unassigned)
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }

    /// Whether this is `Ok`
    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, MiResult::Ok)
    }
}

impl std::fmt::Display for MiResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for r in MiResult::ALL {
            assert_eq!(MiResult::from_code(r.code()), Some(r));
        }
        assert_eq!(MiResult::from_code(18), None);
        assert_eq!(MiResult::from_code(29), None);
        assert_eq!(MiResult::ServerIsShuttingDown.code(), 28);
    }

    #[test]
    fn test_display() {
        assert_eq!(MiResult::NotFound.to_string(), "NotFound (6)");
        assert!(MiResult::Ok.is_ok());
        assert!(!MiResult::Failed.is_ok());
    }
}
