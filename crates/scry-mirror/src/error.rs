//! Reflection error taxonomy
//!
//! Nothing here reaches a caller as `Err`; the display pipeline must never
//! abort over one malformed value. Errors exist so the diagnostic sink
//! receives typed reports instead of bare strings.

use thiserror::Error;

/// Anomalies reflection and stringification can encounter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MirrorError {
    /// The underlying value's backing store has been collected or is
    /// otherwise inaccessible
    #[error("dead object encountered")]
    DeadObject,

    /// A prototype chain walk exceeded its link budget
    #[error("prototype chain exceeded {limit} links")]
    ProtoChainTooLong {
        /// The link budget that was exhausted
        limit: usize,
    },

    /// A DOMException `result` outside the non-negative integer status-code
    /// domain
    #[error("nsresult {value} outside the status-code domain")]
    ResultOutOfRange {
        /// The coerced numeric value
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(MirrorError::DeadObject.to_string(), "dead object encountered");
        assert_eq!(
            MirrorError::ProtoChainTooLong { limit: 64 }.to_string(),
            "prototype chain exceeded 64 links"
        );
        assert_eq!(
            MirrorError::ResultOutOfRange { value: -1.0 }.to_string(),
            "nsresult -1 outside the status-code domain"
        );
    }
}
