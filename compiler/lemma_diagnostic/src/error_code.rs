use std::fmt;

/// Error codes for front-end diagnostics.
///
/// Format: E#### where the first digit names the phase:
/// - E2xxx: name resolution
/// - E4xxx: proof checking
/// - E9xxx: internal errors
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E2xxx)
    /// Reference to a name not bound in any enclosing scope
    E2001,

    // Proof Errors (E4xxx)
    /// Proof names a proposition that is neither a theorem nor an axiom
    E4001,
    /// Proof body does not establish the stated goal
    E4002,
    /// Proof pattern does not fit the proposition it destructures
    E4003,

    // Internal Errors (E9xxx)
    /// Too many errors
    E9002,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Check if this is a proof-checking error (E4xxx range).
    pub fn is_proof_error(&self) -> bool {
        self.as_str().starts_with("E4")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
