//! The crate's single error type, covering both malformed JSON at the I/O
//! boundary (§6) and shape mismatches the verifier itself can detect.

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Everything that can go wrong calling into this crate from the outside.
/// Internal field/curve arithmetic never fails at runtime (invalid inputs
/// are out of scope per the Non-goals), and a public-input/IC length
/// mismatch is a normal `false` verdict rather than an error (§7) — so
/// the only variant here originates at JSON parsing.
#[derive(thiserror::Error, Debug)]
pub enum VerifyError {
    #[error("malformed JSON input: {0}")]
    Json(String),
}

#[cfg(feature = "std")]
impl From<serde_json::Error> for VerifyError {
    fn from(e: serde_json::Error) -> Self {
        VerifyError::Json(e.to_string())
    }
}

#[cfg(all(feature = "alloc", not(feature = "std")))]
impl From<serde_json::Error> for VerifyError {
    fn from(e: serde_json::Error) -> Self {
        use alloc::string::ToString;
        VerifyError::Json(e.to_string())
    }
}
