use thiserror::Error;

/// Errors raised while reading or writing a certificate file.
///
/// An infeasible certificate is not an error; see [`CheckReport`](super::CheckReport).
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("Certificate I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid certificate JSON: {0}")]
    Json(#[from] serde_json::Error),
}
