/// The primary error type for all operations in the `zipcrack` crate.
///
/// Parse and configuration errors are detected before any worker starts and
/// returned synchronously; `NotFound` and `Cancelled` are the two terminal
/// outcomes of a search that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackError {
    /// The search configuration is inconsistent (bad length range, or no
    /// character class and no dictionary). Carries the reason.
    InvalidConfig(String),

    /// The archive contains no encrypted local-file-header record.
    NoEncryptedEntry,

    /// The first encrypted entry uses WinZip AES or another scheme that is
    /// not the traditional PKWARE stream cipher.
    UnsupportedEncryption,

    /// The first encrypted entry uses a compression method other than
    /// stored or deflate. Carries the method id from the local header.
    UnsupportedCompression(u16),

    /// The local-file-header payload is shorter than the 12-byte encryption
    /// header, or the compressed data overruns the archive buffer.
    TruncatedArchive,

    /// Every configured candidate was tested without a confirmed match.
    NotFound,

    /// The observer detached from the progress stream before completion.
    Cancelled,
}

impl std::fmt::Display for CrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrackError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            CrackError::NoEncryptedEntry => write!(f, "no ZipCrypto-encrypted entry in archive"),
            CrackError::UnsupportedEncryption => {
                write!(f, "unsupported encryption (WinZip AES or stronger)")
            }
            CrackError::UnsupportedCompression(method) => {
                write!(f, "unsupported compression method {}", method)
            }
            CrackError::TruncatedArchive => write!(f, "truncated archive"),
            CrackError::NotFound => write!(f, "password not found"),
            CrackError::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for CrackError {}
