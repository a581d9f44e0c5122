//! Player failure classification.
//!
//! Platform players report failures as HRESULT-style codes. A handful of them
//! map to user-facing causes; a few transient ones are recovered from by
//! reopening a player that had already opened once.

/// Platform error codes the coordinator recognizes.
pub mod codes {
    pub const UNEXPECTED_FAILURE: u32 = 0x8898_050C;
    pub const CATASTROPHIC_FAILURE: u32 = 0x8000_FFFF;
    pub const LOGON_FAILURE: u32 = 0xC00D_1196;
    pub const UNSUPPORTED_FORMAT: u32 = 0xC00D_1199;
    pub const DSHOW_UNSUPPORTED_FORMAT: u32 = 0xC00D_119A;
    pub const FILE_OPEN_FAILED: u32 = 0xC00D_11B1;
    pub const AUDIO_HW_PROBLEM: u32 = 0xC00D_11BA;
    pub const ACCESS_DENIED: u32 = 0xC00D_11D2;
}

/// Coarse cause of a player failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    AudioHardware,
    UnsupportedCodec,
    NotAuthorized,
    /// Transient; recoverable by reopening a player that opened before.
    Transient,
    Generic,
}

impl FailureCause {
    /// Classify a platform error code. Failures without a code are generic.
    pub fn classify(code: Option<u32>) -> Self {
        match code {
            Some(codes::AUDIO_HW_PROBLEM) => FailureCause::AudioHardware,
            Some(codes::DSHOW_UNSUPPORTED_FORMAT) => FailureCause::UnsupportedCodec,
            Some(codes::ACCESS_DENIED) | Some(codes::LOGON_FAILURE) => FailureCause::NotAuthorized,
            Some(codes::UNEXPECTED_FAILURE)
            | Some(codes::CATASTROPHIC_FAILURE)
            | Some(codes::FILE_OPEN_FAILED) => FailureCause::Transient,
            _ => FailureCause::Generic,
        }
    }

    pub fn is_transient(self) -> bool {
        self == FailureCause::Transient
    }
}

/// A failure surfaced to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("Audio hardware problem while playing {source_uri}")]
    AudioHardware { source_uri: String },

    #[error("Missing or unsupported codec for {source_uri}")]
    UnsupportedCodec { source_uri: String },

    #[error("Not authorized to play {source_uri}")]
    NotAuthorized { source_uri: String },

    #[error("Media failed: {source_uri}: {message}{}", format_code(.code))]
    Generic {
        source_uri: String,
        code: Option<u32>,
        message: String,
    },
}

fn format_code(code: &Option<u32>) -> String {
    code.map(|c| format!(" (0x{:08X})", c)).unwrap_or_default()
}

impl MediaError {
    /// Build the surfaced error for a failure that will not be retried.
    pub fn from_failure(source_uri: &str, code: Option<u32>, message: &str) -> Self {
        let source_uri = source_uri.to_string();
        match FailureCause::classify(code) {
            FailureCause::AudioHardware => MediaError::AudioHardware { source_uri },
            FailureCause::UnsupportedCodec => MediaError::UnsupportedCodec { source_uri },
            FailureCause::NotAuthorized => MediaError::NotAuthorized { source_uri },
            FailureCause::Transient | FailureCause::Generic => MediaError::Generic {
                source_uri,
                code,
                message: message.to_string(),
            },
        }
    }

    pub fn cause(&self) -> FailureCause {
        match self {
            MediaError::AudioHardware { .. } => FailureCause::AudioHardware,
            MediaError::UnsupportedCodec { .. } => FailureCause::UnsupportedCodec,
            MediaError::NotAuthorized { .. } => FailureCause::NotAuthorized,
            MediaError::Generic { code, .. } => FailureCause::classify(*code),
        }
    }

    pub fn source_uri(&self) -> &str {
        match self {
            MediaError::AudioHardware { source_uri }
            | MediaError::UnsupportedCodec { source_uri }
            | MediaError::NotAuthorized { source_uri }
            | MediaError::Generic { source_uri, .. } => source_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_codes() {
        assert_eq!(
            FailureCause::classify(Some(codes::AUDIO_HW_PROBLEM)),
            FailureCause::AudioHardware
        );
        assert_eq!(
            FailureCause::classify(Some(codes::DSHOW_UNSUPPORTED_FORMAT)),
            FailureCause::UnsupportedCodec
        );
        assert_eq!(
            FailureCause::classify(Some(codes::ACCESS_DENIED)),
            FailureCause::NotAuthorized
        );
        assert_eq!(
            FailureCause::classify(Some(codes::LOGON_FAILURE)),
            FailureCause::NotAuthorized
        );
        for code in [
            codes::UNEXPECTED_FAILURE,
            codes::CATASTROPHIC_FAILURE,
            codes::FILE_OPEN_FAILED,
        ] {
            assert!(FailureCause::classify(Some(code)).is_transient());
        }
    }

    #[test]
    fn unknown_or_missing_code_is_generic() {
        assert_eq!(FailureCause::classify(None), FailureCause::Generic);
        assert_eq!(
            FailureCause::classify(Some(codes::UNSUPPORTED_FORMAT)),
            FailureCause::Generic
        );
    }

    #[test]
    fn transient_failure_surfaces_as_generic_error() {
        let error = MediaError::from_failure("a.wav", Some(codes::FILE_OPEN_FAILED), "locked");
        assert!(matches!(error, MediaError::Generic { .. }));
        assert_eq!(error.cause(), FailureCause::Transient);
    }

    #[test]
    fn error_messages() {
        let error = MediaError::from_failure("a.wav", Some(codes::ACCESS_DENIED), "401");
        assert_eq!(error.to_string(), "Not authorized to play a.wav");
        assert_eq!(error.source_uri(), "a.wav");

        let error = MediaError::from_failure("b.wav", Some(0xC00D_1199), "bad header");
        assert_eq!(
            error.to_string(),
            "Media failed: b.wav: bad header (0xC00D1199)"
        );

        let error = MediaError::from_failure("c.wav", None, "gone");
        assert_eq!(error.to_string(), "Media failed: c.wav: gone");
    }
}
