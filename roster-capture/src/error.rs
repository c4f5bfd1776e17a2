//! Error types for camera access and capture

use thiserror::Error;

use crate::session::SessionState;

/// Failure to obtain the camera. Surfaced to the user; never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// User or platform refused access
    #[error("Camera access denied: {0}")]
    PermissionDenied(String),

    /// No capture hardware present
    #[error("No camera device available")]
    NoDevice,

    /// Another session holds the device
    #[error("Camera is in use by another session")]
    DeviceBusy,

    /// Any other acquisition failure
    #[error("Camera acquisition failed: {0}")]
    Acquisition(String),

    /// `start()` called on a session that is not idle
    #[error("Cannot start camera, session is {0}")]
    InvalidState(SessionState),
}

/// Failure while producing the still image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// `capture()` called without an active stream
    #[error("Capture requires an active stream, session is {actual}")]
    InvalidState { actual: SessionState },

    /// Session was cancelled or torn down during the shutter delay
    #[error("Capture cancelled")]
    Cancelled,

    /// Hardware error while sampling the frame
    #[error("Frame sampling failed: {0}")]
    Frame(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<png::EncodingError> for CaptureError {
    fn from(err: png::EncodingError) -> Self {
        CaptureError::Encode(err.to_string())
    }
}
