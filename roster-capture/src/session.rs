//! Verification capture session state machine.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use roster_directory::EmployeeRecord;

use crate::device::{Camera, OpenStream};
use crate::error::{CameraError, CaptureError};
use crate::filter::CaptureSettings;
use crate::image::{encode_png, CapturedImage};

/// Lifecycle of a session. `Released` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Active,
    Capturing,
    Released,
}

impl SessionState {
    /// States in which the session owns an open stream.
    pub fn holds_device(&self) -> bool {
        matches!(self, SessionState::Active | SessionState::Capturing)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::Capturing => "capturing",
            SessionState::Released => "released",
        };
        f.write_str(name)
    }
}

struct SessionInner {
    state: SessionState,
    stream: Option<OpenStream>,
    result: Option<CapturedImage>,
}

struct Shared {
    id: Uuid,
    inner: Mutex<SessionInner>,
    cancelled: watch::Sender<bool>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Move to `Released`, stopping the stream if one is open.
    ///
    /// Returns false when the session was already released.
    fn release(&self, reason: &str) -> bool {
        let mut inner = self.lock();
        if inner.state == SessionState::Released {
            return false;
        }

        let from = inner.state;
        // stream closes here, before the state change is visible
        drop(inner.stream.take());
        inner.state = SessionState::Released;
        drop(inner);

        self.cancelled.send_replace(true);
        info!(session = %self.id, %from, reason, "Capture session released");
        true
    }
}

/// One verification attempt for one employee.
///
/// Owned by the view that started it. Dropping the session tears it down,
/// stopping the camera if it is still open.
pub struct CaptureSession {
    shared: Arc<Shared>,
    camera: Camera,
    employee: EmployeeRecord,
    settings: CaptureSettings,
}

impl Camera {
    /// New idle session for `employee` on this camera.
    pub fn session(&self, employee: EmployeeRecord, settings: CaptureSettings) -> CaptureSession {
        CaptureSession::new(self.clone(), employee, settings)
    }
}

impl CaptureSession {
    pub fn new(camera: Camera, employee: EmployeeRecord, settings: CaptureSettings) -> Self {
        let (cancelled, _) = watch::channel(false);
        let shared = Arc::new(Shared {
            id: Uuid::new_v4(),
            inner: Mutex::new(SessionInner {
                state: SessionState::Idle,
                stream: None,
                result: None,
            }),
            cancelled,
        });

        debug!(session = %shared.id, employee = %employee.id, "Capture session created");

        Self {
            shared,
            camera,
            employee,
            settings,
        }
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn state(&self) -> SessionState {
        self.shared.lock().state
    }

    pub fn employee(&self) -> &EmployeeRecord {
        &self.employee
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// Image from a successful capture, if any.
    pub fn result_image(&self) -> Option<CapturedImage> {
        self.shared.lock().result.clone()
    }

    /// Handle that can cancel this session from another task.
    pub fn canceller(&self) -> CancelHandle {
        CancelHandle {
            shared: self.shared.clone(),
        }
    }

    /// Acquire the camera: `Idle -> Active`.
    ///
    /// On failure the session stays `Idle` and `start` may be called again.
    pub async fn start(&self) -> Result<(), CameraError> {
        let state = self.state();
        if state != SessionState::Idle {
            return Err(CameraError::InvalidState(state));
        }

        let stream = match self.camera.open().await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(
                    session = %self.shared.id,
                    device = %self.camera.device_id(),
                    error = %e,
                    "Camera acquisition failed"
                );
                return Err(e);
            }
        };

        let mut inner = self.shared.lock();
        if inner.state != SessionState::Idle {
            // cancelled while acquiring; `stream` is dropped and released here
            return Err(CameraError::InvalidState(inner.state));
        }
        let stream_id = stream.handle().id;
        inner.stream = Some(stream);
        inner.state = SessionState::Active;
        drop(inner);

        info!(session = %self.shared.id, stream = %stream_id, employee = %self.employee.id, "Camera active");
        Ok(())
    }

    /// Take the still: `Active -> Capturing -> Released`.
    ///
    /// Waits out the shutter delay, samples and filters the frame, stops the
    /// camera and returns the encoded image. A cancel during the delay
    /// returns [`CaptureError::Cancelled`].
    pub async fn capture(&self) -> Result<CapturedImage, CaptureError> {
        let mut cancelled = self.shared.cancelled.subscribe();

        {
            let mut inner = self.shared.lock();
            if inner.state != SessionState::Active {
                return Err(CaptureError::InvalidState { actual: inner.state });
            }
            inner.state = SessionState::Capturing;
        }
        debug!(session = %self.shared.id, shutter = ?self.settings.shutter(), "Shutter open");

        tokio::select! {
            _ = tokio::time::sleep(self.settings.shutter()) => {}
            _ = cancelled.wait_for(|c| *c) => {
                return Err(CaptureError::Cancelled);
            }
        }

        let sampled = {
            let mut inner = self.shared.lock();
            if inner.state != SessionState::Capturing {
                return Err(CaptureError::Cancelled);
            }
            let stream = inner.stream.take();
            let sampled = match &stream {
                Some(stream) => stream.sample(),
                None => Err(CaptureError::InvalidState { actual: inner.state }),
            };
            drop(stream);
            inner.state = SessionState::Released;
            sampled
        };
        self.shared.cancelled.send_replace(true);

        let mut frame = match sampled {
            Ok(frame) => frame,
            Err(e) => {
                warn!(session = %self.shared.id, error = %e, "Frame sampling failed");
                return Err(e);
            }
        };

        self.settings.filter().apply(&mut frame);
        let image = CapturedImage::new(self.employee.id.clone(), encode_png(&frame)?);
        self.shared.lock().result = Some(image.clone());

        info!(
            session = %self.shared.id,
            employee = %self.employee.id,
            width = frame.width,
            height = frame.height,
            bytes = image.png.len(),
            "Verification photo captured"
        );
        Ok(image)
    }

    /// Stop the camera and end the session. Idempotent.
    pub fn cancel(&self) {
        self.shared.release("cancelled");
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.shared.release("view torn down");
    }
}

/// Cloneable cancel trigger for a [`CaptureSession`].
#[derive(Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.shared.release("cancelled");
    }

    pub fn state(&self) -> SessionState {
        self.shared.lock().state
    }
}
