//! Camera capability abstraction.
//!
//! [`CameraDevice`] is the platform seam: acquire a live stream, sample a
//! frame from it, stop its tracks. [`Camera`] layers exclusivity on top so a
//! device is never shared between two sessions.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CameraError, CaptureError};

/// Live video stream returned by [`CameraDevice::acquire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    pub id: Uuid,
    /// Number of hardware tracks backing the stream
    pub tracks: usize,
}

impl StreamHandle {
    pub fn new(tracks: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            tracks,
        }
    }
}

/// A sampled video frame, 8-bit RGBA, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Frame {
    /// Build a frame, checking the buffer matches the dimensions.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(CaptureError::Frame(format!("empty frame {}x{}", width, height)));
        }
        if rgba.len() != expected {
            return Err(CaptureError::Frame(format!(
                "buffer is {} bytes, {}x{} RGBA needs {}",
                rgba.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// Frame filled with a single colour.
    pub fn solid(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let rgba = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self { width, height, rgba }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.rgba[offset..offset + 4];
        Some([p[0], p[1], p[2], p[3]])
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Platform media-capture capability.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Device identifier, for logs.
    fn id(&self) -> &str;

    /// Request access to the video hardware.
    async fn acquire(&self) -> Result<StreamHandle, CameraError>;

    /// Copy the current frame out of a live stream.
    fn sample(&self, stream: &StreamHandle) -> Result<Frame, CaptureError>;

    /// Stop every track of the stream. Must not block on hardware.
    fn release(&self, stream: &StreamHandle);
}

/// Shared handle to a camera device that admits one open stream at a time.
#[derive(Clone)]
pub struct Camera {
    device: Arc<dyn CameraDevice>,
    claimed: Arc<AtomicBool>,
}

impl Camera {
    pub fn new(device: Arc<dyn CameraDevice>) -> Self {
        Self {
            device,
            claimed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn device_id(&self) -> &str {
        self.device.id()
    }

    /// Whether a session currently holds (or is acquiring) the device.
    pub fn is_busy(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }

    /// Open the device, failing fast with [`CameraError::DeviceBusy`] when held.
    pub(crate) async fn open(&self) -> Result<OpenStream, CameraError> {
        let claim = DeviceClaim::try_new(self.claimed.clone())?;
        let handle = self.device.acquire().await?;

        debug!(device = %self.device.id(), stream = %handle.id, "Camera stream opened");

        Ok(OpenStream {
            handle,
            device: self.device.clone(),
            _claim: claim,
        })
    }
}

/// Exclusive claim on a device, relinquished on drop.
struct DeviceClaim {
    claimed: Arc<AtomicBool>,
}

impl DeviceClaim {
    fn try_new(claimed: Arc<AtomicBool>) -> Result<Self, CameraError> {
        claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| CameraError::DeviceBusy)?;
        Ok(Self { claimed })
    }
}

impl Drop for DeviceClaim {
    fn drop(&mut self) {
        self.claimed.store(false, Ordering::SeqCst);
    }
}

/// An acquired stream. Dropping it stops the tracks and frees the device.
pub(crate) struct OpenStream {
    handle: StreamHandle,
    device: Arc<dyn CameraDevice>,
    // dropped after `Drop::drop` below has released the tracks
    _claim: DeviceClaim,
}

impl OpenStream {
    pub(crate) fn handle(&self) -> &StreamHandle {
        &self.handle
    }

    pub(crate) fn sample(&self) -> Result<Frame, CaptureError> {
        self.device.sample(&self.handle)
    }
}

impl Drop for OpenStream {
    fn drop(&mut self) {
        self.device.release(&self.handle);
        debug!(device = %self.device.id(), stream = %self.handle.id, "Camera stream released");
    }
}
