//! In-process camera devices.
//!
//! [`MockCamera`] is scripted for tests; [`SyntheticCamera`] renders a test
//! pattern and backs the CLI where no capture hardware exists.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::device::{CameraDevice, Frame, StreamHandle};
use crate::error::{CameraError, CaptureError};

/// Mock camera for testing.
///
/// Configurable failures and counters for every device call.
pub struct MockCamera {
    device_id: String,
    frame: Frame,
    acquire_error: Mutex<Option<CameraError>>,
    sample_error: Option<String>,
    acquire_count: AtomicU32,
    failed_acquires: AtomicU32,
    sample_count: AtomicU32,
    release_count: AtomicU32,
}

impl MockCamera {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            frame: Frame::solid(8, 6, [128, 128, 128, 255]),
            acquire_error: Mutex::new(None),
            sample_error: None,
            acquire_count: AtomicU32::new(0),
            failed_acquires: AtomicU32::new(0),
            sample_count: AtomicU32::new(0),
            release_count: AtomicU32::new(0),
        }
    }

    /// Set the frame returned by `sample`.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Make `acquire` fail with `error`.
    pub fn with_acquire_error(self, error: CameraError) -> Self {
        *self.acquire_error.lock().unwrap_or_else(|p| p.into_inner()) = Some(error);
        self
    }

    /// Let subsequent `acquire` calls succeed.
    pub fn clear_acquire_error(&self) {
        *self.acquire_error.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    /// Make `sample` fail with a frame error.
    pub fn with_sample_error(mut self, message: impl Into<String>) -> Self {
        self.sample_error = Some(message.into());
        self
    }

    pub fn acquire_count(&self) -> u32 {
        self.acquire_count.load(Ordering::SeqCst)
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count.load(Ordering::SeqCst)
    }

    pub fn release_count(&self) -> u32 {
        self.release_count.load(Ordering::SeqCst)
    }

    /// Streams acquired and not yet released.
    pub fn open_streams(&self) -> u32 {
        let acquired = self.acquire_count() - self.failed_acquires();
        acquired - self.release_count()
    }

    fn failed_acquires(&self) -> u32 {
        self.failed_acquires.load(Ordering::SeqCst)
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new("mock-camera")
    }
}

#[async_trait]
impl CameraDevice for MockCamera {
    fn id(&self) -> &str {
        &self.device_id
    }

    async fn acquire(&self) -> Result<StreamHandle, CameraError> {
        self.acquire_count.fetch_add(1, Ordering::SeqCst);

        let error = self.acquire_error.lock().unwrap_or_else(|p| p.into_inner()).clone();
        if let Some(error) = error {
            self.failed_acquires.fetch_add(1, Ordering::SeqCst);
            return Err(error);
        }

        Ok(StreamHandle::new(1))
    }

    fn sample(&self, _stream: &StreamHandle) -> Result<Frame, CaptureError> {
        self.sample_count.fetch_add(1, Ordering::SeqCst);

        match &self.sample_error {
            Some(message) => Err(CaptureError::Frame(message.clone())),
            None => Ok(self.frame.clone()),
        }
    }

    fn release(&self, stream: &StreamHandle) {
        self.release_count.fetch_add(1, Ordering::SeqCst);
        debug!(device = %self.device_id, stream = %stream.id, tracks = stream.tracks, "Mock tracks stopped");
    }
}

/// Camera rendering a deterministic gradient.
pub struct SyntheticCamera {
    device_id: String,
    width: u32,
    height: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            device_id: format!("synthetic-{}x{}", width, height),
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn render(&self) -> Frame {
        let mut rgba = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let r = (x * 255 / (self.width - 1).max(1)) as u8;
                let g = (y * 255 / (self.height - 1).max(1)) as u8;
                let b = ((x + y) % 256) as u8;
                rgba.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Frame {
            width: self.width,
            height: self.height,
            rgba,
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

#[async_trait]
impl CameraDevice for SyntheticCamera {
    fn id(&self) -> &str {
        &self.device_id
    }

    async fn acquire(&self) -> Result<StreamHandle, CameraError> {
        Ok(StreamHandle::new(1))
    }

    fn sample(&self, _stream: &StreamHandle) -> Result<Frame, CaptureError> {
        Ok(self.render())
    }

    fn release(&self, stream: &StreamHandle) {
        debug!(device = %self.device_id, stream = %stream.id, "Synthetic stream stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let camera = MockCamera::new("cam-1");
        let stream = camera.acquire().await.unwrap();
        assert_eq!(camera.open_streams(), 1);

        camera.sample(&stream).unwrap();
        camera.release(&stream);

        assert_eq!(camera.acquire_count(), 1);
        assert_eq!(camera.sample_count(), 1);
        assert_eq!(camera.release_count(), 1);
        assert_eq!(camera.open_streams(), 0);
    }

    #[tokio::test]
    async fn test_mock_acquire_error_not_counted_as_open() {
        let camera = MockCamera::new("cam-1").with_acquire_error(CameraError::NoDevice);
        assert_eq!(camera.acquire().await.err(), Some(CameraError::NoDevice));
        assert_eq!(camera.acquire_count(), 1);
        assert_eq!(camera.open_streams(), 0);
    }

    #[tokio::test]
    async fn test_synthetic_frame_shape() {
        let camera = SyntheticCamera::new(16, 9);
        let stream = camera.acquire().await.unwrap();
        let frame = camera.sample(&stream).unwrap();

        assert_eq!((frame.width, frame.height), (16, 9));
        assert_eq!(frame.rgba.len(), 16 * 9 * 4);
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(frame.pixel(15, 8), Some([255, 255, 23, 255]));
        assert_eq!(frame, camera.sample(&stream).unwrap());
    }
}
