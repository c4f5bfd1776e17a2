//! Roster Capture - identity verification photos
//!
//! A [`CaptureSession`] owns the camera for one verification attempt:
//!
//! ```text
//! Idle --start()--> Active --capture()--> Capturing --(success)--> Released
//!   |                 |                        |
//!   |                 '--cancel()-----------> Released
//!   '--start() fails (stays Idle)          cancel()/drop --> Released
//! ```
//!
//! Hardware access sits behind the [`CameraDevice`] trait. [`Camera`] wraps a
//! device and hands out at most one open stream at a time; the stream is
//! closed when its guard is dropped, so every exit path releases the device
//! exactly once.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roster_capture::{Camera, CaptureSettings, SyntheticCamera};
//! use roster_directory::fallback_employees;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let camera = Camera::new(Arc::new(SyntheticCamera::default()));
//! let employee = fallback_employees().remove(0);
//!
//! let session = camera.session(employee, CaptureSettings::default());
//! session.start().await?;
//! let image = session.capture().await?;
//! println!("{}", image.download_filename());
//! # Ok(())
//! # }
//! ```

pub mod device;
pub mod error;
pub mod filter;
pub mod image;
pub mod mock;
pub mod session;

pub use device::{Camera, CameraDevice, Frame, StreamHandle};
pub use error::{CameraError, CaptureError};
pub use filter::{CaptureSettings, FrameFilter};
pub use image::{encode_png, CapturedImage};
pub use mock::{MockCamera, SyntheticCamera};
pub use session::{CancelHandle, CaptureSession, SessionState};
