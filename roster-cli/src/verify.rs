//! Identity verification flow for one employee.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use roster_capture::{Camera, CameraError, CaptureError, CaptureSettings, CapturedImage};
use roster_directory::EmployeeRecord;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// Camera could not be opened; the user must be told, there is no fallback photo
    #[error("{0}")]
    Camera(#[from] CameraError),

    #[error("{0}")]
    Capture(#[from] CaptureError),

    #[error("Failed to save verification photo: {0}")]
    Io(#[from] std::io::Error),
}

/// Saved verification artifact.
#[derive(Debug, Clone)]
pub struct Verification {
    pub image: CapturedImage,
    pub path: PathBuf,
}

/// Start a session, capture one still and save it under `out_dir`.
///
/// Dropping the returned future before it completes tears the session down
/// and stops the camera.
pub async fn verify_employee(
    camera: &Camera,
    employee: EmployeeRecord,
    settings: CaptureSettings,
    out_dir: &Path,
) -> Result<Verification, VerifyError> {
    let session = camera.session(employee, settings);
    session.start().await?;

    let image = session.capture().await?;

    let path = out_dir.join(image.download_filename());
    tokio::fs::create_dir_all(out_dir).await?;
    tokio::fs::write(&path, &image.png).await?;

    info!(
        employee = %image.employee_id,
        path = %path.display(),
        "Verification photo saved"
    );

    Ok(Verification { image, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_capture::MockCamera;
    use roster_directory::fallback_employees;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_verification_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let device = Arc::new(MockCamera::new("cam"));
        let camera = Camera::new(device.clone());

        let employee = fallback_employees().remove(5);
        let result = verify_employee(&camera, employee, CaptureSettings::default(), dir.path())
            .await
            .unwrap();

        let name = result.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("verification-6-"));
        assert!(name.ends_with(".png"));
        assert_eq!(std::fs::read(&result.path).unwrap(), result.image.png);
        assert_eq!(device.release_count(), 1);
    }

    #[tokio::test]
    async fn test_denied_camera_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let device = Arc::new(
            MockCamera::new("cam").with_acquire_error(CameraError::PermissionDenied("blocked".into())),
        );
        let camera = Camera::new(device);

        let err = verify_employee(&camera, fallback_employees().remove(0), CaptureSettings::default(), dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, VerifyError::Camera(CameraError::PermissionDenied(_))));
        assert_eq!(err.to_string(), "Camera access denied: blocked");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_verification_releases_camera() {
        let dir = tempfile::tempdir().unwrap();
        let device = Arc::new(MockCamera::new("cam"));
        let camera = Camera::new(device.clone());

        let pending = verify_employee(&camera, fallback_employees().remove(0), CaptureSettings::default(), dir.path());
        let outcome = tokio::time::timeout(std::time::Duration::from_millis(200), pending).await;

        assert!(outcome.is_err());
        assert_eq!(device.acquire_count(), 1);
        assert_eq!(device.release_count(), 1);
        assert!(!camera.is_busy());
    }
}
