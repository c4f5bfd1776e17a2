//! Verification artifact: a PNG still tied to one employee.

use base64::Engine;
use chrono::{DateTime, Utc};

use crate::device::Frame;
use crate::error::CaptureError;

/// Encode an RGBA frame as PNG.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, CaptureError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, frame.width, frame.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&frame.rgba)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Still image produced by a successful capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub employee_id: String,
    pub png: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl CapturedImage {
    pub fn new(employee_id: impl Into<String>, png: Vec<u8>) -> Self {
        Self {
            employee_id: employee_id.into(),
            png,
            captured_at: Utc::now(),
        }
    }

    /// `data:image/png;base64,...` form for display surfaces.
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }

    /// `verification-<employeeId>-<epochMillis>.png`
    pub fn download_filename(&self) -> String {
        format!(
            "verification-{}-{}.png",
            self.employee_id,
            self.captured_at.timestamp_millis()
        )
    }
}
