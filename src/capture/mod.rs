pub mod background;
pub mod camera;

pub use background::{capture_background, BackgroundPlate};
pub use camera::CameraSource;

use opencv::core::{self, Mat};

use crate::error::CaptureError;

/// A blocking producer of BGR frames. The webcam is the real implementation;
/// tests drive the session with scripted sources instead.
pub trait FrameSource {
    fn grab(&mut self) -> Result<Mat, CaptureError>;
}

/// Horizontal flip for a natural selfie view. Applied to every frame, live
/// and burst alike, so the plate stays spatially aligned with the live feed.
pub fn mirror(frame: &Mat) -> opencv::Result<Mat> {
    let mut flipped = Mat::default();
    core::flip(frame, &mut flipped, 1)?;
    Ok(flipped)
}
