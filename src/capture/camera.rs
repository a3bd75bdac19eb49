use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::FrameSource;
use crate::error::CaptureError;

/// The webcam, opened by device index. Released when the source is dropped,
/// whichever way the session ends.
pub struct CameraSource {
    capture: VideoCapture,
}

impl CameraSource {
    pub fn open(camera_id: i32) -> Result<Self, CaptureError> {
        let capture = VideoCapture::new(camera_id, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(CaptureError::DeviceOpen(camera_id));
        }
        Ok(Self { capture })
    }
}

impl FrameSource for CameraSource {
    fn grab(&mut self) -> Result<Mat, CaptureError> {
        let mut frame = Mat::default();
        let ok = self.capture.read(&mut frame)?;
        if !ok || frame.empty() {
            return Err(CaptureError::FrameRead);
        }
        Ok(frame)
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        let _ = self.capture.release();
    }
}
