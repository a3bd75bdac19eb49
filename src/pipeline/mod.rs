pub mod compositor;
pub mod mask;

pub use compositor::compose;
pub use mask::MaskBuilder;

use opencv::core::Mat;
use opencv::imgproc;

/// BGR to HSV, the space every preset range is expressed in.
pub fn to_hsv(frame: &Mat) -> opencv::Result<Mat> {
    let mut hsv = Mat::default();
    imgproc::cvt_color_def(frame, &mut hsv, imgproc::COLOR_BGR2HSV)?;
    Ok(hsv)
}
