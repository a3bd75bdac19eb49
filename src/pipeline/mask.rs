use opencv::core::{self, Mat, Point, Size};
use opencv::imgproc;
use opencv::prelude::*;

use crate::presets::HsvRange;

/// Thresholds an HSV frame against a set of preset ranges, then cleans the
/// result: blur to soften speckle at the edges, erode to drop small noise
/// blobs, dilate to restore the bulk of the true region.
pub struct MaskBuilder {
    blur_kernel: i32,
    erode_iterations: i32,
    dilate_iterations: i32,
    kernel: Mat,
}

impl MaskBuilder {
    pub fn new(
        blur_kernel: i32,
        erode_iterations: i32,
        dilate_iterations: i32,
    ) -> opencv::Result<Self> {
        let kernel = Mat::ones(3, 3, core::CV_8U)?.to_mat()?;
        Ok(Self {
            blur_kernel,
            erode_iterations,
            dilate_iterations,
            kernel,
        })
    }

    pub fn build(&self, hsv: &Mat, ranges: &[HsvRange]) -> opencv::Result<Mat> {
        let mut mask = Mat::zeros(hsv.rows(), hsv.cols(), core::CV_8UC1)?.to_mat()?;
        for range in ranges {
            let mut selected = Mat::default();
            core::in_range(
                hsv,
                &range.lower_scalar(),
                &range.upper_scalar(),
                &mut selected,
            )?;
            let mut unioned = Mat::default();
            core::bitwise_or(&mask, &selected, &mut unioned, &core::no_array())?;
            mask = unioned;
        }

        // Even or <= 1 kernel sizes skip smoothing; not an error.
        if self.blur_kernel > 1 && self.blur_kernel % 2 == 1 {
            let mut blurred = Mat::default();
            imgproc::gaussian_blur_def(
                &mask,
                &mut blurred,
                Size::new(self.blur_kernel, self.blur_kernel),
                0.0,
            )?;
            mask = blurred;
        }

        // Negative iteration counts are treated as zero, same as the skips above.
        if self.erode_iterations > 0 {
            let mut eroded = Mat::default();
            imgproc::erode(
                &mask,
                &mut eroded,
                &self.kernel,
                Point::new(-1, -1),
                self.erode_iterations,
                core::BORDER_CONSTANT,
                imgproc::morphology_default_border_value()?,
            )?;
            mask = eroded;
        }
        if self.dilate_iterations > 0 {
            let mut dilated = Mat::default();
            imgproc::dilate(
                &mask,
                &mut dilated,
                &self.kernel,
                Point::new(-1, -1),
                self.dilate_iterations,
                core::BORDER_CONSTANT,
                imgproc::morphology_default_border_value()?,
            )?;
            mask = dilated;
        }

        Ok(mask)
    }
}
