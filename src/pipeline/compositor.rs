use opencv::core::{self, Mat};

/// Per-pixel select: plate pixels where the mask is foreground, live pixels
/// everywhere else. The two extractions are spatially disjoint, so the
/// additive blend is an exact select rather than a mix.
pub fn compose(live: &Mat, plate: &Mat, mask: &Mat) -> opencv::Result<Mat> {
    let mut inverted = Mat::default();
    core::bitwise_not(mask, &mut inverted, &core::no_array())?;

    let mut cloaked = Mat::default();
    core::bitwise_and(plate, plate, &mut cloaked, mask)?;
    let mut visible = Mat::default();
    core::bitwise_and(live, live, &mut visible, &inverted)?;

    let mut output = Mat::default();
    core::add_weighted(&cloaked, 1.0, &visible, 1.0, 0.0, &mut output, -1)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, Vec3b};
    use opencv::prelude::*;

    fn solid(rows: i32, cols: i32, bgr: (u8, u8, u8)) -> Mat {
        Mat::new_rows_cols_with_default(
            rows,
            cols,
            core::CV_8UC3,
            Scalar::new(f64::from(bgr.0), f64::from(bgr.1), f64::from(bgr.2), 0.0),
        )
        .unwrap()
    }

    /// Mask with the top `rows` rows set to foreground.
    fn top_rows_mask(rows: i32) -> Mat {
        let mut mask =
            Mat::new_rows_cols_with_default(8, 8, core::CV_8UC1, Scalar::all(0.0)).unwrap();
        for row in 0..rows {
            for col in 0..8 {
                *mask.at_2d_mut::<u8>(row, col).unwrap() = 255;
            }
        }
        mask
    }

    #[test]
    fn output_is_a_per_pixel_select() {
        let live = solid(8, 8, (255, 0, 0));
        let plate = solid(8, 8, (0, 255, 0));
        let mask = top_rows_mask(4);

        let output = compose(&live, &plate, &mask).unwrap();
        // Foreground rows come from the plate, the rest from the live frame.
        assert_eq!(*output.at_2d::<Vec3b>(0, 0).unwrap(), Vec3b::from([0, 255, 0]));
        assert_eq!(*output.at_2d::<Vec3b>(3, 7).unwrap(), Vec3b::from([0, 255, 0]));
        assert_eq!(*output.at_2d::<Vec3b>(4, 0).unwrap(), Vec3b::from([255, 0, 0]));
        assert_eq!(*output.at_2d::<Vec3b>(7, 7).unwrap(), Vec3b::from([255, 0, 0]));
    }

    #[test]
    fn all_background_mask_returns_the_live_frame() {
        let live = solid(8, 8, (12, 34, 56));
        let plate = solid(8, 8, (0, 255, 0));
        let mask = top_rows_mask(0);

        let output = compose(&live, &plate, &mask).unwrap();
        assert_eq!(
            output.data_bytes().unwrap(),
            live.data_bytes().unwrap()
        );
    }

    #[test]
    fn output_dimensions_match_the_live_frame() {
        let live = solid(8, 8, (1, 2, 3));
        let plate = solid(8, 8, (4, 5, 6));
        let output = compose(&live, &plate, &top_rows_mask(2)).unwrap();
        assert_eq!(output.rows(), live.rows());
        assert_eq!(output.cols(), live.cols());
        assert_eq!(output.typ(), live.typ());
    }
}
