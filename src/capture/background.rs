use chrono::{DateTime, Utc};
use opencv::core::{Mat, Scalar};
use opencv::prelude::*;

use crate::capture::{mirror, FrameSource};
use crate::error::CaptureError;

/// Reference image of the empty scene, shown wherever the live frame matches
/// the target color.
pub struct BackgroundPlate {
    image: Mat,
    captured_at: DateTime<Utc>,
    samples: usize,
}

impl BackgroundPlate {
    pub fn image(&self) -> &Mat {
        &self.image
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

/// Samples up to `burst_size` frames and keeps the per-pixel median, which
/// suppresses sensor noise and small motion during the capture instant.
///
/// Failed reads are skipped rather than aborting the burst. A burst with no
/// usable frames is the one recoverable capture failure: the caller keeps
/// whatever plate it already had.
pub fn capture_background(
    source: &mut impl FrameSource,
    burst_size: usize,
) -> Result<BackgroundPlate, CaptureError> {
    let mut frames = Vec::with_capacity(burst_size);
    for _ in 0..burst_size {
        let frame = match source.grab() {
            Ok(frame) => frame,
            Err(_) => continue,
        };
        frames.push(mirror(&frame)?);
    }

    // A mid-burst mode switch would change the frame shape; keep only frames
    // matching the first one.
    if let Some(first) = frames.first() {
        let (rows, cols, typ) = (first.rows(), first.cols(), first.typ());
        frames.retain(|frame| frame.rows() == rows && frame.cols() == cols && frame.typ() == typ);
    }

    if frames.is_empty() {
        return Err(CaptureError::EmptyBurst);
    }

    let image = median_stack(&frames)?;
    Ok(BackgroundPlate {
        image,
        captured_at: Utc::now(),
        samples: frames.len(),
    })
}

/// Per-pixel, per-channel median across a stack of same-shaped frames. Even
/// stack sizes take the truncated mean of the two middle values.
fn median_stack(frames: &[Mat]) -> opencv::Result<Mat> {
    let first = &frames[0];
    let mut plate =
        Mat::new_rows_cols_with_default(first.rows(), first.cols(), first.typ(), Scalar::all(0.0))?;

    let planes = frames
        .iter()
        .map(|frame| frame.data_bytes())
        .collect::<opencv::Result<Vec<_>>>()?;
    let out = plate.data_bytes_mut()?;

    let mut samples = vec![0u8; planes.len()];
    for (index, slot) in out.iter_mut().enumerate() {
        for (sample, plane) in samples.iter_mut().zip(&planes) {
            *sample = plane[index];
        }
        samples.sort_unstable();
        let mid = samples.len() / 2;
        *slot = if samples.len() % 2 == 1 {
            samples[mid]
        } else {
            ((u16::from(samples[mid - 1]) + u16::from(samples[mid])) / 2) as u8
        };
    }

    Ok(plate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{self, Vec3b};
    use std::collections::VecDeque;

    struct ScriptedSource {
        frames: VecDeque<Result<Mat, CaptureError>>,
    }

    impl ScriptedSource {
        fn new(frames: Vec<Result<Mat, CaptureError>>) -> Self {
            Self {
                frames: frames.into_iter().collect(),
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn grab(&mut self) -> Result<Mat, CaptureError> {
            self.frames.pop_front().unwrap_or(Err(CaptureError::FrameRead))
        }
    }

    fn solid(value: (u8, u8, u8)) -> Mat {
        Mat::new_rows_cols_with_default(
            4,
            4,
            core::CV_8UC3,
            Scalar::new(f64::from(value.0), f64::from(value.1), f64::from(value.2), 0.0),
        )
        .unwrap()
    }

    #[test]
    fn all_reads_failing_is_an_empty_burst() {
        let mut source = ScriptedSource::new(vec![
            Err(CaptureError::FrameRead),
            Err(CaptureError::FrameRead),
            Err(CaptureError::FrameRead),
        ]);
        let result = capture_background(&mut source, 3);
        assert!(matches!(result, Err(CaptureError::EmptyBurst)));
    }

    #[test]
    fn identical_frames_produce_that_exact_plate() {
        let mut source = ScriptedSource::new(vec![
            Ok(solid((10, 20, 30))),
            Ok(solid((10, 20, 30))),
            Ok(solid((10, 20, 30))),
        ]);
        let plate = capture_background(&mut source, 3).unwrap();
        assert_eq!(plate.samples(), 3);
        assert_eq!(
            plate.image().data_bytes().unwrap(),
            solid((10, 20, 30)).data_bytes().unwrap()
        );
    }

    #[test]
    fn failed_reads_are_skipped_not_fatal() {
        let mut source = ScriptedSource::new(vec![
            Err(CaptureError::FrameRead),
            Ok(solid((50, 50, 50))),
            Err(CaptureError::FrameRead),
            Ok(solid((50, 50, 50))),
        ]);
        let plate = capture_background(&mut source, 4).unwrap();
        assert_eq!(plate.samples(), 2);
        assert_eq!(
            *plate.image().at_2d::<Vec3b>(0, 0).unwrap(),
            Vec3b::from([50, 50, 50])
        );
    }

    #[test]
    fn odd_stack_takes_the_middle_value() {
        let mut source = ScriptedSource::new(vec![
            Ok(solid((10, 10, 10))),
            Ok(solid((30, 30, 30))),
            Ok(solid((20, 20, 20))),
        ]);
        let plate = capture_background(&mut source, 3).unwrap();
        assert_eq!(
            *plate.image().at_2d::<Vec3b>(2, 2).unwrap(),
            Vec3b::from([20, 20, 20])
        );
    }

    #[test]
    fn even_stack_truncates_the_mean_of_the_middle_pair() {
        let mut source =
            ScriptedSource::new(vec![Ok(solid((10, 10, 10))), Ok(solid((21, 21, 21)))]);
        let plate = capture_background(&mut source, 2).unwrap();
        assert_eq!(
            *plate.image().at_2d::<Vec3b>(1, 3).unwrap(),
            Vec3b::from([15, 15, 15])
        );
    }
}
