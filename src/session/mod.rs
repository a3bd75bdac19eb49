mod screen;

pub use screen::{HighguiScreen, Key, Screen};

use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use crate::capture::{capture_background, mirror, BackgroundPlate, FrameSource};
use crate::error::{CaptureError, CloakError};
use crate::pipeline::{compose, to_hsv, MaskBuilder};
use crate::presets::HsvRange;

const PROMPT: &str = "Press 'b' to capture background";

/// The interactive loop: one blocking frame read, optional compositing, one
/// display update and a short key poll per tick.
///
/// Two states, modeled by the optional plate. Without a plate the mirrored
/// frame is shown with a prompt; with one, pixels matching the target color
/// are replaced by the plate.
pub struct Session<S, D> {
    source: S,
    screen: D,
    mask_builder: MaskBuilder,
    ranges: Vec<HsvRange>,
    burst_size: usize,
    background: Option<BackgroundPlate>,
}

impl<S: FrameSource, D: Screen> Session<S, D> {
    pub fn new(
        source: S,
        screen: D,
        mask_builder: MaskBuilder,
        ranges: Vec<HsvRange>,
        burst_size: usize,
    ) -> Self {
        Self {
            source,
            screen,
            mask_builder,
            ranges,
            burst_size,
            background: None,
        }
    }

    pub fn background(&self) -> Option<&BackgroundPlate> {
        self.background.as_ref()
    }

    pub fn run(&mut self) -> Result<(), CloakError> {
        tracing::info!("Press 'b' to capture background when the frame is empty, 'q' to quit.");
        loop {
            let frame = match self.source.grab() {
                Ok(frame) => frame,
                Err(err) => {
                    // Camera loss is unrecoverable for the session.
                    tracing::error!("Frame grab failed: {err}");
                    return Err(err.into());
                }
            };
            let frame = mirror(&frame)?;

            match &self.background {
                Some(plate) => {
                    let hsv = to_hsv(&frame)?;
                    let mask = self.mask_builder.build(&hsv, &self.ranges)?;
                    let output = compose(&frame, plate.image(), &mask)?;
                    self.screen.present(&output)?;
                }
                None => {
                    let mut display = frame.try_clone()?;
                    draw_prompt(&mut display)?;
                    self.screen.present(&display)?;
                }
            }

            match self.screen.poll_key()? {
                Key::Quit => break,
                Key::CaptureBackground => self.recapture_background()?,
                Key::Ignored => {}
            }
        }
        Ok(())
    }

    fn recapture_background(&mut self) -> Result<(), CloakError> {
        match capture_background(&mut self.source, self.burst_size) {
            Ok(plate) => {
                tracing::info!(
                    "Background captured from {} samples at {}.",
                    plate.samples(),
                    plate.captured_at()
                );
                self.background = Some(plate);
            }
            Err(CaptureError::EmptyBurst) => {
                tracing::warn!("Background burst yielded no usable frames; keeping previous plate.");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}

fn draw_prompt(display: &mut Mat) -> opencv::Result<()> {
    imgproc::put_text(
        display,
        PROMPT,
        Point::new(20, 40),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.8,
        Scalar::new(0.0, 255.0, 255.0, 0.0),
        2,
        imgproc::LINE_AA,
        false,
    )
}
