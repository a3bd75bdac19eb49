use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum CloakError {
    #[error("Preset Error: {0}")]
    Preset(#[from] PresetError),
    #[error("Capture Error: {0}")]
    Capture(#[from] CaptureError),
    #[error("Vision Error: {0}")]
    Vision(#[from] opencv::Error),
}

// Color Preset Error Type
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Unknown color '{0}'. Choose from: red, blue, green")]
    UnknownColor(String),
}

// Camera / Background Capture Error Type
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Could not open camera {0}. Try a different --camera-id")]
    DeviceOpen(i32),
    #[error("Frame grab failed")]
    FrameRead,
    #[error("Background burst yielded no usable frames")]
    EmptyBurst,
    #[error("Camera backend error: {0}")]
    Backend(#[from] opencv::Error),
}
