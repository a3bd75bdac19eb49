pub mod capture;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod presets;
pub mod session;

pub use error::{CaptureError, CloakError, PresetError};

pub use capture::{BackgroundPlate, CameraSource, FrameSource};
pub use pipeline::MaskBuilder;
pub use presets::ColorPresets;
pub use session::Session;
