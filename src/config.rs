use clap::builder::PossibleValuesParser;
use clap::Parser;

/// Command-line flags. Colors are validated against the preset set at parse
/// time, so an unsupported value never reaches the session.
#[derive(Parser, Debug)]
#[command(name = "chromacloak", version, about = "Real-time color-keyed invisibility cloak")]
pub struct Cli {
    /// Target color to turn invisible
    #[arg(long, default_value = "red", value_parser = PossibleValuesParser::new(["red", "blue", "green"]))]
    pub color: String,

    /// Webcam device index
    #[arg(long = "camera-id", default_value_t = 0)]
    pub camera_id: i32,

    /// Kernel size for Gaussian blur (odd number)
    #[arg(long, default_value_t = 5)]
    pub blur: i32,

    /// Erosion iterations
    #[arg(long, default_value_t = 1)]
    pub erode: i32,

    /// Dilation iterations
    #[arg(long, default_value_t = 2)]
    pub dilate: i32,

    /// Frames sampled per background capture burst
    #[arg(long, default_value_t = 20)]
    pub burst: usize,
}

pub struct Configuration {
    pub color: String,
    pub camera_id: i32,
    pub blur_kernel: i32,
    pub erode_iterations: i32,
    pub dilate_iterations: i32,
    pub burst_size: usize,
    pub window_name: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            camera_id: 0,
            blur_kernel: 5,
            erode_iterations: 1,
            dilate_iterations: 2,
            burst_size: 20,
            window_name: "Invisibility Cloak".to_string(),
        }
    }
}

impl From<Cli> for Configuration {
    fn from(cli: Cli) -> Self {
        Self {
            color: cli.color,
            camera_id: cli.camera_id,
            blur_kernel: cli.blur,
            erode_iterations: cli.erode,
            dilate_iterations: cli.dilate,
            burst_size: cli.burst,
            ..Default::default()
        }
    }
}
