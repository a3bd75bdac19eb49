use clap::Parser;
use tracing::Level;

use chromacloak::capture::CameraSource;
use chromacloak::config::{Cli, Configuration};
use chromacloak::error::CloakError;
use chromacloak::pipeline::MaskBuilder;
use chromacloak::presets::ColorPresets;
use chromacloak::session::{HighguiScreen, Session};

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

fn main() {
    init_logging();
    let configuration = Configuration::from(Cli::parse());
    if let Err(err) = run(configuration) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(configuration: Configuration) -> Result<(), CloakError> {
    let presets = ColorPresets::builtin();
    let ranges = presets.ranges_for(&configuration.color)?.to_vec();

    let source = CameraSource::open(configuration.camera_id)?;
    let screen = HighguiScreen::open(&configuration.window_name)?;
    let mask_builder = MaskBuilder::new(
        configuration.blur_kernel,
        configuration.erode_iterations,
        configuration.dilate_iterations,
    )?;

    let mut session = Session::new(
        source,
        screen,
        mask_builder,
        ranges,
        configuration.burst_size,
    );
    session.run()
}
