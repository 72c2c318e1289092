mod app;
mod io;
mod model;

use app::DesktopApp;
use signal_id_common::DetectorSettings;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Traffic Signal Identifier",
        options,
        Box::new(|_cc| Box::new(DesktopApp::new(DetectorSettings::default()))),
    )
}
