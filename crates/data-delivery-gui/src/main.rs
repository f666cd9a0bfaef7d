use std::{env, error::Error, path::PathBuf};

use data_delivery_gui::{DeliveryApp, WINDOW_TITLE};
use delivery_core::Saves;
use eframe::egui;
use log::info;

const SAVES_PATH_VARIABLE: &str = "DATA_DELIVERY_SAVES";

fn saves_path() -> Result<PathBuf, delivery_core::SettingsError> {
    match env::var_os(SAVES_PATH_VARIABLE) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Saves::default_path(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = saves_path()?;
    info!("using settings file {}", path.display());
    let saves = Saves::load(path)?;

    let options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(DeliveryApp::new(cc, saves)))),
    )?;
    Ok(())
}
