mod page;
mod telemetry;

use std::io::Write;

use attendance_core::system_clock;
use attendance_util::{load_env_file, AppConfig};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    info!(stage = "app", env = %config.environment.as_str(), "rendering attendance page");

    let document = page::load_document(&config.form_source)?;
    let html = page::render_page(document, system_clock());

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
