use crate::app::App;

pub mod app;
pub mod event;
pub mod field;
pub mod input;
pub mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Logging goes to stderr, which shares the terminal; opt in with RUST_LOG
    // and redirect stderr to a file.
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    }

    let terminal = ratatui::init();
    let result = App::new().and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}
