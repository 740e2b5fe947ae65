#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::sync::Mutex;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use formlab::model::FormFields;
use formlab::submit::{DEFAULT_ENDPOINT, HttpEndpoint, SubmissionController};
use formlab::tui::App;

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let endpoint = HttpEndpoint::new(url)?;

    // The original demo seeds deliberately invalid values so the first
    // submit exercises the validation path.
    let controller = SubmissionController::new(endpoint).with_fields(FormFields::new(
        "John Doe",
        "john.doe@company",
        "0513686378",
        "Hello",
    ));

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(controller);
    let result = app.run(&mut terminal).await;

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

/// Best-effort file logging; raw-mode terminals cannot take stdout logs.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn init_tracing() {
    let Some(dir) = dirs::data_dir() else { return };
    let dir = dir.join("formlab");
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("formlab.log")) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
