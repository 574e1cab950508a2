use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Terminal preferences resolved once at startup.
#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: usize,
}

const FALLBACK_WIDTH: usize = 120;

static PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let color = flags.format == OutputFormat::Table
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    let width = std::env::var("COLUMNS")
        .ok()
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|w| *w >= 40)
        .unwrap_or(FALLBACK_WIDTH);

    let _ = PREFS.set(UiPrefs {
        table_color: color,
        term_width: width,
    });
}

/// Preferences set by [`init`], or plain defaults when it never ran (tests).
pub fn prefs() -> UiPrefs {
    PREFS.get().copied().unwrap_or(UiPrefs {
        table_color: false,
        term_width: FALLBACK_WIDTH,
    })
}
