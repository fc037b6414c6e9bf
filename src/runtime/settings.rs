use std::path::Path;

use crate::config;

/// Load and validate settings, falling back to defaults. Runs before logging
/// is set up, so problems go to stderr.
pub fn load_settings(path: Option<&Path>) -> config::Settings {
    let loaded = match path {
        Some(p) => config::Settings::load_from(Some(p)),
        None => config::Settings::load(),
    };

    match loaded {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("chanplay: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("chanplay: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
