use tracing::debug;

use crate::config::Settings;
use crate::player::{AdaptiveEngine, Coordinator, ExternalPlayer, HlsEngine};
use crate::render::Mounts;
use crate::session::Session;
use crate::storage;
use crate::theme::Theme;

/// Wire the store, the player and the HLS engine into an initialized
/// session rendering into `mounts`.
pub fn build_session(settings: &Settings, mounts: Mounts) -> Session {
    let store_path = settings.storage.resolved_path();
    let kv = storage::open_or_memory(&store_path);

    let player = Box::new(ExternalPlayer::new(&settings.player));
    let engine: Option<Box<dyn AdaptiveEngine>> = if settings.adaptive.enabled {
        Some(Box::new(HlsEngine::new(&settings.adaptive)))
    } else {
        debug!("adaptive streaming disabled");
        None
    };
    let coordinator = Coordinator::new(
        player,
        engine,
        settings.adaptive.manifest_extensions.clone(),
    );

    let theme = Theme::parse_or(&settings.ui.default_theme, Theme::default());
    let mut session = Session::new(kv, coordinator, mounts, theme);
    session.initialize();
    session
}
