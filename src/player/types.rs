//! Small value types shared by the player, the engine and the UI.

/// One rendition advertised by an adaptive manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// Vertical resolution in pixels, 0 when the manifest doesn't say.
    pub height: u32,
    /// Peak bandwidth in bits per second.
    pub bitrate: u64,
}

/// The player's quality menu: distinct level heights, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityOptions {
    pub default: u32,
    pub options: Vec<u32>,
}

impl QualityOptions {
    /// Build the menu from manifest levels. Levels without a known height
    /// are left out; `None` when nothing is left.
    pub fn from_levels(levels: &[Level]) -> Option<Self> {
        let mut options: Vec<u32> = levels
            .iter()
            .map(|l| l.height)
            .filter(|&h| h > 0)
            .collect();
        options.sort_unstable_by(|a, b| b.cmp(a));
        options.dedup();

        let default = *options.first()?;
        Some(Self { default, options })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdaptiveEvent {
    /// The manifest loaded by the latest `load_source` was parsed.
    ManifestParsed { levels: Vec<Level> },
    /// The latest load failed. Already logged by the engine.
    Error { url: String, reason: String },
}
