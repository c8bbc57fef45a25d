//! Notification sound options (fixed, not user-extensible).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundOption {
    pub id: &'static str,
    pub name: &'static str,
}

/// Id meaning "play nothing".
pub const SILENT_SOUND: &str = "none";

pub const SOUND_OPTIONS: [SoundOption; 5] = [
    SoundOption { id: SILENT_SOUND, name: "No Sound" },
    SoundOption { id: "default_ping", name: "Default Ping" },
    SoundOption { id: "gentle_chime", name: "Gentle Chime" },
    SoundOption { id: "short_alert", name: "Short Alert" },
    SoundOption { id: "digital_alarm", name: "Digital Alarm" },
];

/// Sound preselected for new items.
pub const DEFAULT_SOUND: &str = "default_ping";

impl SoundOption {
    pub fn find(id: &str) -> Option<SoundOption> {
        SOUND_OPTIONS.iter().copied().find(|s| s.id == id)
    }

    pub fn is_silent(id: &str) -> bool {
        id == SILENT_SOUND
    }
}
