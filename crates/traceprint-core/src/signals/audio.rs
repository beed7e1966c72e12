//! Audio-hardware signal.
//!
//! The audio stack needs a settle interval after being touched before its
//! reported state is stable, so this probe sleeps for a fixed
//! [`AUDIO_SETTLE_DELAY`] before reading. That delay is the wall-clock lower
//! bound of a full aggregation run; tests that don't care about real audio
//! hardware should register a fake signal instead.

use std::thread;
use std::time::Duration;

use crate::signal::{SignalInfo, SignalSource};

use super::helpers::{read_trimmed, run_command};

/// Fixed settle interval before the audio state is read. Not configurable.
pub const AUDIO_SETTLE_DELAY: Duration = Duration::from_millis(100);

static AUDIO_INFO: SignalInfo = SignalInfo {
    name: "audio",
    description: "Audio hardware census after a fixed settle interval",
    platform_requirements: &["audio"],
};

/// Installed audio hardware, read after [`AUDIO_SETTLE_DELAY`].
pub struct AudioSignal;

impl SignalSource for AudioSignal {
    fn info(&self) -> &SignalInfo {
        &AUDIO_INFO
    }

    fn is_available(&self) -> bool {
        std::path::Path::new("/proc/asound/cards").exists() || cfg!(target_os = "macos")
    }

    fn probe(&self) -> String {
        thread::sleep(AUDIO_SETTLE_DELAY);

        if let Some(cards) = read_trimmed("/proc/asound/cards") {
            if cards != "--- no soundcards ---" {
                return cards;
            }
            return String::new();
        }
        run_command("system_profiler", &["SPAudioDataType"])
            .map(|out| out.trim().to_string())
            .unwrap_or_default()
    }
}
