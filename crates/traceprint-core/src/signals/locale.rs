//! Locale and timezone signals.
//!
//! Read from the environment and OS configuration files; cheap, always
//! available, and moderately discriminating in aggregate.

use crate::signal::{SignalInfo, SignalSource};

use super::helpers::{read_trimmed, run_command};

static TIMEZONE_INFO: SignalInfo = SignalInfo {
    name: "timezone",
    description: "IANA timezone name from TZ, /etc/timezone, or /etc/localtime",
    platform_requirements: &[],
};

/// IANA timezone name, e.g. `Europe/Berlin`.
pub struct TimezoneSignal;

impl SignalSource for TimezoneSignal {
    fn info(&self) -> &SignalInfo {
        &TIMEZONE_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        if let Ok(tz) = std::env::var("TZ") {
            if !tz.is_empty() {
                return tz;
            }
        }
        if let Some(tz) = read_trimmed("/etc/timezone") {
            return tz;
        }
        // /etc/localtime is usually a symlink into the zoneinfo database;
        // the trailing path components name the zone.
        std::fs::read_link("/etc/localtime")
            .ok()
            .and_then(|target| {
                let s = target.to_string_lossy().into_owned();
                s.split_once("zoneinfo/").map(|(_, zone)| zone.to_string())
            })
            .unwrap_or_default()
    }
}

static TIMEZONE_OFFSET_INFO: SignalInfo = SignalInfo {
    name: "timezone_offset",
    description: "Current UTC offset, e.g. +0200",
    platform_requirements: &[],
};

/// Numeric UTC offset of the current local time.
pub struct TimezoneOffsetSignal;

impl SignalSource for TimezoneOffsetSignal {
    fn info(&self) -> &SignalInfo {
        &TIMEZONE_OFFSET_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        run_command("date", &["+%z"])
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

static LOCALE_INFO: SignalInfo = SignalInfo {
    name: "locale",
    description: "Configured locale from LC_ALL/LANG",
    platform_requirements: &[],
};

/// Configured locale, e.g. `en_US.UTF-8`.
pub struct LocaleSignal;

impl SignalSource for LocaleSignal {
    fn info(&self) -> &SignalInfo {
        &LOCALE_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    return value;
                }
            }
        }
        String::new()
    }
}
