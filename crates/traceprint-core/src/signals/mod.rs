//! Built-in signal source implementations.
//!
//! Each probe reads one environment facet and returns a raw string, or an
//! empty string when the capability is absent. The aggregation engine treats
//! the probes as opaque; everything with design content lives outside this
//! module.

pub mod helpers;

pub mod audio;
pub mod display;
pub mod fonts;
pub mod locale;
pub mod platform;

use crate::signal::SignalSource;

/// All built-in signal constructors, in canonical registration order.
///
/// The order is part of the identifier: reordering this list changes every
/// visitor id generated by [`crate::Fingerprinter::auto`].
pub fn all_signals() -> Vec<Box<dyn SignalSource>> {
    vec![
        // Rendering / graphics
        Box::new(fonts::CanvasSignal),
        Box::new(display::GpuRendererSignal),
        // Audio
        Box::new(audio::AudioSignal),
        // Fonts
        Box::new(fonts::FontsSignal),
        // Hardware / OS
        Box::new(platform::UserAgentSignal),
        Box::new(platform::PlatformSignal),
        Box::new(platform::CpuModelSignal),
        Box::new(platform::CpuCountSignal),
        Box::new(platform::MemorySizeSignal),
        Box::new(platform::HostnameSignal),
        Box::new(platform::MachineIdSignal),
        // Locale
        Box::new(locale::TimezoneSignal),
        Box::new(locale::TimezoneOffsetSignal),
        Box::new(locale::LocaleSignal),
        // Display
        Box::new(display::ScreenResolutionSignal),
        Box::new(display::ColorDepthSignal),
    ]
}

/// Built-in signals that can operate on this machine, canonical order kept.
pub fn detect_available_signals() -> Vec<Box<dyn SignalSource>> {
    all_signals()
        .into_iter()
        .filter(|s| s.is_available())
        .collect()
}
