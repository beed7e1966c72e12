//! Display and graphics signals: screen geometry, color depth, GPU renderer.
//!
//! All three shell out to platform utilities and return empty strings when no
//! display stack is reachable (headless hosts, containers).

use crate::signal::{SignalInfo, SignalSource};

use super::helpers::{command_exists, line_value_after_colon, run_command};

static SCREEN_RESOLUTION_INFO: SignalInfo = SignalInfo {
    name: "screen_resolution",
    description: "Primary display resolution via xrandr or system_profiler",
    platform_requirements: &["display"],
};

/// Primary display resolution, e.g. `2560x1440`.
pub struct ScreenResolutionSignal;

impl SignalSource for ScreenResolutionSignal {
    fn info(&self) -> &SignalInfo {
        &SCREEN_RESOLUTION_INFO
    }

    fn is_available(&self) -> bool {
        (std::env::var_os("DISPLAY").is_some() && command_exists("xrandr"))
            || cfg!(target_os = "macos")
    }

    fn probe(&self) -> String {
        // xrandr header: "Screen 0: ... current 2560 x 1440, maximum ..."
        if let Some(out) = run_command("xrandr", &["--current"]) {
            if let Some(current) = out
                .lines()
                .find(|line| line.contains("current"))
                .and_then(|line| line.split("current").nth(1))
            {
                let dims: String = current
                    .split(',')
                    .next()
                    .unwrap_or("")
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                if !dims.is_empty() {
                    return dims;
                }
            }
        }
        run_command("system_profiler", &["SPDisplaysDataType"])
            .and_then(|out| line_value_after_colon(&out, "Resolution"))
            .unwrap_or_default()
    }
}

static COLOR_DEPTH_INFO: SignalInfo = SignalInfo {
    name: "color_depth",
    description: "Root window color depth via xdpyinfo",
    platform_requirements: &["display"],
};

/// Color depth of the root window in bits.
pub struct ColorDepthSignal;

impl SignalSource for ColorDepthSignal {
    fn info(&self) -> &SignalInfo {
        &COLOR_DEPTH_INFO
    }

    fn is_available(&self) -> bool {
        std::env::var_os("DISPLAY").is_some() && command_exists("xdpyinfo")
    }

    fn probe(&self) -> String {
        run_command("xdpyinfo", &[])
            .and_then(|out| line_value_after_colon(&out, "depth of root window"))
            .map(|v| v.trim_end_matches(" planes").to_string())
            .unwrap_or_default()
    }
}

static WEBGL_INFO: SignalInfo = SignalInfo {
    name: "webgl",
    description: "GPU renderer string via glxinfo, lspci, or system_profiler",
    platform_requirements: &["gpu"],
};

/// GPU renderer identification, the native analog of the WebGL debug info.
pub struct GpuRendererSignal;

impl SignalSource for GpuRendererSignal {
    fn info(&self) -> &SignalInfo {
        &WEBGL_INFO
    }

    fn is_available(&self) -> bool {
        command_exists("glxinfo") || command_exists("lspci") || cfg!(target_os = "macos")
    }

    fn probe(&self) -> String {
        if let Some(renderer) = run_command("glxinfo", &["-B"])
            .and_then(|out| line_value_after_colon(&out, "OpenGL renderer string"))
        {
            return renderer;
        }
        if let Some(out) = run_command("lspci", &[]) {
            let gpus: Vec<&str> = out
                .lines()
                .filter(|line| line.contains("VGA") || line.contains("3D controller"))
                .collect();
            if !gpus.is_empty() {
                return gpus.join("; ");
            }
        }
        run_command("system_profiler", &["SPDisplaysDataType"])
            .and_then(|out| line_value_after_colon(&out, "Chipset Model"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_probes_never_panic() {
        // Headless CI has no display stack; probes must degrade to "".
        let _ = ScreenResolutionSignal.probe();
        let _ = ColorDepthSignal.probe();
        let _ = GpuRendererSignal.probe();
    }

    #[test]
    fn test_availability_is_consistent() {
        if ColorDepthSignal.is_available() {
            // xdpyinfo present: a probe should yield a numeric depth.
            let value = ColorDepthSignal.probe();
            if !value.is_empty() {
                assert!(value.split_whitespace().next().unwrap().parse::<u32>().is_ok());
            }
        }
    }
}
