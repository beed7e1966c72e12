//! Hardware and OS signals: kernel identification, CPU, memory, host names.
//!
//! These are the stable, low-entropy facets of a device. Individually they
//! discriminate poorly; combined under the weight table they anchor the
//! identifier when the high-entropy probes (canvas, webgl, audio) are
//! unavailable.

use std::ffi::CStr;

use crate::signal::{SignalInfo, SignalSource};

use super::helpers::{line_value_after_colon, read_trimmed, run_command};

/// `uname` fields joined into one identification string.
fn uname_string() -> String {
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: uname only writes into the struct we hand it and reports
    // failure through its return value.
    if unsafe { libc::uname(&mut uts) } != 0 {
        return String::new();
    }

    // SAFETY: on success every utsname field is a NUL-terminated C string.
    let field = |raw: &[libc::c_char]| unsafe {
        CStr::from_ptr(raw.as_ptr()).to_string_lossy().into_owned()
    };

    format!(
        "{} {} {} {}",
        field(&uts.sysname),
        field(&uts.release),
        field(&uts.version),
        field(&uts.machine),
    )
}

static USER_AGENT_INFO: SignalInfo = SignalInfo {
    name: "user_agent",
    description: "Kernel name, release, version, and machine from uname",
    platform_requirements: &[],
};

/// Full kernel identification, the native analog of a browser user agent.
pub struct UserAgentSignal;

impl SignalSource for UserAgentSignal {
    fn info(&self) -> &SignalInfo {
        &USER_AGENT_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        uname_string()
    }
}

static PLATFORM_INFO: SignalInfo = SignalInfo {
    name: "platform",
    description: "Operating system family and CPU architecture",
    platform_requirements: &[],
};

/// Coarse platform tag, e.g. `linux/x86_64`.
pub struct PlatformSignal;

impl SignalSource for PlatformSignal {
    fn info(&self) -> &SignalInfo {
        &PLATFORM_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
    }
}

static CPU_MODEL_INFO: SignalInfo = SignalInfo {
    name: "cpu_model",
    description: "CPU brand string from /proc/cpuinfo or sysctl",
    platform_requirements: &[],
};

/// CPU brand string.
pub struct CpuModelSignal;

impl SignalSource for CpuModelSignal {
    fn info(&self) -> &SignalInfo {
        &CPU_MODEL_INFO
    }

    fn is_available(&self) -> bool {
        std::path::Path::new("/proc/cpuinfo").exists() || cfg!(target_os = "macos")
    }

    fn probe(&self) -> String {
        if let Some(cpuinfo) = read_trimmed("/proc/cpuinfo") {
            if let Some(model) = line_value_after_colon(&cpuinfo, "model name") {
                return model;
            }
        }
        run_command("sysctl", &["-n", "machdep.cpu.brand_string"])
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

static CPU_COUNT_INFO: SignalInfo = SignalInfo {
    name: "cpu_count",
    description: "Number of logical CPUs",
    platform_requirements: &[],
};

/// Logical CPU count.
pub struct CpuCountSignal;

impl SignalSource for CpuCountSignal {
    fn info(&self) -> &SignalInfo {
        &CPU_COUNT_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        std::thread::available_parallelism()
            .map(|n| n.get().to_string())
            .unwrap_or_default()
    }
}

static MEMORY_SIZE_INFO: SignalInfo = SignalInfo {
    name: "memory_size",
    description: "Physical memory rounded to whole GiB",
    platform_requirements: &[],
};

/// Physical memory size in whole GiB.
///
/// Rounded so minor kernel-reserved differences across boots don't shift the
/// identifier.
pub struct MemorySizeSignal;

impl SignalSource for MemorySizeSignal {
    fn info(&self) -> &SignalInfo {
        &MEMORY_SIZE_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        // SAFETY: sysconf is always safe to call; unsupported names yield -1.
        let pages = unsafe { libc::sysconf(libc::_SC_PHYS_PAGES) };
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGE_SIZE) };
        if pages <= 0 || page_size <= 0 {
            return String::new();
        }
        let bytes = pages as u128 * page_size as u128;
        let gib = (bytes as f64 / (1u64 << 30) as f64).round() as u64;
        format!("{gib}GiB")
    }
}

static HOSTNAME_INFO: SignalInfo = SignalInfo {
    name: "hostname",
    description: "Machine hostname",
    platform_requirements: &[],
};

/// Hostname via `gethostname`.
pub struct HostnameSignal;

impl SignalSource for HostnameSignal {
    fn info(&self) -> &SignalInfo {
        &HOSTNAME_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn probe(&self) -> String {
        let mut buf = [0 as libc::c_char; 256];
        // SAFETY: gethostname writes at most buf.len() bytes and
        // NUL-terminates on success.
        if unsafe { libc::gethostname(buf.as_mut_ptr(), buf.len()) } != 0 {
            return String::new();
        }
        unsafe { CStr::from_ptr(buf.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }
}

static MACHINE_ID_INFO: SignalInfo = SignalInfo {
    name: "machine_id",
    description: "OS machine identifier (/etc/machine-id or IOPlatformUUID)",
    platform_requirements: &[],
};

/// Persistent OS-level machine identifier, where one exists.
pub struct MachineIdSignal;

impl SignalSource for MachineIdSignal {
    fn info(&self) -> &SignalInfo {
        &MACHINE_ID_INFO
    }

    fn is_available(&self) -> bool {
        std::path::Path::new("/etc/machine-id").exists()
            || std::path::Path::new("/var/lib/dbus/machine-id").exists()
            || cfg!(target_os = "macos")
    }

    fn probe(&self) -> String {
        if let Some(id) = read_trimmed("/etc/machine-id") {
            return id;
        }
        if let Some(id) = read_trimmed("/var/lib/dbus/machine-id") {
            return id;
        }
        // ioreg prints: "IOPlatformUUID" = "XXXXXXXX-...."
        run_command("ioreg", &["-rd1", "-c", "IOPlatformExpertDevice"])
            .and_then(|out| {
                out.lines()
                    .find(|line| line.contains("IOPlatformUUID"))
                    .and_then(|line| line.rsplit('=').next())
                    .map(|v| v.trim().trim_matches('"').to_string())
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_probe_nonempty() {
        assert!(!UserAgentSignal.probe().is_empty());
    }

    #[test]
    fn test_platform_probe_format() {
        let value = PlatformSignal.probe();
        assert!(value.contains('/'));
    }

    #[test]
    fn test_cpu_count_parses_as_integer() {
        let value = CpuCountSignal.probe();
        assert!(value.parse::<usize>().unwrap() >= 1);
    }

    #[test]
    fn test_memory_size_suffix() {
        let value = MemorySizeSignal.probe();
        if !value.is_empty() {
            assert!(value.ends_with("GiB"));
        }
    }

    #[test]
    fn test_probes_are_stable_within_process() {
        assert_eq!(UserAgentSignal.probe(), UserAgentSignal.probe());
        assert_eq!(HostnameSignal.probe(), HostnameSignal.probe());
        assert_eq!(MachineIdSignal.probe(), MachineIdSignal.probe());
    }
}
