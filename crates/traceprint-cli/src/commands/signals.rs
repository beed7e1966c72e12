use traceprint_core::all_signals;

use super::preview;

pub fn run(raw: bool) {
    let signals = all_signals();
    let available = signals.iter().filter(|s| s.is_available()).count();
    println!("{available}/{} signals available on this machine\n", signals.len());

    println!("  {:<20} {:>5}  {}", "Signal", "Avail", "Description");
    println!("  {}", "-".repeat(70));
    for signal in &signals {
        let mark = if signal.is_available() { "✓" } else { "✗" };
        println!(
            "  {:<20} {:>5}  {}",
            signal.name(),
            mark,
            signal.info().description
        );
        if raw && signal.is_available() {
            let value = signal.probe();
            let shown = if value.is_empty() {
                "(empty)".to_string()
            } else {
                preview(&value, 60)
            };
            println!("  {:<20}        raw: {shown}", "");
        }
    }
}
