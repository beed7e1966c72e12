pub mod id;
pub mod signals;
pub mod weights;

/// Truncate a raw value for one-line display.
pub fn preview(value: &str, max: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{cut}…")
    }
}
