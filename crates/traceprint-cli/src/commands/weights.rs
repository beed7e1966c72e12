use std::collections::BTreeMap;

use traceprint_core::Fingerprinter;

pub fn run(set: &[String], adjust: bool, json: bool) {
    let engine = Fingerprinter::auto();

    if !set.is_empty() {
        let partial = match parse_entries(set) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        };
        if let Err(e) = engine.set_weights(&partial) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    if adjust {
        if let Err(e) = engine.adjust_weights() {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    let table = engine.weights();
    if json {
        println!("{}", serde_json::to_string_pretty(&table).expect("table serializes"));
        return;
    }

    println!("  {:<20} {:>8}", "Signal", "Weight");
    println!("  {}", "-".repeat(30));
    for (name, weight) in table.iter() {
        println!("  {name:<20} {weight:>8.4}");
    }
    println!("  {}", "-".repeat(30));
    println!("  {:<20} {:>8.4}", "sum", table.sum());
}

fn parse_entries(set: &[String]) -> Result<BTreeMap<String, f64>, String> {
    let mut partial = BTreeMap::new();
    for entry in set {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=WEIGHT, got {entry:?}"))?;
        let weight: f64 = value
            .parse()
            .map_err(|_| format!("weight in {entry:?} is not a number"))?;
        partial.insert(name.to_string(), weight);
    }
    Ok(partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let parsed = parse_entries(&["canvas=0.5".to_string(), "audio=0".to_string()]).unwrap();
        assert_eq!(parsed.get("canvas"), Some(&0.5));
        assert_eq!(parsed.get("audio"), Some(&0.0));
    }

    #[test]
    fn test_parse_entries_rejects_garbage() {
        assert!(parse_entries(&["canvas".to_string()]).is_err());
        assert!(parse_entries(&["canvas=abc".to_string()]).is_err());
    }
}
