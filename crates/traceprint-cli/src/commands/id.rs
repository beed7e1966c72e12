use traceprint_core::Fingerprinter;

pub fn run(adjust: bool, json: bool) {
    let engine = Fingerprinter::auto();
    log::debug!("{} signals available", engine.signal_count());

    if adjust {
        if let Err(e) = engine.adjust_weights() {
            eprintln!("weight adjustment skipped: {e}");
        }
    }

    let id = engine.generate_visitor_id();

    if json {
        let report = engine.signal_report();
        let out = serde_json::json!({
            "visitor_id": id,
            "weights": engine.weights(),
            "signals": report,
        });
        println!("{}", serde_json::to_string_pretty(&out).expect("report serializes"));
        return;
    }

    println!("{id}");
}
