use afl::fuzz;
use rusty_promql_fmt::{CheckOptions, analyze};

fn main() {
    let options = CheckOptions::default();
    fuzz!(|data: &[u8]| {
        if let Ok(s) = std::str::from_utf8(data) {
            let _ = analyze(s, &options);
            let _ = analyze(&format!("expr: {}", s), &options);
        }
    });
}
