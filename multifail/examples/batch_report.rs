//! Run a handful of independent checks and report every failure at once.
//!
//! `RUST_LOG=multifail=debug cargo run --example batch_report --features tracing`
use multifail::{Failure, RootFailure, raise_if_any};
use tracing_subscriber::EnvFilter;

fn check(name: &str, ok: bool) -> Result<(), Failure> {
    if ok {
        Ok(())
    } else {
        Err(Failure::new(format!("{name} check failed")))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Run every check; collect the failures instead of stopping at the first.
    let checks = [("disk", false), ("network", true), ("clock", false)];
    let mut failures: Vec<Failure> = checks
        .iter()
        .filter_map(|(name, ok)| check(name, *ok).err())
        .collect();
    failures.push(Failure::Root(RootFailure::anonymous()));

    // 2. Collapse them into one error.
    let Err(err) = raise_if_any(Some("preflight"), failures) else {
        println!("all checks passed");
        return;
    };

    // 3. A plain "caused by" walk shows every individual failure.
    for (depth, e) in err.chain().enumerate() {
        println!("{:indent$}{e}", "", indent = depth * 2);
    }

    // 4. Or hand a serializable snapshot to something else.
    match serde_json::to_string_pretty(&err.report()) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("could not serialize report: {e}"),
    }
}
