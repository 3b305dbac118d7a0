
use std::time::Instant;

use xshell::{cmd, Shell};

fn main() -> xshell::Result<()> {
    let sh = Shell::new()?;

    step("BUILD", || cmd!(sh, "cargo test --workspace --no-run").run())?;
    step("TEST", || cmd!(sh, "cargo test --workspace -- --nocapture").run())?;
    step("DEMO", || {
        cmd!(sh, "cargo run --example serve -- serve 8080 --verbose").run()?;
        cmd!(sh, "cargo run --example serve -- fetch --help").run()?;
        let bad = cmd!(sh, "cargo run -q --example serve -- serve").ignore_status().output()?;
        assert!(!bad.status.success(), "missing port must exit non-zero");
        Ok(())
    })?;

    Ok(())
}

/// Runs `f` inside a collapsible CI log group and reports how long it took.
fn step(name: &str, f: impl FnOnce() -> xshell::Result<()>) -> xshell::Result<()> {
    println!("::group::{name}");
    let start = Instant::now();
    let res = f();
    eprintln!("{name}: {:.2?}", start.elapsed());
    println!("::endgroup::");
    res
}
