// Copyright 2025 Cowboy AI, LLC.

//! Wire two pipelines, show their structure, then push them.
//!
//! Run with `cargo run --example push_pipeline`.

use cim_chain::{sentinel, source, Bind, ChainConfig, SentinelBind, Source};

fn main() -> anyhow::Result<()> {
    println!("The application has started");

    // Keep the head of the chain: pushing starts there, not at the end.
    let program = Source::with_config(1, ChainConfig::named("reciprocal"));
    program
        .bind(|x: i32, out| out.emit_value(x + 2))
        .bind(|x: i32, out| {
            if x == 0 {
                out.emit_absent()
            } else {
                out.emit_value(1.0 / f64::from(x))
            }
        })
        .to_output(
            |x| println!("Final result is {x}."),
            || println!("Final result is nothing."),
        );
    print!("{}", program.describe());
    program.run()?;

    let program = sentinel::source(42);
    program
        .bind_sentinel(|x| x * 10 + 1)
        .bind_sentinel(|x| if x == 0 { -1 } else { 1000 / x })
        .to_sentinel_output(|x| println!("{x}"));
    print!("{}", program.describe());
    program.run()?;

    let program = source(-2);
    program
        .bind(|x: i32, out| out.emit_value(x + 2))
        .bind(|x: i32, out| {
            if x == 0 {
                out.emit_absent()
            } else {
                out.emit_value(1.0 / f64::from(x))
            }
        })
        .to_output(
            |x| println!("Final result is {x}."),
            || println!("Final result is nothing."),
        );
    program.run()?;

    println!("The application has finished");
    Ok(())
}
