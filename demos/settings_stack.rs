//! Layering settings files with include directives.
//!
//! A local settings file includes shared defaults; everything it states
//! itself wins, everything else comes from the included file.
//!
//! Run with: cargo run --example settings_stack

use jsonc_include::{from_file_with_options, LoadOptions, Value};
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;

    fs::write(
        dir.path().join("defaults.json"),
        r#"{
            // fleet-wide defaults
            "log_level": "info",
            "workers": 4,
            "limits": {"max_body_kb": 512, "timeout_s": 30}
        }"#,
    )?;

    fs::write(
        dir.path().join("local.json"),
        r#"{
            "log_level": "debug", // noisy while developing
            "limits": {"timeout_s": 5},
            "_include_json": "defaults.json",
        }"#,
    )?;

    let options = LoadOptions::new().with_remove_include_keys(true);
    let settings: Value = from_file_with_options(dir.path().join("local.json"), &options)?;

    println!("{}", jsonc_include::to_string_pretty(&settings)?);

    assert_eq!(settings["log_level"], "debug");
    assert_eq!(settings["workers"], 4);
    assert_eq!(settings["limits"]["timeout_s"], 5);
    assert_eq!(settings["limits"]["max_body_kb"], 512);
    println!("✓ Local values win, defaults fill the gaps");

    Ok(())
}
