//! Loading commented JSON straight into a typed config struct.
//!
//! Run with: cargo run --example typed_config

use jsonc_include::from_str;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct AppConfig {
    name: String,
    listen: Listen,
    features: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Listen {
    host: String,
    port: u16,
}

fn main() -> Result<(), Box<dyn Error>> {
    let text = r#"{
        "name": "demo-service",
        // where to accept connections
        "listen": {
            "host": "127.0.0.1",
            "port": 8080, /* dev default, override in prod */
        },
        "features": [
            "metrics",
            "reload", // hot reload of this very file
        ],
    }"#;

    let config: AppConfig = from_str(text)?;
    println!("Loaded config: {:#?}", config);

    assert_eq!(config.listen.port, 8080);
    assert_eq!(config.features.len(), 2);
    println!("✓ Comments and trailing commas handled");

    Ok(())
}
