//! Generate CONVERSIONS.md from the conversion registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-tables
//! ```
//!
//! The generated file is written to `civil_core/CONVERSIONS.md`.

use std::fs;
use std::path::Path;

use civil_core::conversions::registry;

fn main() {
    println!("Generating CONVERSIONS.md...");

    let markdown = registry().generate_markdown();

    // Relative to workspace root
    let output_path = Path::new("civil_core/CONVERSIONS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
