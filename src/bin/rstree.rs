//! Command-line interface for rstree
//! This binary is used to view / convert rs3 annotation documents.
//!
//! Usage:
//!   rstree show `<path>`       - Decode a flat document and print the tree
//!   rstree roundtrip `<path>`  - Decode then re-encode, printing the flat table

use clap::{Arg, Command};
use std::fs;
use std::path::Path;
use std::process;

use rstree::rs3::{render, Rs3Document};

fn main() {
    let matches = Command::new("rstree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and converting rs3 annotation documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .about("Decode a flat document and print the constituency tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the document (.json, .yaml or .yml)")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Decode a document and print the re-flattened table as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the document (.json, .yaml or .yml)")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("show", show_matches)) => {
            let path = show_matches.get_one::<String>("path").unwrap();
            handle_show_command(path);
        }
        Some(("roundtrip", roundtrip_matches)) => {
            let path = roundtrip_matches.get_one::<String>("path").unwrap();
            handle_roundtrip_command(path);
        }
        _ => unreachable!(),
    }
}

/// Handle the show command
fn handle_show_command(path: &str) {
    let tree = load_document(path).and_then(|doc| {
        doc.decode()
            .map_err(|err| format!("Error decoding '{}': {}", path, err))
    });
    match tree {
        Ok(tree) => print!("{}", render(&tree)),
        Err(message) => fail(&message),
    }
}

/// Handle the roundtrip command
fn handle_roundtrip_command(path: &str) {
    let result = load_document(path).and_then(|doc| {
        let tree = doc
            .decode()
            .map_err(|err| format!("Error decoding '{}': {}", path, err))?;
        let flat = Rs3Document::encode(&tree)
            .map_err(|err| format!("Error encoding '{}': {}", path, err))?;
        flat.to_json_string()
            .map_err(|err| format!("Error writing '{}': {}", path, err))
    });
    match result {
        Ok(json) => println!("{}", json),
        Err(message) => fail(&message),
    }
}

/// Load a document, picking the format from the file extension.
fn load_document(path: &str) -> Result<Rs3Document, String> {
    let content =
        fs::read_to_string(path).map_err(|err| format!("Error reading '{}': {}", path, err))?;
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    let parsed = match extension {
        "yaml" | "yml" => Rs3Document::from_yaml_str(&content),
        _ => Rs3Document::from_json_str(&content),
    };
    parsed.map_err(|err| format!("Error parsing '{}': {}", path, err))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
