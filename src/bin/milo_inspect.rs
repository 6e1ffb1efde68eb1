use std::path::PathBuf;

use milo_tools::container::Container;
use milo_tools::mesh::model::Mesh;

// The mesh chunk's position is an asset-specific convention, not discovered
// from the file; segment 1 is where the tested assets keep it.
const DEFAULT_MESH_SEGMENT: usize = 1;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage:");
        eprintln!("  milo_inspect <container> [segment]");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  milo_inspect ./test.milo_ps3");
        eprintln!("  milo_inspect ./test.milo_ps3 3");
        std::process::exit(1);
    }

    let container_path = PathBuf::from(&args[1]);
    let segment = match args.get(2) {
        Some(raw) => match raw.parse::<usize>() {
            Ok(index) => index,
            Err(_) => {
                eprintln!("Invalid segment index: {raw}");
                std::process::exit(1);
            }
        },
        None => DEFAULT_MESH_SEGMENT,
    };

    let bytes = match std::fs::read(&container_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read '{}': {e}", container_path.display());
            std::process::exit(1);
        }
    };

    let container = Container::split(&bytes);
    eprintln!(
        "{}: {} bytes, {} segments",
        container_path.display(),
        bytes.len(),
        container.len()
    );

    let payload = match container.segment(segment) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mesh = match Mesh::from_bytes(payload) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Segment {segment} did not decode as a mesh: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&mesh) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize mesh: {e}");
            std::process::exit(1);
        }
    }
}
