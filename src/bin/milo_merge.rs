use std::io::Write;
use std::path::PathBuf;

use milo_tools::merge::merge_paths;

const DEFAULT_MESH_SEGMENT: usize = 1;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage:");
        eprintln!("  milo_merge <container> <geometry.obj> <output> [segment]");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  milo_merge ./test.milo_ps3 ./remesh.obj ./out.milo_ps3");
        eprintln!("  milo_merge ./test.milo_ps3 ./remesh.obj ./out.milo_ps3 3");
        std::process::exit(1);
    }

    let container_path = PathBuf::from(&args[1]);
    let obj_path = PathBuf::from(&args[2]);
    let output_path = PathBuf::from(&args[3]);
    let segment = match args.get(4) {
        Some(raw) => match raw.parse::<usize>() {
            Ok(index) => index,
            Err(_) => {
                eprintln!("Invalid segment index: {raw}");
                std::process::exit(1);
            }
        },
        None => DEFAULT_MESH_SEGMENT,
    };

    let merged = match merge_paths(&container_path, &obj_path, segment) {
        Ok(merged) => merged,
        Err(e) => {
            eprintln!("Merge failed: {e:#}");
            std::process::exit(1);
        }
    };

    // Stage next to the destination, persist only on success, so a failed
    // run never leaves a half-written container behind.
    if let Err(e) = write_staged(&output_path, &merged) {
        eprintln!("Failed to write '{}': {e:#}", output_path.display());
        std::process::exit(1);
    }

    eprintln!(
        "Wrote {} bytes to '{}' (segment {})",
        merged.len(),
        output_path.display(),
        segment
    );
}

fn write_staged(output_path: &std::path::Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = output_path.parent().unwrap_or_else(|| std::path::Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.persist(output_path)?;
    Ok(())
}
