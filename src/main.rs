use std::error::Error;
use std::path::Path;

mod report;
mod run;
mod scan;
mod tags;

use run::{AUDIO_DIR, Capabilities, OUTPUT_PATH, Outcome};

fn main() -> Result<(), Box<dyn Error>> {
    let caps = Capabilities::detect();

    match run::run(Path::new(AUDIO_DIR), Path::new(OUTPUT_PATH), &caps)? {
        Outcome::Written { path, .. } => {
            println!("YAML written to {}", path.display());
        }
        Outcome::WriterMissing => {
            println!("serde_yaml is not available. Add it to Cargo.toml and rebuild to write the report.");
        }
    }

    Ok(())
}
