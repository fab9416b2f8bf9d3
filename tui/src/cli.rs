//! Running a simulation without the TUI.

use crate::args::Args;
use casim_lib::PolyOutput;
use log::info;
use std::{error::Error, fs, path::Path};

/// Writes the output record. The format is chosen by the extension.
fn write_output(path: &Path, output: &PolyOutput) -> Result<(), Box<dyn Error>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let text = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::to_string(output)?,
        Some("json") | None => serde_json::to_string(output)?,
        Some(other) => return Err(format!("unknown output format: .{}", other).into()),
    };
    fs::write(path, text)?;
    info!("Output written to {}.", path.display());
    Ok(())
}

/// Runs the simulation as the arguments say.
pub(crate) fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let Args {
        mut simulation,
        steps,
        trace,
        all,
        output,
        ..
    } = args;

    #[cfg(feature = "tui")]
    {
        if args.live {
            crate::tui::run_with_tui(simulation, steps, args.interval)?;
            return Ok(());
        }
    }

    let result = if all {
        println!("Generation 0:\n{}", simulation.plaintext());
        simulation.run_with(steps, trace, |generation, text| {
            println!("Generation {}:\n{}", generation, text)
        })
    } else {
        let result = simulation.run(steps, trace);
        println!("{}", simulation.plaintext());
        result
    };

    if let Some(path) = output {
        write_output(&path, &result)?;
    }
    Ok(())
}
