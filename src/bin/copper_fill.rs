//! CLI for running a pattern fill on a board exported to JSON
//!
//! Usage:
//!   cargo run --release --bin copper_fill -- <board.json> [options]
//!
//! Options:
//!   --config <file>     Fill settings as JSON (fields of `FillConfig`)
//!   --classes <file>    Board class clearance table
//!   --layer <name>      Target copper layer
//!   --kind <circle|square>
//!   --size <mm>  --density <percent>  --clearance <mm>
//!   --shift-x <mm>  --shift-y <mm>  --class <n>  --workers <n>
//!   --dedupe            Drop duplicate outlines from section overlaps
//!   --out <file>        Write outlines as JSON
//!   --summary           Print the report as JSON

use anyhow::{bail, Context};
use std::env;
use std::fs::File;
use std::io::BufWriter;

use copper_filler::{init_logging, run_fill, BoardClasses, FillConfig, FillContext, JsonBoard};

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> anyhow::Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .with_context(|| format!("{} expects a value", flag))
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <board.json> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --config <file>          Fill settings as JSON");
        eprintln!("  --classes <file>         Board class clearance table");
        eprintln!("  --layer <name>           Target copper layer (default F.Cu)");
        eprintln!("  --kind <circle|square>   Element shape");
        eprintln!("  --size <mm>              Element size");
        eprintln!("  --density <percent>      Fill density");
        eprintln!("  --clearance <mm>         Board margin");
        eprintln!("  --shift-x <mm>           Grid shift along x");
        eprintln!("  --shift-y <mm>           Grid shift along y");
        eprintln!("  --class <n>              Board class (1-based)");
        eprintln!("  --workers <n>            Worker threads");
        eprintln!("  --dedupe                 Drop duplicate outlines from overlaps");
        eprintln!("  --out <file>             Write outlines as JSON");
        eprintln!("  --summary                Print the run report");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} board.json --summary", args[0]);
        eprintln!("  {} board.json --layer B.Cu --kind circle --size 1.2 --out fill.json", args[0]);
        return Ok(());
    }

    init_logging()?;

    let board_path = &args[1];
    let mut config_path: Option<String> = None;
    let mut classes_path: Option<String> = None;
    let mut overrides: Vec<(String, String)> = Vec::new();
    let mut dedupe = false;
    let mut out_path: Option<String> = None;
    let mut summary = false;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" => {
                i += 1;
                config_path = Some(value(&args, i, flag)?.to_string());
            }
            "--classes" => {
                i += 1;
                classes_path = Some(value(&args, i, flag)?.to_string());
            }
            "--out" => {
                i += 1;
                out_path = Some(value(&args, i, flag)?.to_string());
            }
            "--layer" | "--kind" | "--size" | "--density" | "--clearance" | "--shift-x"
            | "--shift-y" | "--class" | "--workers" => {
                i += 1;
                overrides.push((flag.to_string(), value(&args, i, flag)?.to_string()));
            }
            "--dedupe" => dedupe = true,
            "--summary" => summary = true,
            other => bail!("unknown option '{}'", other),
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => FillConfig::from_json_file(path)?,
        None => FillConfig::default(),
    };
    for (flag, raw) in &overrides {
        let parse_err = || format!("invalid value '{}' for {}", raw, flag);
        match flag.as_str() {
            "--layer" => config.layer_name = raw.clone(),
            "--kind" => config.kind = raw.parse()?,
            "--size" => config.size_mm = raw.parse().with_context(parse_err)?,
            "--density" => config.density = raw.parse().with_context(parse_err)?,
            "--clearance" => config.clearance_mm = raw.parse().with_context(parse_err)?,
            "--shift-x" => config.shift_x_mm = raw.parse().with_context(parse_err)?,
            "--shift-y" => config.shift_y_mm = raw.parse().with_context(parse_err)?,
            "--class" => config.class_index = raw.parse().with_context(parse_err)?,
            "--workers" => config.workers = Some(raw.parse().with_context(parse_err)?),
            _ => {}
        }
    }
    config.dedupe_overlap |= dedupe;

    let classes = match &classes_path {
        Some(path) => BoardClasses::from_json_file(path)?,
        None => BoardClasses::default(),
    };
    let config = config.clamped(&classes);

    eprintln!("Loading: {}", board_path);
    let board = JsonBoard::from_file(board_path)?;

    let mut ctx = FillContext::new().with_progress(|percent, message| {
        eprintln!("[{:>3}%] {}", percent, message);
    });
    let output = match run_fill(&board, &config, &mut ctx) {
        Ok(output) => output,
        Err(err) if err.is_cancellation() => {
            eprintln!("Fill cancelled");
            return Ok(());
        }
        Err(err) => return Err(err).context("fill failed"),
    };

    eprintln!(
        "Accepted {} of {} candidates ({:.1}%), {} outlines",
        output.report.accepted,
        output.report.generated,
        output.report.accepted_percent(),
        output.outlines.len()
    );

    if let Some(path) = &out_path {
        let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
        serde_json::to_writer(BufWriter::new(file), &output.outlines)
            .with_context(|| format!("failed to write {}", path))?;
        eprintln!("Wrote {}", path);
    }

    if summary {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
    }

    Ok(())
}
