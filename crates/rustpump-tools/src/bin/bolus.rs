use clap::Parser;
use rustpump_core::services::bolus::{BolusRequest, COMMAND_BOLUS};
use rustpump_core::types::{DeviceFamily, Insulin};
use rustpump_tools::load_stroke_table;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pump-bolus")]
struct Args {
    /// Pump family (`23`) or model number (`523`).
    #[arg(long)]
    family: DeviceFamily,
    /// Requested amount in milliunits.
    #[arg(long, allow_negative_numbers = true)]
    amount: i32,
    /// JSON stroke table overriding the built-in stroke sizes.
    #[arg(long)]
    stroke_table: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let table = load_stroke_table(args.stroke_table.as_deref())?;
    let q = BolusRequest::new(Insulin(args.amount), args.family).quantize(&table)?;
    let payload = q.payload()?;
    if q.is_lossy() {
        println!("rounded {} U down to {} U", q.requested, q.actual);
    }
    println!(
        "command {COMMAND_BOLUS:02X} strokes {} payload {:02X?}",
        q.strokes,
        payload.as_bytes()
    );
    Ok(())
}
