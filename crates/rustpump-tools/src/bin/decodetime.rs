use chrono::Local;
use clap::Parser;
use rustpump_core::encoding::localize;
use rustpump_core::types::TimeOfDay;
use rustpump_tools::{parse_hex, PackedFormatArg};

#[derive(Parser, Debug)]
#[command(name = "pump-decodetime")]
struct Args {
    #[arg(long, value_enum, default_value_t = PackedFormatArg::Full)]
    format: PackedFormatArg,
    /// Packed bytes as hex, e.g. `75 B7 13 04 10`.
    #[arg(required = true)]
    hex: Vec<String>,
    /// Resolve the timestamp in the host time zone.
    #[arg(long)]
    local: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let format = args.format.into_format();
    let bytes = parse_hex(&args.hex.join(" "))?;
    let t = format.decode(&bytes)?;
    if args.local {
        println!("{}", localize(&t, &Local)?.to_rfc3339());
    } else {
        println!("{}", t.format("%Y-%m-%dT%H:%M:%S"));
    }
    println!("time of day {}", TimeOfDay::since_midnight(&t));
    Ok(())
}
