use clap::Parser;
use rustpump_core::types::TimeOfDay;

#[derive(Parser, Debug)]
#[command(name = "pump-timeofday")]
struct Args {
    /// Schedule times in HH:MM form.
    #[arg(required = true)]
    times: Vec<TimeOfDay>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    for t in args.times {
        match t.half_hours() {
            Some(n) => println!("{t} half-hour {n}"),
            None => println!("{t} (not on a half-hour boundary)"),
        }
    }
    Ok(())
}
