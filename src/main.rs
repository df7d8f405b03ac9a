use clap::Parser;
use ssa_calc::api::{Cli, run};

fn main() {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
