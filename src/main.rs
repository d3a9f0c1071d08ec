mod cli;

use std::process;

use clap::Parser;
use mathexpr::Engine;

use crate::cli::Cli;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let engine = Engine::new();

    match engine.evaluate(&cli.expression, &cli.args) {
        Ok(result) => println!("{result}"),
        Err(why) => {
            eprintln!("{why}");
            process::exit(1);
        }
    }
}
