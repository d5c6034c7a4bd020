//! Headless terrain pathfinding demo.
//!
//! Run: cargo run --bin relief -- --algorithm dijkstra --threshold 45

use std::io::Write;

use relief_demos::{Args, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{}", relief_demos::USAGE);
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprint!("{}", relief_demos::USAGE);
            std::process::exit(2);
        }
    };

    match run(&args) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
