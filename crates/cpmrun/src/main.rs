use cpmrun::{RunExit, RunOptions};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("Usage: cpmrun <program.com> [max-steps]");
            std::process::exit(2);
        }
    };

    let mut options = RunOptions::default();
    if let Some(raw) = args.next() {
        match raw.parse::<u64>() {
            Ok(steps) => options.max_steps = Some(steps),
            Err(_) => {
                eprintln!("invalid step budget: {raw}");
                std::process::exit(2);
            }
        }
    }

    match cpmrun::run_com(&rom_path, &options) {
        Ok(RunExit::Halted) => log::info!("program terminated"),
        Ok(RunExit::OutOfSteps) => log::info!("step budget exhausted"),
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    }
}
