use anyhow::{Context, Result};
use cpmrun_8080::{Console, Machine};
use std::io::Write;

pub use cpmrun_8080::RunExit;

/// Console sink that forwards BDOS output bytes straight to stdout.
///
/// Output is raw bytes, not guaranteed UTF-8, and is flushed per byte so
/// partial lines appear as the program produces them. A failed write (e.g.
/// a closed pipe) is not the emulated program's problem and is dropped.
struct StdoutConsole {
    out: std::io::Stdout,
}

impl Console for StdoutConsole {
    fn put_byte(&mut self, byte: u8) {
        let _ = self.out.write_all(&[byte]);
        let _ = self.out.flush();
    }
}

/// Options for a single emulator run.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Stop after this many instructions; `None` runs until termination.
    pub max_steps: Option<u64>,
}

/// Load and run a CP/M `.COM` image. Returns how the run ended.
pub fn run_com(rom_path: &str, options: &RunOptions) -> Result<RunExit> {
    let image = std::fs::read(rom_path).with_context(|| format!("failed to read {rom_path}"))?;

    let mut machine = Machine::new(StdoutConsole {
        out: std::io::stdout(),
    });
    machine.load_image(&image)?;
    log::info!("loaded {} bytes from {} at 0x0100", image.len(), rom_path);

    let exit = machine.run(options.max_steps)?;
    Ok(exit)
}
