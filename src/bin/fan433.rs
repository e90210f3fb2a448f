use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use fan433::catalog::{self, FanSpeed, Remote};
use fan433::consts::DEFAULT_REPEAT;
use fan433::delay::SpinDelay;
use fan433::pin::{HalPin, PinDriver};
use fan433::transmitter::Transmitter;
use linux_embedded_hal::CdevPin;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use log::{debug, info};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[clap(about = "Send ceiling fan remote commands on a 433 MHz transmitter")]
struct Opts {
    /// More output; repeat for pulse level detail
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the known commands
    List,
    /// Send a command by name
    Send {
        /// Command name, e.g. fan-low or LIGHT_TOGGLE
        name: String,
        #[clap(flatten)]
        tx: TxOpts,
    },
    /// Set a fan speed from a percentage
    Fan {
        #[clap(value_enum)]
        remote: RemoteArg,
        /// Rotation speed, 0-100
        percent: u8,
        #[clap(flatten)]
        tx: TxOpts,
    },
    /// Toggle a remote's light
    Light {
        #[clap(value_enum)]
        remote: RemoteArg,
        #[clap(flatten)]
        tx: TxOpts,
    },
}

#[derive(clap::Args)]
struct TxOpts {
    /// Number of frames to send
    #[clap(long, default_value_t = DEFAULT_REPEAT)]
    repeat: u8,
    /// GPIO character device of the TX line
    #[clap(long, default_value = "/dev/gpiochip0")]
    chip: PathBuf,
    /// Line offset of the TX pin on `--chip` (the BCM number on a Raspberry Pi); without it
    /// edges are only logged
    #[clap(long)]
    gpio: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RemoteArg {
    Downstairs,
    Upstairs,
}

impl From<RemoteArg> for Remote {
    fn from(arg: RemoteArg) -> Self {
        match arg {
            RemoteArg::Downstairs => Remote::Downstairs,
            RemoteArg::Upstairs => Remote::Upstairs,
        }
    }
}

/// Logs edges instead of driving hardware.
struct DryRunPin {
    start: Option<Instant>,
    edges: usize,
}

impl DryRunPin {
    fn new() -> Self {
        Self {
            start: None,
            edges: 0,
        }
    }

    fn edge(&mut self, level: &str) {
        let start = *self.start.get_or_insert_with(Instant::now);
        self.edges += 1;
        log::trace!("{:>9.3} ms {}", start.elapsed().as_secs_f64() * 1e3, level);
    }
}

impl PinDriver for DryRunPin {
    type Error = Infallible;

    fn configure(&mut self) -> Result<(), Infallible> {
        debug!("dry run: no pin configured");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.edge("high");
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.edge("low");
        Ok(())
    }

    fn release(&mut self) -> Result<(), Infallible> {
        info!("dry run: {} edges", self.edges);
        Ok(())
    }
}

/// Requests `line` on `chip` as an output, initially low.
fn open_line(chip: &Path, line: u32) -> Result<HalPin<CdevPin>> {
    let mut chip = Chip::new(chip).with_context(|| format!("opening {}", chip.display()))?;
    let handle = chip
        .get_line(line)
        .and_then(|l| l.request(LineRequestFlags::OUTPUT, 0, "fan433"))
        .with_context(|| format!("requesting line {line} as output"))?;
    let pin = CdevPin::new(handle).context("wrapping the line handle")?;
    debug!("requested line {}", line);
    Ok(HalPin::new(pin))
}

fn send(command: &catalog::Command, opts: &TxOpts) -> Result<()> {
    if opts.repeat == 0 {
        bail!("--repeat must be at least 1");
    }
    let started = Instant::now();
    let report = match opts.gpio {
        Some(line) => Transmitter::new(open_line(&opts.chip, line)?, SpinDelay::default())
            .transmit_command(command, opts.repeat)
            .with_context(|| format!("sending {} on line {}", command.name, line))?,
        None => Transmitter::new(DryRunPin::new(), SpinDelay::default())
            .transmit_command(command, opts.repeat)
            .with_context(|| format!("sending {} (dry run)", command.name))?,
    };
    info!(
        "sent {} ({} repeats) in {:.1} ms",
        command.name,
        report.repeats_sent,
        started.elapsed().as_secs_f64() * 1e3
    );
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let level = match opts.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match &opts.command {
        Command::List => {
            for command in catalog::ALL {
                println!("{:<14} {:>2} symbols", command.name, command.symbols.len());
            }
            Ok(())
        }
        Command::Send { name, tx } => {
            let command = catalog::lookup(name)
                .with_context(|| format!("unknown command {name:?}, see `fan433 list`"))?;
            send(command, tx)
        }
        Command::Fan {
            remote,
            percent,
            tx,
        } => {
            let speed = FanSpeed::from_percent(*percent)?;
            let command = Remote::from(*remote).fan(speed);
            debug!("{}% -> {:?}", percent, speed);
            send(command, tx)
        }
        Command::Light { remote, tx } => send(Remote::from(*remote).light_toggle(), tx),
    }
}
