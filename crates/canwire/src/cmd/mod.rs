use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod devices;
pub mod doctor;
pub mod listen;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a frame descriptor and transmit it.
    Send(SendArgs),
    /// Listen and print received frames.
    Listen(ListenArgs),
    /// List CAN interfaces on this host.
    Devices(DevicesArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Listen(args) => listen::run(args, format),
        Command::Devices(args) => devices::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// CAN interface to transmit on (e.g. can0, vcan0).
    pub interface: String,
    /// Frame descriptor: <id>#<hex-pairs>, <id>##<hex-pairs> (FD), or <id>#R (remote).
    pub frame: String,
    /// Parse and print the frame without opening a device.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// CAN interface to listen on.
    pub interface: String,
    /// Only print frames with these identifiers (comma-separated, decimal).
    #[arg(long, value_delimiter = ',')]
    pub id: Option<Vec<u32>>,
    /// Exit after printing N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct DevicesArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}
