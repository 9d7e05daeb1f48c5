use canwire_codec::{parse_frame, Frame};
use canwire_transport::{connect, CanDevice};
use tracing::info;

use crate::cmd::SendArgs;
use crate::exit::{codec_error, transport_error, CliResult, SUCCESS};
use crate::output::{print_frame, report_warnings, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let parsed =
        parse_frame(&args.frame).map_err(|err| codec_error("invalid frame descriptor", err))?;
    report_warnings(&parsed.warnings);

    if args.dry_run {
        print_frame(&parsed.frame, &args.interface, format);
        return Ok(SUCCESS);
    }

    let mut device =
        connect(&args.interface).map_err(|err| transport_error("connect failed", err))?;
    transmit(device.as_mut(), &parsed.frame)
}

fn transmit(device: &mut dyn CanDevice, frame: &Frame) -> CliResult<i32> {
    device
        .write_frame(frame)
        .map_err(|err| transport_error("send failed", err))?;
    info!(
        interface = device.interface(),
        id = frame.id,
        dlc = frame.dlc(),
        "frame transmitted"
    );
    Ok(SUCCESS)
}
