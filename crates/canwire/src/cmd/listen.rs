use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use canwire_codec::Frame;
use canwire_transport::{connect, CanDevice};

use crate::cmd::ListenArgs;
use crate::exit::{transport_error, CliError, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

/// How long one receive wait may block before the shutdown flag is
/// re-checked. Bounds Ctrl-C latency on an idle bus.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let mut device =
        connect(&args.interface).map_err(|err| transport_error("connect failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    listen_loop(device.as_mut(), &args, &running, format)
}

fn listen_loop(
    device: &mut dyn CanDevice,
    args: &ListenArgs,
    running: &AtomicBool,
    format: OutputFormat,
) -> CliResult<i32> {
    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let frame = match device
            .read_frame_timeout(POLL_INTERVAL)
            .map_err(|err| transport_error("receive failed", err))?
        {
            Some(frame) => frame,
            // Timed out or interrupted; loop around to re-check the flag.
            None => continue,
        };

        if !id_selected(&frame, args.id.as_deref()) {
            continue;
        }

        print_frame(&frame, device.interface(), format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    Ok(SUCCESS)
}

fn id_selected(frame: &Frame, filter: Option<&[u32]>) -> bool {
    filter.is_none_or(|ids| ids.contains(&frame.id))
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
