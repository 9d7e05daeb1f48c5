use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use canwire_codec::{encode_hex, render, Frame, Warning};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use tracing::warn;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    id: String,
    format: &'static str,
    fd: bool,
    remote: bool,
    dlc: usize,
    data: String,
    interface: &'a str,
    timestamp: String,
}

fn frame_format(frame: &Frame) -> &'static str {
    if frame.extended {
        "extended"
    } else {
        "standard"
    }
}

pub fn print_frame(frame: &Frame, interface: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                id: format!("{:#x}", frame.id),
                format: frame_format(frame),
                fd: frame.fd,
                remote: frame.is_remote(),
                dlc: frame.dlc(),
                data: encode_hex(frame.data().unwrap_or_default()),
                interface,
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INTERFACE", "ID", "FORMAT", "DLC", "DATA"])
                .add_row(vec![
                    interface.to_string(),
                    format!("{:#x}", frame.id),
                    flags_text(frame),
                    frame.dlc().to_string(),
                    data_text(frame),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{interface}  id={:#x} ({}) dlc={} {}",
                frame.id,
                flags_text(frame),
                frame.dlc(),
                data_text(frame),
            );
        }
        OutputFormat::Raw => {
            println!("{}", render(frame));
        }
    }
}

fn flags_text(frame: &Frame) -> String {
    let mut flags = frame_format(frame).to_string();
    if frame.fd {
        flags.push_str(" fd");
    }
    if frame.is_remote() {
        flags.push_str(" remote");
    }
    flags
}

fn data_text(frame: &Frame) -> String {
    match frame.data() {
        None => "<remote request>".to_string(),
        Some(data) => encode_hex(data),
    }
}

/// Surface non-fatal codec diagnostics through the log layer.
pub fn report_warnings(warnings: &[Warning]) {
    for warning in warnings {
        warn!("{warning}");
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use canwire_codec::parse_frame;

    use super::*;

    #[test]
    fn flags_cover_format_fd_and_remote() {
        let classic = parse_frame("1#01").unwrap().frame;
        assert_eq!(flags_text(&classic), "standard");

        let fd = parse_frame("2048##01").unwrap().frame;
        assert_eq!(flags_text(&fd), "extended fd");

        let remote = parse_frame("1#R").unwrap().frame;
        assert_eq!(flags_text(&remote), "standard remote");
    }

    #[test]
    fn remote_frames_have_placeholder_data() {
        let remote = parse_frame("1#R").unwrap().frame;
        assert_eq!(data_text(&remote), "<remote request>");
    }
}
