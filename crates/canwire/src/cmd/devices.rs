use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::DevicesArgs;
use crate::exit::{transport_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct DevicesOutput {
    interfaces: Vec<String>,
}

pub fn run(_args: DevicesArgs, format: OutputFormat) -> CliResult<i32> {
    let interfaces = canwire_transport::list_interfaces()
        .map_err(|err| transport_error("interface enumeration failed", err))?;

    print_devices(&DevicesOutput { interfaces }, format);
    Ok(SUCCESS)
}

fn print_devices(output: &DevicesOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INTERFACE"]);
            for interface in &output.interfaces {
                table.add_row(vec![interface.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if output.interfaces.is_empty() {
                println!("no CAN interfaces found");
            } else {
                for interface in &output.interfaces {
                    println!("{interface}");
                }
            }
        }
        OutputFormat::Raw => {
            for interface in &output.interfaces {
                println!("{interface}");
            }
        }
    }
}
