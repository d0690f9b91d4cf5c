//! open-aria CLI: set polling rate and DPI on the Fantech Aria.

mod args;
mod preflight;
mod prompt;

use anyhow::{Context, Result};
use args::Cli;
use open_aria_core::configure::{
    apply_settings, ApplyReport, SettingOutcome, SettingsRequest, EXIT_CONNECT_FAILED, EXIT_OK,
};
use open_aria_core::session::DeviceSession;
use open_aria_core::transport::{list_interfaces, HidApiTransport};
use std::io;
use tracing::error;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = match args::parse_cli(std::env::args()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(args::usage_exit_code(&e));
        }
    };

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = format_args!("{e:#}"), "Unexpected failure");
            eprintln!("Error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    if cli.list_devices {
        return list_devices();
    }

    let request = resolve_request(&cli)?;

    if !request.polling.is_supported() {
        println!("{} not working, skipping.", request.polling);
    }

    let transport = match HidApiTransport::new() {
        Ok(t) => t,
        Err(e) => {
            println!("Connection failed: {e}");
            return Ok(EXIT_CONNECT_FAILED);
        }
    };

    let mut session = DeviceSession::new(transport);
    if !cli.no_prepare {
        session = session.with_preflight(preflight::stop_vendor_driver);
    }

    if let Err(e) = session.connect() {
        println!("Connection failed: {e}");
        println!("Check cable/driver/interface.");
        return Ok(EXIT_CONNECT_FAILED);
    }

    let report = apply_settings(&mut session, request);
    session.close();

    print_report(&report, cli.json)?;
    Ok(report.exit_code())
}

/// Fill in settings missing from the command line from the menus (or their defaults).
fn resolve_request(cli: &Cli) -> Result<SettingsRequest> {
    let polling = args::resolve_polling(cli.poll.as_deref());
    let dpi = args::resolve_dpi(cli.dpi.as_deref());

    if let (Some(polling), Some(dpi)) = (polling, dpi) {
        return Ok(SettingsRequest { polling, dpi });
    }

    if cli.non_interactive {
        return Ok(SettingsRequest {
            polling: polling.unwrap_or(prompt::FALLBACK_POLLING),
            dpi: dpi.unwrap_or(prompt::FALLBACK_DPI),
        });
    }

    println!("Interactive mode (missing argument).");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let polling = match polling {
        Some(p) => p,
        None => prompt::choose_polling(&mut input, &mut out).context("read polling choice")?,
    };
    let dpi = match dpi {
        Some(d) => d,
        None => prompt::choose_dpi(&mut input, &mut out).context("read DPI choice")?,
    };
    Ok(SettingsRequest { polling, dpi })
}

fn list_devices() -> Result<i32> {
    let transport = HidApiTransport::new().context("hidapi init")?;
    let interfaces = list_interfaces(&transport)?;
    if interfaces.is_empty() {
        println!("No Fantech Aria found.");
        println!("Ensure your mouse is connected and drivers are set up.");
    } else {
        for iface in &interfaces {
            let marker = if iface.is_command_interface() {
                " [command]"
            } else {
                ""
            };
            println!(
                "{} (VID: 0x{:04X}, PID: 0x{:04X}, interface: {}, path: {}){}",
                iface.product.as_deref().unwrap_or("Fantech Aria"),
                iface.vendor_id,
                iface.product_id,
                iface.interface_number,
                iface.path,
                marker
            );
        }
    }
    Ok(EXIT_OK)
}

fn print_report(report: &ApplyReport, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("serialize report")?
        );
        return Ok(());
    }

    match &report.polling {
        SettingOutcome::Applied => println!("Polling {} applied.", report.request.polling),
        SettingOutcome::Skipped => println!("Polling {} skipped.", report.request.polling),
        SettingOutcome::Failed(msg) => println!("{msg}"),
    }
    match &report.dpi {
        SettingOutcome::Applied => println!("{} applied.", report.request.dpi),
        SettingOutcome::Skipped => println!("{} skipped.", report.request.dpi),
        SettingOutcome::Failed(msg) => println!("{msg}"),
    }

    let code = report.exit_code();
    if code == EXIT_OK {
        println!("Success.");
    } else {
        println!("Error (code {code}).");
    }
    Ok(())
}
