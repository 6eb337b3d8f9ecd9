use clap::Parser;
use color_eyre::Result;
use std::io;
use std::process::ExitCode;

use termclip::environment::{self, EnvSnapshot};
use termclip::process::SystemRunner;
use termclip::terminal::ControllingTerminal;
use termclip::transport::{self, Context};
use termclip::{Capabilities, Config, Payload, config, logging};

/// Pipe-friendly cross-platform clipboard tool
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Pipe-friendly cross-platform clipboard tool",
    long_about = "Copies stdin to the clipboard, or pastes the clipboard to stdout.\n\n\
                  Tries tmux, then the native clipboard command (pbcopy, clip, wl-copy, \
                  xclip, xsel), then an OSC 52 escape sequence to the terminal.\n\n\
                  Environment:\n  \
                  TERMCLIP_FORCE_OSC52=1     skip tmux and native commands\n  \
                  TERMCLIP_FORCE_NATIVE=1    never fall back to OSC 52\n  \
                  TERMCLIP_OSC52_MAX_B64=N   cap the OSC 52 payload (default 75000)\n  \
                  TERMCLIP_DEBUG=1           trace every step to stderr"
)]
struct Args {
    /// Paste from clipboard to stdout (local only)
    #[arg(long)]
    paste: bool,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();

    // Captured once; nothing below reads the process environment again
    let snapshot = EnvSnapshot::capture();
    let config_result = config::load_config(&snapshot);
    logging::init(config_result.config.debug);

    for warning in &config_result.warnings {
        eprintln!("termclip: {}", warning);
    }
    trace_environment(&snapshot, &config_result.config);

    let caps = Capabilities::probe(&snapshot);
    let mut runner = SystemRunner;
    let mut terminal = ControllingTerminal;
    let mut stderr = io::stderr();
    let mut ctx = Context {
        caps: &caps,
        config: &config_result.config,
        runner: &mut runner,
        terminal: &mut terminal,
        diagnostics: &mut stderr,
    };

    let result = if args.paste {
        transport::paste(&mut ctx).map(|helper| log::debug!("Pasted via {}", helper))
    } else {
        let payload = Payload::read_from(io::stdin().lock())?;
        transport::copy(&payload, &mut ctx).map(|report| {
            if let Some(helper) = report.transport {
                log::debug!("Copied via {}", helper);
            }
        })
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("termclip: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn trace_environment(snapshot: &EnvSnapshot, config: &Config) {
    for name in [
        environment::TMUX,
        environment::DISPLAY,
        environment::WAYLAND_DISPLAY,
    ] {
        log::debug!("{}: {}", name, snapshot.var(name).unwrap_or("not set"));
    }
    log::debug!(
        "OS: {:?}, helpers on PATH: {:?}",
        snapshot.os(),
        snapshot.installed_programs().collect::<Vec<_>>()
    );
    log::debug!("Config: {:?}", config);
}
