mod commands;
mod console_delegate;
mod permission;
mod settings;
mod share;

use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use clip_recorder_core::{Command, Recorder, RecorderError};
use clip_recorder_cpal::device_enumerator::{list_input_devices, list_output_devices};
use clip_recorder_cpal::{MicCapture, WavPlayer};

use commands::{parse_line, CliCommand, HELP};
use console_delegate::{render_list, ConsoleDelegate};
use permission::ConsolePermission;
use share::ExportDirShare;

/// How often the loop wakes to poll playback when no input arrives.
const TICK: Duration = Duration::from_millis(50);

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("clip-recorder: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RecorderError> {
    let path = settings::config_path(env::args().nth(1), env::var(settings::CONFIG_ENV).ok());
    let config = settings::load_config(path.as_deref(), &settings::data_dir())?;
    log::info!("Recordings directory: {}", config.recordings_dir.display());

    let mut recorder = Recorder::new(
        config.clone(),
        Box::new(MicCapture::new(config.input_device.clone())),
        Box::new(WavPlayer::default_device()),
        Box::new(ConsolePermission::probe()),
        Box::new(ExportDirShare::new(config.export_dir.clone())),
    )?;
    let delegate = ConsoleDelegate::new();
    recorder.set_delegate(delegate.clone());

    println!("clip-recorder: {}", config.recordings_dir.display());
    recorder.startup()?;
    delegate.take_list_dirty();
    println!("{}", render_list(recorder.entries()));
    println!("Type `help` for commands.");

    let lines = spawn_stdin_reader();
    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) => match parse_line(&line) {
                Ok(Some(CliCommand::Quit)) => break,
                Ok(Some(command)) => run_command(&mut recorder, command),
                Ok(None) => {}
                Err(message) => println!("{}", message),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        recorder.tick(Instant::now());
        if delegate.take_list_dirty() {
            println!("\r{}", render_list(recorder.entries()));
        }
    }

    if recorder.recording_state().is_recording() {
        // Keep what was captured so far.
        let _ = recorder.dispatch(Command::StopRecording);
    }
    Ok(())
}

fn run_command(recorder: &mut Recorder, command: CliCommand) {
    match command {
        // Failures already reached the delegate as status text.
        CliCommand::Recorder(command) => {
            let _ = recorder.dispatch(command);
        }
        CliCommand::List => println!("{}", render_list(recorder.entries())),
        CliCommand::Devices => print_devices(recorder),
        CliCommand::Help => println!("{}", HELP),
        CliCommand::Quit => {}
    }
}

fn print_devices(recorder: &Recorder) {
    println!("recording from: {}", recorder.capture_device().name);
    for (label, devices) in [("input", list_input_devices()), ("output", list_output_devices())] {
        match devices {
            Ok(devices) => {
                println!("{} devices:", label);
                for device in devices {
                    let marker = if device.is_default { " (default)" } else { "" };
                    println!("  {}{}", device.name, marker);
                }
            }
            Err(e) => println!("{} devices: {}", label, e),
        }
    }
}

/// Read stdin lines on a background thread so the loop can keep polling
/// playback while waiting for input.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
