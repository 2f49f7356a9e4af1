use clip_recorder_core::Command;

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Recorder(Command),
    List,
    Devices,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  record            start or stop recording
  play [n]          play clip n, or the last recording without n
  stop              stop playback
  delete n          delete clip n
  share n           export clip n
  list              show clips
  allow | deny      answer the microphone permission request
  devices           list audio devices
  help              show this help
  quit              exit";

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<CliCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {}", extra));
    }

    let command = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("record" | "r", None) => CliCommand::Recorder(Command::ToggleRecording),
        ("play" | "p", None) => CliCommand::Recorder(Command::TogglePrimary),
        ("play" | "p", Some(n)) => CliCommand::Recorder(Command::PlayEntry(index(n)?)),
        ("stop" | "s", None) => CliCommand::Recorder(Command::StopPlayback),
        ("delete" | "rm", Some(n)) => CliCommand::Recorder(Command::DeleteEntry(index(n)?)),
        ("share", Some(n)) => CliCommand::Recorder(Command::ShareEntry(index(n)?)),
        ("allow", None) => CliCommand::Recorder(Command::PermissionResult { granted: true }),
        ("deny", None) => CliCommand::Recorder(Command::PermissionResult { granted: false }),
        ("list" | "ls", None) => CliCommand::List,
        ("devices", None) => CliCommand::Devices,
        ("help" | "?", None) => CliCommand::Help,
        ("quit" | "exit" | "q", None) => CliCommand::Quit,
        ("delete" | "rm" | "share", None) => return Err(format!("{} needs a clip number", verb)),
        (_, Some(_)) if is_known(verb) => return Err(format!("{} takes no argument", verb)),
        _ => return Err(format!("unknown command: {} (try `help`)", verb)),
    };
    Ok(Some(command))
}

fn index(word: &str) -> Result<usize, String> {
    word.parse().map_err(|_| format!("not a clip number: {}", word))
}

fn is_known(verb: &str) -> bool {
    matches!(
        verb.to_ascii_lowercase().as_str(),
        "record" | "r" | "stop" | "s" | "allow" | "deny" | "list" | "ls" | "devices" | "help" | "?" | "quit" | "exit" | "q"
    )
}
