//! Command-language parser
//!
//! Turns a queue request document into sealed [`Command`] records. The
//! scanner walks lines in order with one explicit state and never fails:
//! lines it does not recognise are skipped, and problems that can be
//! recovered from ride along on the command as [`ParseWarning`]s.
//!
//! Brace counting for JSON bodies is purely lexical. Braces inside JSON
//! string literals are counted too, so a body such as `{"a": "}"}` closes
//! one line late or not at all.

use crate::types::command::{
    Command, CommandKind, ParameterEntry, ParameterKey, ParseWarning, SourceRange,
};


/// Line that terminates a command block
pub const DELIMITER: &str = "###";

/// Profile and region used when a block does not set its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub profile: String,
    pub region: String,
}

impl Defaults {
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
        }
    }
}

/// Parse a document into commands, in header order
pub fn parse(text: &str, default_profile: &str, default_region: &str) -> Vec<Command> {
    parse_with(text, &Defaults::new(default_profile, default_region))
}

/// Parse a document using prepared [`Defaults`]
pub fn parse_with(text: &str, defaults: &Defaults) -> Vec<Command> {
    CommandParser::new(defaults).parse(text)
}

/// Split a trimmed `key: value` line.
///
/// The key must match exactly and the value must be non-empty.
pub fn parse_parameter(line: &str) -> Option<(ParameterKey, &str)> {
    let (name, value) = line.split_once(':')?;
    let key = ParameterKey::from_name(name)?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Match a trimmed `KIND TARGET` header line
pub fn parse_header(line: &str) -> Option<(CommandKind, &str)> {
    let mut tokens = line.split_whitespace();
    let kind = CommandKind::from_keyword(tokens.next()?)?;
    let target = tokens.next()?;
    Some((kind, target))
}

/// Command under construction, owned by the scan loop
#[derive(Debug)]
struct PendingCommand {
    kind: CommandKind,
    target: String,
    profile: String,
    region: String,
    body: Option<serde_json::Value>,
    body_range: Option<SourceRange>,
    max_messages: Option<u32>,
    visibility_timeout_seconds: Option<u32>,
    wait_time_seconds: Option<u32>,
    parameters: Vec<ParameterEntry>,
    start_line: usize,
    warnings: Vec<ParseWarning>,
}

impl PendingCommand {
    fn open(kind: CommandKind, target: &str, line: usize, defaults: &Defaults) -> Self {
        Self {
            kind,
            target: target.to_string(),
            profile: defaults.profile.clone(),
            region: defaults.region.clone(),
            body: None,
            body_range: None,
            max_messages: None,
            visibility_timeout_seconds: None,
            wait_time_seconds: None,
            parameters: Vec::new(),
            start_line: line,
            warnings: Vec::new(),
        }
    }

    fn apply_parameter(&mut self, key: ParameterKey, value: &str, line: usize) {
        let slot = match key {
            ParameterKey::Profile => {
                self.profile = value.to_string();
                None
            }
            ParameterKey::Region => {
                self.region = value.to_string();
                None
            }
            ParameterKey::MaxMessages => Some(&mut self.max_messages),
            ParameterKey::VisibilityTimeout => Some(&mut self.visibility_timeout_seconds),
            ParameterKey::WaitTime => Some(&mut self.wait_time_seconds),
        };

        if let Some(slot) = slot {
            match value.parse::<u32>() {
                Ok(number) => *slot = Some(number),
                Err(_) => {
                    self.warnings.push(ParseWarning::InvalidNumber {
                        key: key.name().to_string(),
                        value: value.to_string(),
                        line,
                    });
                    return;
                }
            }
        }

        self.parameters.push(ParameterEntry {
            key,
            value: value.to_string(),
            line,
        });
    }

    fn resolve_body(&mut self, body: BodyAccumulator) {
        self.body_range = Some(SourceRange::new(body.start_line, body.last_line));
        match serde_json::from_str(&body.lines.join("\n")) {
            Ok(value) => self.body = Some(value),
            Err(err) => {
                log::debug!(
                    "Discarding malformed JSON body of '{} {}' at line {}: {}",
                    self.kind,
                    self.target,
                    body.start_line + 1,
                    err
                );
                self.body = None;
                self.warnings.push(ParseWarning::MalformedBody {
                    line: body.start_line,
                    message: err.to_string(),
                });
            }
        }
    }

    fn seal(self, end_line: usize) -> Command {
        Command {
            kind: self.kind,
            target: self.target,
            profile: self.profile,
            region: self.region,
            body: self.body,
            attributes: None,
            max_messages: self.max_messages,
            visibility_timeout_seconds: self.visibility_timeout_seconds,
            wait_time_seconds: self.wait_time_seconds,
            range: SourceRange::new(self.start_line, end_line),
            body_range: self.body_range,
            parameters: self.parameters,
            warnings: self.warnings,
        }
    }
}

/// Raw lines of a JSON body and its running brace depth
#[derive(Debug)]
struct BodyAccumulator {
    start_line: usize,
    last_line: usize,
    lines: Vec<String>,
    depth: i64,
}

impl BodyAccumulator {
    fn start(line: usize, raw: &str) -> Self {
        let mut body = Self {
            start_line: line,
            last_line: line,
            lines: Vec::new(),
            depth: 0,
        };
        body.push(line, raw);
        body
    }

    fn push(&mut self, line: usize, raw: &str) {
        for c in raw.chars() {
            match c {
                '{' => self.depth += 1,
                '}' => self.depth -= 1,
                _ => {}
            }
        }
        self.lines.push(raw.to_string());
        self.last_line = line;
    }

    fn is_closed(&self) -> bool {
        self.depth <= 0
    }
}

#[derive(Debug)]
enum ScanState {
    Idle,
    InCommand(PendingCommand),
    InJsonBody {
        command: PendingCommand,
        body: BodyAccumulator,
    },
}

struct CommandParser<'a> {
    defaults: &'a Defaults,
    state: ScanState,
    commands: Vec<Command>,
}

impl<'a> CommandParser<'a> {
    fn new(defaults: &'a Defaults) -> Self {
        Self {
            defaults,
            state: ScanState::Idle,
            commands: Vec::new(),
        }
    }

    fn parse(mut self, text: &str) -> Vec<Command> {
        let mut last_line = 0;
        for (index, raw) in text.split('\n').enumerate() {
            self.parse_line(index, raw);
            last_line = index;
        }

        self.seal_open_command(last_line);
        self.commands
    }

    fn parse_line(&mut self, index: usize, raw: &str) {
        let line = raw.trim();

        if line == DELIMITER && matches!(self.state, ScanState::InCommand(_)) {
            self.seal_open_command(index);
            return;
        }

        // Blank lines and comments, including a stray `###`
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some((kind, target)) = parse_header(line) {
            self.seal_open_command(index.saturating_sub(1));
            self.state =
                ScanState::InCommand(PendingCommand::open(kind, target, index, self.defaults));
            return;
        }

        self.state = match std::mem::replace(&mut self.state, ScanState::Idle) {
            ScanState::Idle => ScanState::Idle,
            ScanState::InCommand(mut command) => {
                if let Some((key, value)) =
                    parse_parameter(line).filter(|(key, _)| key.applies_to(command.kind))
                {
                    command.apply_parameter(key, value, index);
                    ScanState::InCommand(command)
                } else if command.kind == CommandKind::Send && line.starts_with('{') {
                    Self::advance_body(command, BodyAccumulator::start(index, raw))
                } else {
                    ScanState::InCommand(command)
                }
            }
            ScanState::InJsonBody { command, mut body } => {
                body.push(index, raw);
                Self::advance_body(command, body)
            }
        };
    }

    fn advance_body(mut command: PendingCommand, body: BodyAccumulator) -> ScanState {
        if body.is_closed() {
            command.resolve_body(body);
            ScanState::InCommand(command)
        } else {
            ScanState::InJsonBody { command, body }
        }
    }

    fn seal_open_command(&mut self, end_line: usize) {
        let command = match std::mem::replace(&mut self.state, ScanState::Idle) {
            ScanState::Idle => return,
            ScanState::InCommand(command) => command,
            ScanState::InJsonBody { mut command, body } => {
                command.resolve_body(body);
                command
            }
        };

        let command = command.seal(end_line);
        log::trace!(
            "Sealed '{}' at lines {}-{}",
            command.title(),
            command.range.start_line + 1,
            command.range.end_line + 1
        );
        self.commands.push(command);
    }
}
