//! Interactive turn loop: read input, dispatch meta-commands or dialogue
//! turns, synthesize and play each reply.
//!
//! The loop is strictly sequential — one chat request, one synthesis request,
//! one playback at a time, each blocking. Conversation ids advance only after
//! a confirmed backend success, so a failed turn never corrupts session
//! state, and nothing here terminates the process except `!exit`.

use std::io::{self, BufRead, Write};

use tracing::warn;

use murmur_chat::client::ChatBackend;
use murmur_chat::session::ConversationState;
use murmur_core::config::MurmurConfig;
use murmur_speech::output::AudioOutput;
use murmur_speech::request;
use murmur_speech::synth::Synthesizer;

/// Reserved prefix introducing a meta-command.
const COMMAND_PREFIX: char = '!';

const HELP_TEXT: &str = "\
!help - Show this message
!reset - Forget the current conversation
!refresh - Refresh the session authentication
!config - Show the current configuration
!rollback [n] - Roll back the conversation by n exchanges (default 1)
!setconversation <id> - Continue an existing conversation by id
!exit - Exit this program";

/// A parsed meta-command. Parsing doubles as the dispatch table: one token,
/// one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Reset,
    Refresh,
    Config,
    Rollback(Option<String>),
    SetConversation(Vec<String>),
    Exit,
}

impl Command {
    /// Parse a `!`-prefixed input into a command.
    ///
    /// Returns `None` for input without the prefix, and for prefixed input
    /// whose first token matches no known command — the latter falls through
    /// silently by design. Matching is case-sensitive.
    pub fn parse(input: &str) -> Option<Command> {
        let rest = input.strip_prefix(COMMAND_PREFIX)?;
        let mut tokens = rest.split_whitespace();
        let command = match tokens.next()? {
            "help" => Command::Help,
            "reset" => Command::Reset,
            "refresh" => Command::Refresh,
            "config" => Command::Config,
            "rollback" => Command::Rollback(tokens.next().map(str::to_string)),
            "setconversation" => Command::SetConversation(tokens.map(str::to_string).collect()),
            "exit" => Command::Exit,
            _ => return None,
        };
        Some(command)
    }
}

/// Per-block outcome steering the loop.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The interactive turn orchestrator.
///
/// Owns the conversation state exclusively; generic over the backends and
/// the I/O streams so the whole state machine runs against fakes in tests.
pub struct Repl<'a, C, S, A, R, W> {
    chat: &'a C,
    synth: &'a S,
    audio: &'a A,
    config: &'a MurmurConfig,
    state: ConversationState,
    input: R,
    out: W,
}

impl<'a, C, S, A, R, W> Repl<'a, C, S, A, R, W>
where
    C: ChatBackend,
    S: Synthesizer,
    A: AudioOutput,
    R: BufRead,
    W: Write,
{
    pub fn new(
        chat: &'a C,
        synth: &'a S,
        audio: &'a A,
        config: &'a MurmurConfig,
        input: R,
        out: W,
    ) -> Self {
        Self {
            chat,
            synth,
            audio,
            config,
            state: ConversationState::new(),
            input,
            out,
        }
    }

    /// Current conversation state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Run until `!exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(block) = self.read_block()? else {
                break;
            };
            match self.dispatch(&block)? {
                Flow::Exit => break,
                Flow::Continue => {}
            }
        }
        Ok(())
    }

    /// Read one multi-line input block, terminated by a blank line.
    ///
    /// An immediately blank line yields an empty block — a legal empty turn.
    /// Returns `None` at end of input with nothing pending.
    fn read_block(&mut self) -> io::Result<Option<String>> {
        write!(self.out, "\nYou:\n")?;
        self.out.flush()?;
        let mut lines: Vec<String> = Vec::new();
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.input.read_line(&mut buf)? == 0 {
                // EOF: submit what was typed, or signal shutdown.
                if lines.is_empty() {
                    return Ok(None);
                }
                break;
            }
            let line = buf.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(Some(lines.join("\n")))
    }

    fn dispatch(&mut self, block: &str) -> io::Result<Flow> {
        if block.starts_with(COMMAND_PREFIX) {
            return match Command::parse(block) {
                Some(cmd) => self.execute_command(cmd),
                // Unrecognized commands fall through silently.
                None => Ok(Flow::Continue),
            };
        }
        self.execute_turn(block)?;
        Ok(Flow::Continue)
    }

    fn execute_command(&mut self, cmd: Command) -> io::Result<Flow> {
        match cmd {
            Command::Help => writeln!(self.out, "{HELP_TEXT}")?,
            Command::Reset => {
                self.state.reset();
                match self.chat.reset_chat() {
                    Ok(()) => writeln!(self.out, "Chat session successfully reset.")?,
                    Err(e) => {
                        warn!(error = %e, "backend reset failed");
                        writeln!(self.out, "Something went wrong!\n{e}")?;
                    }
                }
            }
            Command::Refresh => match self.chat.refresh_session() {
                Ok(()) => writeln!(self.out, "Session successfully refreshed.")?,
                Err(e) => {
                    warn!(error = %e, "session refresh failed");
                    writeln!(self.out, "Something went wrong!\n{e}")?;
                }
            },
            Command::Config => writeln!(self.out, "{}", config_dump(self.config))?,
            Command::Rollback(arg) => self.execute_rollback(arg)?,
            Command::SetConversation(args) => {
                if let [id] = args.as_slice() {
                    self.state.set_conversation(id.clone());
                    writeln!(self.out, "Conversation has been changed")?;
                } else {
                    writeln!(self.out, "Please include conversation UUID in command")?;
                }
            }
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn execute_rollback(&mut self, arg: Option<String>) -> io::Result<()> {
        let n = match arg {
            None => 1,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) => n,
                Err(_) => {
                    writeln!(self.out, "'{raw}' is not a valid rollback count")?;
                    return Ok(());
                }
            },
        };
        match self.chat.rollback(n) {
            Ok(()) => writeln!(self.out, "Rolled back {n} messages.")?,
            Err(e) => {
                warn!(error = %e, "rollback failed");
                writeln!(self.out, "Something went wrong!\n{e}")?;
            }
        }
        Ok(())
    }

    /// One full dialogue turn: ask, advance, speak.
    ///
    /// Ids advance only after the backend confirms the reply; every failure
    /// past that point aborts the rest of the turn but keeps the advanced
    /// session, since the exchange did happen.
    fn execute_turn(&mut self, prompt: &str) -> io::Result<()> {
        writeln!(self.out, "Chatbot:")?;
        let reply = match self
            .chat
            .ask(prompt, self.state.conversation_id(), self.state.parent_id())
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                writeln!(self.out, "Something went wrong!\n{e}")?;
                return Ok(());
            }
        };
        self.state.advance(reply.conversation_id, reply.parent_id);
        self.print_reply(&reply.message)?;

        let config = self.config;
        let marker = &config.speech.language_marker;
        let wrapped = format!("[{marker}]{}[{marker}]", reply.message.replace('\n', ""));

        let request = match request::build(
            &wrapped,
            config.speech.speaker_id,
            &config.speech.output_path,
        ) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "directive extraction failed");
                writeln!(self.out, "Something went wrong!\n{e}")?;
                return Ok(());
            }
        };

        let audio = match self
            .synth
            .synthesize(&request.text, &request.params, request.speaker_id)
        {
            Ok(a) => a,
            Err(e) => {
                warn!(error = %e, "synthesis failed");
                writeln!(self.out, "Something went wrong!\n{e}")?;
                return Ok(());
            }
        };

        if let Err(e) = self
            .audio
            .write(&request.output_path, audio.sample_rate, &audio.samples)
        {
            warn!(error = %e, "failed to write audio");
            return Ok(());
        }
        if let Err(e) = self.audio.play(&request.output_path) {
            warn!(error = %e, "playback failed");
        }
        Ok(())
    }

    fn print_reply(&mut self, message: &str) -> io::Result<()> {
        if self.config.general.escape_output {
            writeln!(self.out, "{}", message.escape_default())
        } else {
            writeln!(self.out, "{message}")
        }
    }
}

/// Pretty-print the configuration with the access token redacted.
fn config_dump(config: &MurmurConfig) -> String {
    let mut shown = config.clone();
    if !shown.chat.access_token.is_empty() {
        shown.chat.access_token = "<redacted>".to_string();
    }
    serde_json::to_string_pretty(&shown).unwrap_or_else(|e| format!("<unprintable config: {e}>"))
}

// =============================================================================
// Tests
// =============================================================================
