//! Line-oriented terminal front end for [`ChatApp`].

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use chat_session::{ChatApp, ChatSurface, Message, RunnerBackend, SubmitOutcome};

use crate::loader::{lock_writer, Loader, SharedWriter};
use crate::render::{render_error, render_message};
use crate::theme::Theme;

pub const TITLE: &str = "Chat with agent (HTTP)";
pub const PROMPT: &str = "What is up? > ";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalOptions {
    pub width: usize,
    /// ANSI styling and screen clearing.
    pub color: bool,
    /// Spinner while a backend call is pending.
    pub animate: bool,
}

impl TerminalOptions {
    pub fn plain(width: usize) -> Self {
        Self {
            width,
            color: false,
            animate: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatExit {
    Quit,
    EndOfInput,
    SessionFailed,
}

/// [`ChatSurface`] writing rendered lines to `W`.
///
/// [`ChatSurface`] methods cannot fail, so the first write error is latched
/// and surfaced by [`TerminalSurface::take_write_error`].
pub struct TerminalSurface<W: Write + Send + 'static> {
    writer: SharedWriter<W>,
    options: TerminalOptions,
    theme: Theme,
    loader: Option<Loader<W>>,
    write_error: Option<io::Error>,
}

impl<W: Write + Send + 'static> TerminalSurface<W> {
    pub fn new(writer: W, options: TerminalOptions) -> Self {
        Self::with_shared(Arc::new(Mutex::new(writer)), options)
    }

    pub fn with_shared(writer: SharedWriter<W>, options: TerminalOptions) -> Self {
        Self {
            writer,
            options,
            theme: Theme::for_output(options.color),
            loader: None,
            write_error: None,
        }
    }

    pub fn writer(&self) -> SharedWriter<W> {
        Arc::clone(&self.writer)
    }

    pub fn take_write_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    pub fn print_header(&mut self) {
        let title = (self.theme.heading)(TITLE);
        self.write_lines(&[title, String::new()]);
    }

    pub fn print_prompt(&mut self) {
        let prompt = (self.theme.bold)(PROMPT);
        self.write_raw(&prompt);
    }

    /// Terminates a prompt line left open by end of input.
    pub fn finish_line(&mut self) {
        self.write_raw("\n");
    }

    fn write_lines(&mut self, lines: &[String]) {
        let mut text = lines.join("\n");
        text.push('\n');
        self.write_raw(&text);
    }

    fn write_raw(&mut self, text: &str) {
        let result = {
            let mut writer = lock_writer(&self.writer);
            writer
                .write_all(text.as_bytes())
                .and_then(|()| writer.flush())
        };
        if let Err(error) = result {
            if self.write_error.is_none() {
                self.write_error = Some(error);
            }
        }
    }
}

impl<W: Write + Send + 'static> ChatSurface for TerminalSurface<W> {
    fn show_message(&mut self, message: &Message) {
        let lines = render_message(message, self.options.width, &self.theme);
        self.write_lines(&lines);
    }

    fn show_error(&mut self, error: &str) {
        let lines = render_error(error, self.options.width, &self.theme);
        self.write_lines(&lines);
    }

    fn begin_wait(&mut self, label: &str) {
        if !self.options.animate || self.loader.is_some() {
            return;
        }
        self.loader = Some(Loader::start(
            Arc::clone(&self.writer),
            label,
            self.theme.list_bullet,
        ));
    }

    fn end_wait(&mut self) {
        if let Some(mut loader) = self.loader.take() {
            loader.stop();
        }
    }

    fn clear(&mut self) {
        if self.options.color {
            self.write_raw(CLEAR_SCREEN);
        }
    }
}

/// Drives `app` from `input` until `/quit`, end of input or a failed start.
pub fn run_chat<B, R, W>(
    app: &mut ChatApp<B>,
    mut input: R,
    surface: &mut TerminalSurface<W>,
) -> io::Result<ChatExit>
where
    B: RunnerBackend,
    R: BufRead,
    W: Write + Send + 'static,
{
    surface.print_header();
    let ready = app.start(surface);
    check_output(surface)?;
    if !ready {
        tracing::warn!("chat disabled: agent session failed to initialize");
        return Ok(ChatExit::SessionFailed);
    }

    let mut line = String::new();
    loop {
        surface.print_prompt();
        check_output(surface)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            surface.finish_line();
            check_output(surface)?;
            return Ok(ChatExit::EndOfInput);
        }

        let submitted = line.trim_end_matches(['\n', '\r']);
        let outcome = app.on_submit(submitted, surface);
        check_output(surface)?;
        if outcome == SubmitOutcome::Quit {
            return Ok(ChatExit::Quit);
        }
    }
}

fn check_output<W: Write + Send + 'static>(surface: &mut TerminalSurface<W>) -> io::Result<()> {
    match surface.take_write_error() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
