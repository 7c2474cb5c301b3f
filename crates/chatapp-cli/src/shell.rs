use std::io::{self, BufRead, IsTerminal, Write};

use tracing::warn;

/// The presentation layer the flows talk to.
///
/// A prompt returning `None` means the user cancelled.
pub trait Shell {
    fn prompt_text(&mut self, message: &str, title: &str) -> Option<String>;

    /// Like `prompt_text`, but the answer should not be echoed.
    fn prompt_secret(&mut self, message: &str, title: &str) -> Option<String> {
        self.prompt_text(message, title)
    }

    fn prompt_choice(&mut self, menu: &str, title: &str) -> Option<String>;

    fn show_info(&mut self, message: &str, title: &str);
    fn show_warning(&mut self, message: &str, title: &str);
    fn show_error(&mut self, message: &str, title: &str);
}

/// Line-oriented shell. End of input cancels the current prompt.
pub struct TerminalShell<I, O> {
    input: I,
    output: O,
    hide_secrets: bool,
}

impl TerminalShell<io::StdinLock<'static>, io::Stdout> {
    /// Password prompts are hidden when stdin is a terminal.
    pub fn stdio() -> Self {
        let mut shell = Self::new(io::stdin().lock(), io::stdout());
        shell.hide_secrets = io::stdin().is_terminal();
        shell
    }
}

impl<I: BufRead, O: Write> TerminalShell<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }

    fn banner(&mut self, kind: &str, message: &str, title: &str) {
        let result = if kind.is_empty() {
            writeln!(self.output, "\n== {} ==\n{}", title, message)
        } else {
            writeln!(self.output, "\n== {} [{}] ==\n{}", title, kind, message)
        };
        if let Err(e) = result.and_then(|_| self.output.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
                line.truncate(trimmed_len);
                Some(line)
            }
            Err(e) => {
                warn!("Failed to read from terminal: {}", e);
                None
            }
        }
    }

    fn ask(&mut self, message: &str, title: &str) -> Option<String> {
        self.banner("", message, title);
        if let Err(e) = write!(self.output, "> ").and_then(|_| self.output.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
        self.read_answer()
    }
}

impl<I: BufRead, O: Write> Shell for TerminalShell<I, O> {
    fn prompt_text(&mut self, message: &str, title: &str) -> Option<String> {
        self.ask(message, title)
    }

    fn prompt_secret(&mut self, message: &str, title: &str) -> Option<String> {
        if !self.hide_secrets {
            return self.ask(message, title);
        }
        self.banner("", message, title);
        match rpassword::prompt_password("> ") {
            Ok(answer) => Some(answer),
            Err(e) => {
                warn!("Failed to read password: {}", e);
                None
            }
        }
    }

    fn prompt_choice(&mut self, menu: &str, title: &str) -> Option<String> {
        self.ask(menu, title)
    }

    fn show_info(&mut self, message: &str, title: &str) {
        self.banner("", message, title);
    }

    fn show_warning(&mut self, message: &str, title: &str) {
        self.banner("warning", message, title);
    }

    fn show_error(&mut self, message: &str, title: &str) {
        self.banner("error", message, title);
    }
}
