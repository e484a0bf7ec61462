// Answer paste prompts from a line-oriented reader (stdin)

use std::io::{BufRead, Write};

use gridclip_engine::{ConfirmationProvider, PastePrompt, PromptResponse};

/// Writes each prompt to `output` and reads one answer line from `input`.
/// `y`/`yes` proceeds; anything else, including end of input, cancels.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmationProvider for LinePrompt<R, W> {
    fn confirm(&mut self, prompt: &PastePrompt) -> PromptResponse {
        if write!(self.output, "{}: {} [y/N] ", prompt.caption(), prompt).is_err() {
            return PromptResponse::Cancel;
        }
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                let _ = writeln!(self.output);
                log::debug!("no answer to prompt, cancelling");
                PromptResponse::Cancel
            }
            Ok(_) => match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => PromptResponse::Proceed,
                _ => PromptResponse::Cancel,
            },
        }
    }
}
