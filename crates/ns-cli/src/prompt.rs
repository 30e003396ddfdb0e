use std::io::{self, BufRead, Write};

use ns_core::NyanScriptError;
use ns_engine::PromptHost;

// Blocking interactive prompt: the engine suspends until a line arrives.
#[derive(Debug, Default)]
pub(crate) struct StdinPromptHost;

impl PromptHost for StdinPromptHost {
    fn prompt(&mut self, message: &str) -> Result<String, NyanScriptError> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", message).map_err(map_prompt_io)?;
        stdout.flush().map_err(map_prompt_io)?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(map_prompt_io)?;
        while answer.ends_with('\n') || answer.ends_with('\r') {
            answer.pop();
        }
        Ok(answer)
    }
}

fn map_prompt_io(error: io::Error) -> NyanScriptError {
    NyanScriptError::new("CLI_PROMPT_IO", error.to_string())
}
