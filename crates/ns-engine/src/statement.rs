use std::sync::OnceLock;

use ns_core::{NsValue, NyanScriptError};
use regex::Regex;

use crate::{Interpreter, LocalOverlay};

// Single-line statement forms, tested in order; a line matching none of
// them is silently a no-op.
impl Interpreter {
    pub(crate) fn execute_line(
        &mut self,
        line: &str,
        locals: &mut LocalOverlay,
    ) -> Result<(), NyanScriptError> {
        let line = line.trim();
        let line = line.strip_suffix(';').unwrap_or(line).trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(caps) = assignment_regex().captures(line) {
            let name = caps[1].to_string();
            let value = self.evaluate(&caps[2], locals);
            self.write_variable(locals, &name, value);
            return Ok(());
        }

        if let Some(caps) = output_regex().captures(line) {
            let value = self.evaluate(&caps[1], locals);
            self.emit_output(value);
            return Ok(());
        }

        if let Some(caps) = input_regex().captures(line) {
            let prompt = caps[1].to_string();
            let target = caps[2].to_string();
            let answer = self
                .prompt_host
                .prompt(&prompt)
                .map_err(|error| NyanScriptError::new("ENGINE_PROMPT_FAILED", error.message))?;
            self.write_variable(locals, &target, NsValue::String(answer));
            return Ok(());
        }

        if let Some(caps) = error_regex().captures(line) {
            let value = self.evaluate(&caps[1], locals);
            self.emit_error(value);
            return Ok(());
        }

        Ok(())
    }

    fn emit_output(&mut self, value: NsValue) {
        let text = value.to_display_text();
        self.diagnostics.info(&text);
        self.output.push(text);
    }

    fn emit_error(&mut self, value: NsValue) {
        let text = value.to_display_text();
        self.diagnostics.error(&text);
        self.output.push(format!("ERROR: {}", text));
    }
}

fn assignment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(\w+)\s*=\s*(.+)$").expect("assignment regex must compile")
    })
}

fn output_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"console\.outputx\((.+)\)").expect("output regex must compile"))
}

fn input_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"console\.inputx\("([^"]+)",\s*(\w+)\)"#).expect("input regex must compile")
    })
}

fn error_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"console\.error\((.+)\)").expect("error regex must compile"))
}
