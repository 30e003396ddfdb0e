use ns_core::NyanScriptError;

use crate::{Interpreter, LocalOverlay};

impl Interpreter {
    // One shared overlay across every line, so earlier assignments are
    // visible to later lines of the same block.
    pub(crate) fn execute_block(
        &mut self,
        code: &str,
        locals: &mut LocalOverlay,
    ) -> Result<(), NyanScriptError> {
        for line in code.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.execute_line(line, locals)?;
        }
        Ok(())
    }
}
