use ns_core::{NyanScriptError, TagOutcome};
use ns_engine::Interpreter;

mod loader;
mod scan;

pub use loader::{FsSourceLoader, SourceLoader};
pub use scan::scan_document;

// Executes every discovered tag against a fresh engine state, in document
// order. A load failure is reported per tag and the remaining tags still
// run; an engine failure (a prompt host going away) aborts the document.
pub fn run_document(
    source: &str,
    loader: &dyn SourceLoader,
    interpreter: &mut Interpreter,
) -> Result<Vec<TagOutcome>, NyanScriptError> {
    let tags = scan_document(source)?;

    let mut outcomes = Vec::new();
    for tag in tags {
        let body = match &tag.src {
            Some(src) => match loader.load(src) {
                Ok(body) => body,
                Err(error) => {
                    outcomes.push(TagOutcome::LoadFailed {
                        src: src.clone(),
                        message: error.message,
                    });
                    continue;
                }
            },
            None => tag.inline_body.clone(),
        };

        if body.trim().is_empty() {
            continue;
        }

        let transcript = interpreter.run(&body)?;
        outcomes.push(TagOutcome::Transcript { text: transcript });
    }

    Ok(outcomes)
}
