use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use ns_core::{NyanScriptError, TagOutcome};
use ns_engine::{Interpreter, InterpreterOptions};
use ns_host::{run_document, FsSourceLoader};
use walkdir::WalkDir;

mod cli_args;
mod prompt;

use cli_args::{BatchArgs, Cli, Command, DocArgs, RunArgs};
use prompt::StdinPromptHost;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return error.exit_code(),
    };
    match run(cli) {
        Ok(report) => {
            print!("{}", report);
            0
        }
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<String, NyanScriptError> {
    match cli.command {
        Command::Run(args) => run_script_file(&args),
        Command::Doc(args) => run_host_document(&args),
        Command::Batch(args) => run_batch_dir(&args),
    }
}

fn run_script_file(args: &RunArgs) -> Result<String, NyanScriptError> {
    let script = read_source_file(Path::new(&args.script))?;
    let mut interpreter = interactive_interpreter();
    let transcript = interpreter.run(&script)?;
    Ok(ensure_trailing_newline(transcript))
}

fn run_host_document(args: &DocArgs) -> Result<String, NyanScriptError> {
    let path = PathBuf::from(&args.document);
    let source = read_source_file(&path)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let loader = FsSourceLoader::new(base_dir);

    let mut interpreter = interactive_interpreter();
    let outcomes = run_document(&source, &loader, &mut interpreter)?;

    if args.json {
        let report = serde_json::to_string_pretty(&outcomes)
            .map_err(|error| NyanScriptError::new("CLI_JSON_ENCODE", error.to_string()))?;
        return Ok(ensure_trailing_newline(report));
    }

    Ok(render_outcomes(&outcomes))
}

fn run_batch_dir(args: &BatchArgs) -> Result<String, NyanScriptError> {
    let root = PathBuf::from(&args.dir);
    if !root.is_dir() {
        return Err(NyanScriptError::new(
            "CLI_SOURCE_NOT_DIR",
            format!("--dir is not a directory: {}", root.display()),
        ));
    }

    let mut scripts = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("nyan"))
        .collect::<Vec<_>>();
    scripts.sort();

    if scripts.is_empty() {
        return Err(NyanScriptError::new(
            "CLI_SOURCE_EMPTY",
            format!("No .nyan files under {}", root.display()),
        ));
    }

    let mut report = String::new();
    let mut interpreter = interactive_interpreter();
    for path in scripts {
        let script = read_source_file(&path)?;
        let transcript = interpreter.run(&script)?;
        report.push_str(&format!("== {} ==\n", path.display()));
        report.push_str(&ensure_trailing_newline(transcript));
    }
    Ok(report)
}

fn render_outcomes(outcomes: &[TagOutcome]) -> String {
    let mut report = String::new();
    for outcome in outcomes {
        match outcome {
            TagOutcome::Transcript { text } => {
                report.push_str(&ensure_trailing_newline(text.clone()));
            }
            TagOutcome::LoadFailed { src, message } => {
                report.push_str(&format!("ERROR loading {}: {}\n", src, message));
            }
        }
    }
    report
}

fn read_source_file(path: &Path) -> Result<String, NyanScriptError> {
    if !path.exists() {
        return Err(NyanScriptError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("Source file does not exist: {}", path.display()),
        ));
    }
    fs::read_to_string(path).map_err(|error| {
        NyanScriptError::new(
            "CLI_SOURCE_READ",
            format!("Failed to read {}: {}", path.display(), error),
        )
    })
}

fn interactive_interpreter() -> Interpreter {
    Interpreter::new(InterpreterOptions {
        prompt_host: Some(Box::new(StdinPromptHost)),
        diagnostics: None,
    })
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn emit_error(error: NyanScriptError) -> i32 {
    eprintln!("{}", error);
    1
}

#[cfg(test)]
mod tests;
