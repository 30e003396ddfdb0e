use std::collections::BTreeMap;

use ns_core::{FunctionDef, NsValue, NyanScriptError};

mod block;
mod eval;
mod pipeline;
mod scope;
mod statement;


pub trait PromptHost {
    fn prompt(&mut self, message: &str) -> Result<String, NyanScriptError>;
}

#[derive(Debug, Default)]
pub struct NullPromptHost;

impl PromptHost for NullPromptHost {
    fn prompt(&mut self, _message: &str) -> Result<String, NyanScriptError> {
        Ok(String::new())
    }
}

pub trait DiagnosticSink {
    fn info(&self, line: &str);
    fn error(&self, line: &str);
}

#[derive(Debug, Default)]
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn info(&self, line: &str) {
        eprintln!("[nyan] {}", line);
    }

    fn error(&self, line: &str) {
        eprintln!("[nyan] error: {}", line);
    }
}

#[derive(Debug, Default)]
pub struct SilentDiagnostics;

impl DiagnosticSink for SilentDiagnostics {
    fn info(&self, _line: &str) {}

    fn error(&self, _line: &str) {}
}

#[derive(Default)]
pub struct InterpreterOptions {
    pub prompt_host: Option<Box<dyn PromptHost>>,
    pub diagnostics: Option<Box<dyn DiagnosticSink>>,
}

pub(crate) type LocalOverlay = BTreeMap<String, NsValue>;

pub struct Interpreter {
    prompt_host: Box<dyn PromptHost>,
    diagnostics: Box<dyn DiagnosticSink>,
    globals: BTreeMap<String, NsValue>,
    functions: BTreeMap<String, FunctionDef>,
    output: Vec<String>,
}

impl Interpreter {
    pub fn new(options: InterpreterOptions) -> Self {
        Self {
            prompt_host: options
                .prompt_host
                .unwrap_or_else(|| Box::new(NullPromptHost)),
            diagnostics: options
                .diagnostics
                .unwrap_or_else(|| Box::new(StderrDiagnostics)),
            globals: BTreeMap::new(),
            functions: BTreeMap::new(),
            output: Vec::new(),
        }
    }

    // Every run starts from a fresh store, function registry, and sink; on
    // failure the partial transcript is discarded with them.
    pub fn run(&mut self, script: &str) -> Result<String, NyanScriptError> {
        self.globals.clear();
        self.functions.clear();
        self.output.clear();
        self.run_passes(script)?;
        Ok(self.output.concat())
    }

    // Functions harvested by the most recent run. Registered, never
    // invoked: the language has no call syntax.
    pub fn functions(&self) -> &BTreeMap<String, FunctionDef> {
        &self.functions
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterOptions::default())
    }
}
