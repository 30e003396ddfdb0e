use ns_core::NsValue;

use crate::{Interpreter, LocalOverlay};

impl Interpreter {
    pub(crate) fn read_variable(&self, locals: &LocalOverlay, name: &str) -> NsValue {
        if let Some(value) = locals.get(name) {
            return value.clone();
        }
        self.globals
            .get(name)
            .cloned()
            .unwrap_or(NsValue::Undefined)
    }

    // An empty overlay behaves as "no overlay": writes fall through to the
    // global store. Loop bodies always carry the loop variable, so they
    // always write locally; residual and conditional blocks start empty
    // and therefore write globally.
    pub(crate) fn write_variable(&mut self, locals: &mut LocalOverlay, name: &str, value: NsValue) {
        if locals.is_empty() {
            self.globals.insert(name.to_string(), value);
        } else {
            locals.insert(name.to_string(), value);
        }
    }
}
