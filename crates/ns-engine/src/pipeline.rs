use std::sync::OnceLock;

use ns_core::{FunctionDef, NsValue, NyanScriptError};
use regex::Regex;

use crate::{Interpreter, LocalOverlay};

// Fixed whole-program passes. Each harvesting pass first executes (or
// registers) every match in textual order, then removes all matched spans.
// None of the patterns track brace depth: a construct nested inside
// another construct's braces terminates the outer match at its first `}`,
// and the leftovers run as residual lines.
impl Interpreter {
    pub(crate) fn run_passes(&mut self, script: &str) -> Result<(), NyanScriptError> {
        let code = comment_regex().replace_all(script, "");
        let code = pull_directive_regex().replace_all(&code, "");

        for caps in function_def_regex().captures_iter(&code) {
            let name = caps[1].to_string();
            let params = caps[2]
                .split(',')
                .map(str::trim)
                .filter(|param| !param.is_empty())
                .map(String::from)
                .collect();
            self.functions.insert(
                name.clone(),
                FunctionDef {
                    name,
                    params,
                    body: caps[3].to_string(),
                },
            );
        }
        let code = function_def_regex().replace_all(&code, "");

        let repeats = repeat_regex()
            .captures_iter(&code)
            .map(|caps| {
                (
                    caps[1].to_string(),
                    caps[2].to_string(),
                    caps[3].to_string(),
                )
            })
            .collect::<Vec<_>>();
        for (var_name, count_expr, body) in repeats {
            self.execute_repeat(&var_name, &count_expr, &body)?;
        }
        let code = repeat_regex().replace_all(&code, "");

        let chains = if_chain_regex()
            .find_iter(&code)
            .map(|found| found.as_str().to_string())
            .collect::<Vec<_>>();
        for chain in chains {
            self.execute_if_chain(&chain)?;
        }
        let code = if_chain_regex().replace_all(&code, "");

        let mut residual_locals = LocalOverlay::new();
        self.execute_block(&code, &mut residual_locals)
    }

    fn execute_repeat(
        &mut self,
        var_name: &str,
        count_expr: &str,
        body: &str,
    ) -> Result<(), NyanScriptError> {
        let count = self
            .evaluate(count_expr, &LocalOverlay::new())
            .as_number()
            .unwrap_or(f64::NAN);

        // Each iteration gets a fresh overlay holding only the loop
        // variable; mutations are discarded when the iteration ends.
        let mut index = 0.0f64;
        while index < count {
            let mut locals = LocalOverlay::new();
            locals.insert(var_name.to_string(), NsValue::Number(index));
            self.execute_block(body, &mut locals)?;
            index += 1.0;
        }
        Ok(())
    }

    fn execute_if_chain(&mut self, chain: &str) -> Result<(), NyanScriptError> {
        let mut locals = LocalOverlay::new();

        let Some(caps) = if_head_regex().captures(chain) else {
            return Ok(());
        };
        if self.evaluate(&caps[1], &locals).is_truthy() {
            let block = caps[2].to_string();
            return self.execute_block(&block, &mut locals);
        }

        for caps in elif_regex().captures_iter(chain) {
            if self.evaluate(&caps[1], &locals).is_truthy() {
                let block = caps[2].to_string();
                return self.execute_block(&block, &mut locals);
            }
        }

        if let Some(caps) = else_regex().captures(chain) {
            let block = caps[1].to_string();
            return self.execute_block(&block, &mut locals);
        }

        Ok(())
    }
}

// Comment bodies cannot contain `"`; that is what bounds the match.
fn comment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r##"#"[^"]*"#"##).expect("comment regex must compile"))
}

fn pull_directive_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$pull\s+<[^>]+>").expect("pull directive regex must compile"))
}

fn function_def_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"def\s+(\w+)\(([^)]*)\)\s*\{([^}]+)\}").expect("def regex must compile")
    })
}

fn repeat_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"repeat\s+(\w+)\s+(\d+)\s*\{([^}]+)\}").expect("repeat regex must compile")
    })
}

fn if_chain_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"if\s+.+?\s+then\s*\{[^}]*\}(?:\s*elif\s+.+?\s+then\s*\{[^}]*\})*(?:\s*else\s*\{[^}]*\})?",
        )
        .expect("if chain regex must compile")
    })
}

fn if_head_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"if\s+(.+?)\s+then\s*\{([^}]*)\}").expect("if head regex must compile")
    })
}

fn elif_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"elif\s+(.+?)\s+then\s*\{([^}]*)\}").expect("elif regex must compile")
    })
}

fn else_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"else\s*\{([^}]*)\}").expect("else regex must compile"))
}

#[cfg(test)]
mod pipeline_tests {
    use ns_core::NsValue;

    use crate::test_support::*;
    use crate::LocalOverlay;

    #[test]
    fn comments_and_pull_directives_are_stripped() {
        let transcript = run_script(
            "#\"a comment\"# console.outputx(\"a\")\n$pull <stdlib/cat.nyan>\nconsole.outputx(\"b\")",
        );
        assert_eq!(transcript, "ab");
    }

    #[test]
    fn function_definitions_are_registered_but_never_executed() {
        let mut interpreter = quiet_interpreter();
        let transcript = interpreter
            .run("def greet(name, suffix) {\nconsole.outputx(\"hidden\")\n}\nconsole.outputx(\"visible\")")
            .expect("script should run");

        assert_eq!(transcript, "visible");
        let greet = interpreter
            .functions()
            .get("greet")
            .expect("function should be registered");
        assert_eq!(greet.params, vec!["name".to_string(), "suffix".to_string()]);
        assert!(greet.body.contains("hidden"));
    }

    #[test]
    fn repeat_binds_zero_based_index_per_iteration() {
        assert_eq!(run_script("repeat i 3 { console.outputx(i) }"), "012");
        assert_eq!(run_script("repeat i 0 { console.outputx(i) }"), "");
    }

    #[test]
    fn repeat_overlay_is_discarded_after_the_loop() {
        let transcript = run_script("repeat i 3 { x = i }\nconsole.outputx(x)");
        assert_eq!(transcript, "undefined");
    }

    #[test]
    fn repeat_iterations_do_not_share_an_overlay() {
        // Each iteration would see the previous `seen` if overlays leaked.
        let transcript =
            run_script("repeat i 2 { console.outputx(seen)\nseen = \"yes\" }");
        assert_eq!(transcript, "undefinedundefined");
    }

    #[test]
    fn conditional_chain_picks_first_truthy_branch() {
        let script = concat!(
            "if 1 == 2 then {console.outputx(\"a\")} ",
            "elif 2 == 2 then {console.outputx(\"b\")} ",
            "else {console.outputx(\"c\")}"
        );
        assert_eq!(run_script(script), "b");
    }

    #[test]
    fn conditional_chain_falls_back_to_else() {
        let script = concat!(
            "if 1 == 2 then {console.outputx(\"a\")} ",
            "else {console.outputx(\"c\")}"
        );
        assert_eq!(run_script(script), "c");
    }

    #[test]
    fn conditional_without_match_or_else_emits_nothing() {
        assert_eq!(run_script("if 1 == 2 then {console.outputx(\"a\")}"), "");
    }

    #[test]
    fn truthy_non_boolean_condition_selects_then_branch() {
        assert_eq!(
            run_script("if \"cat\" then {console.outputx(\"yes\")}"),
            "yes"
        );
        assert_eq!(run_script("if 0 then {console.outputx(\"no\")}"), "");
    }

    #[test]
    fn conditional_branch_assignments_land_in_globals() {
        let transcript = run_script("if 1 == 1 then {x = 5}\nconsole.outputx(x)");
        assert_eq!(transcript, "5");
    }

    #[test]
    fn repeats_execute_before_conditionals_regardless_of_position() {
        let script = concat!(
            "if 1 == 1 then {console.outputx(\"late\")}\n",
            "repeat i 1 {console.outputx(\"early\")}"
        );
        assert_eq!(run_script(script), "earlylate");
    }

    #[test]
    fn conditionals_execute_before_residual_assignments() {
        // The chain runs during harvesting, before the residual pass binds
        // `x`, so the condition sees an undefined variable.
        let script = "x = 1\nif x == 1 then {console.outputx(\"seen\")}";
        assert_eq!(run_script(script), "");
    }

    #[test]
    fn nested_repeat_braces_terminate_the_outer_match_early() {
        let transcript = run_script("repeat i 2 { repeat j 2 { console.outputx(j) } }");
        assert_eq!(transcript, "undefinedundefined");
    }

    #[test]
    fn residual_text_runs_once_against_the_global_store() {
        let mut interpreter = quiet_interpreter();
        let transcript = interpreter
            .run("x = 3\ny = x + 4\nconsole.outputx(y)")
            .expect("script should run");
        assert_eq!(transcript, "7");
        assert_eq!(
            interpreter.read_variable(&LocalOverlay::new(), "y"),
            NsValue::Number(7.0)
        );
    }
}
