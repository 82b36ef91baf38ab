//! The read-eval session.

use std::io::{self, Write};

use crate::executor::ValueEnv;
use crate::interpret::check_and_run;
use crate::typer::TypeEnv;

/// Accumulated state of an interactive session. Each line is a complete
/// program evaluated against the environments of the lines before it; a
/// failing line reports its error and leaves the session usable.
#[derive(Debug, Default)]
pub struct ReplSession {
    type_env: TypeEnv,
    value_env: ValueEnv,
}

impl ReplSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one input line. A line that does not parse reports
    /// `Wrong syntax`; type and execution errors are reported under their
    /// banners. None of these poison the session.
    pub fn eval_line<O: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<()> {
        let (program, errors) = falang_parser::parse_with_errors(line);
        if !errors.is_empty() {
            writeln!(out, "Wrong syntax")?;
            return Ok(());
        }
        check_and_run(&program, &mut self.type_env, &mut self.value_env, out, err)
    }

    /// Names bound so far, in name order.
    pub fn variable_names(&self) -> Vec<String> {
        self.type_env.globals().map(|(name, _)| name.clone()).collect()
    }

    /// Drop all bindings.
    pub fn reset(&mut self) {
        self.type_env = TypeEnv::new();
        self.value_env = ValueEnv::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(session: &mut ReplSession, line: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        session.eval_line(line, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap().trim().to_string(),
            String::from_utf8(err).unwrap().trim().to_string(),
        )
    }

    #[test]
    fn test_bindings_persist_across_lines() {
        let mut session = ReplSession::new();
        assert_eq!(eval(&mut session, "let a = {1, 2};"), (String::new(), String::new()));
        assert_eq!(
            eval(&mut session, "print a;"),
            ("{ 1, 2 } :: SetType<IntType>".to_string(), String::new())
        );
    }

    #[test]
    fn test_wrong_syntax_does_not_poison() {
        let mut session = ReplSession::new();
        eval(&mut session, "let a = 5;");
        let (out, err) = eval(&mut session, "let b = ;");
        assert_eq!(out, "Wrong syntax");
        assert_eq!(err, "");
        assert_eq!(
            eval(&mut session, "print a;"),
            ("5 :: IntType".to_string(), String::new())
        );
    }

    #[test]
    fn test_redeclaration_across_lines_is_an_error() {
        let mut session = ReplSession::new();
        eval(&mut session, "let a = 5;");
        let (_, err) = eval(&mut session, "let a = 6;");
        assert_eq!(err, "Type error occurred\nBinding of a already exists");
    }

    #[test]
    fn test_variable_names_and_reset() {
        let mut session = ReplSession::new();
        eval(&mut session, "let b = 1; let a = 2;");
        assert_eq!(session.variable_names(), vec!["a", "b"]);
        session.reset();
        assert!(session.variable_names().is_empty());
        let (_, err) = eval(&mut session, "print a;");
        assert!(err.contains("a variable wasn't defined"));
    }
}
