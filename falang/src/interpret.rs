//! The driver: parse → type-check → evaluate, routing diagnostics.
//!
//! Program output goes to `out`, diagnostics to `err`, each error kind under
//! its fixed one-line banner. All errors are fatal to the current program;
//! `io::Result` reports only failures of the streams themselves.

use std::io::{self, Write};

use falang_parser::ast::Program;

use crate::executor::{Executor, ValueEnv};
use crate::typer::{TypeEnv, Typer};

/// Execute a program once against fresh environments.
pub fn execute_code<O: Write, E: Write>(
    source: &str,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    let (program, errors) = falang_parser::parse_with_errors(source);
    if !errors.is_empty() {
        writeln!(err, "Syntax errors were found")?;
        return Ok(());
    }
    let mut type_env = TypeEnv::new();
    let mut value_env = ValueEnv::new();
    check_and_run(&program, &mut type_env, &mut value_env, out, err)
}

/// Type-check and evaluate an already-parsed program against the given
/// environments. Shared by the file driver and the interactive session.
pub(crate) fn check_and_run<O: Write, E: Write>(
    program: &Program,
    type_env: &mut TypeEnv,
    value_env: &mut ValueEnv,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    let checked = match Typer::new(type_env).check_program(program) {
        Ok(checked) => checked,
        Err(e) => {
            writeln!(err, "Type error occurred")?;
            writeln!(err, "{e}")?;
            return Ok(());
        }
    };

    let mut executor = Executor::new(value_env, &checked, out);
    if let Err(e) = executor.run_program(program) {
        writeln!(err, "Error occurred during execution")?;
        writeln!(err, "{e}")?;
    }
    Ok(())
}

/// Parse and type-check only, then list every top-level binding with its
/// type.
pub fn type_program<O: Write, E: Write>(source: &str, out: &mut O, err: &mut E) -> io::Result<()> {
    let (program, errors) = falang_parser::parse_with_errors(source);
    if !errors.is_empty() {
        writeln!(err, "Syntax errors were found")?;
        return Ok(());
    }

    let mut env = TypeEnv::new();
    match Typer::new(&mut env).check_program(&program) {
        Ok(_) => {
            writeln!(out, "Variables:")?;
            for (name, ty) in env.globals() {
                writeln!(out, "{name} :: {ty}")?;
            }
        }
        Err(e) => {
            writeln!(err, "Type error occurred")?;
            writeln!(err, "{e}")?;
        }
    }
    Ok(())
}

/// Does the text parse as a program?
pub fn does_belong_to_language(source: &str) -> bool {
    falang_parser::parse_with_errors(source).1.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        execute_code(source, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap().trim().to_string(),
            String::from_utf8(err).unwrap().trim().to_string(),
        )
    }

    #[test]
    fn test_syntax_error_banner() {
        let (out, err) = run("print 5");
        assert_eq!(out, "");
        assert_eq!(err, "Syntax errors were found");
    }

    #[test]
    fn test_type_error_banner() {
        let (out, err) = run("print x;");
        assert_eq!(out, "");
        assert_eq!(
            err,
            "Type error occurred\nx variable wasn't defined"
        );
    }

    #[test]
    fn test_execution_error_banner() {
        let (out, err) = run("print load \"/no/such/file.dot\";");
        assert_eq!(out, "");
        assert!(err.starts_with("Error occurred during execution"));
        assert!(err.contains("/no/such/file.dot"));
    }

    #[test]
    fn test_output_before_failure_is_kept() {
        let (out, err) = run("print 1; print load \"/no/such/file.dot\";");
        assert_eq!(out, "1 :: IntType");
        assert!(err.starts_with("Error occurred during execution"));
    }

    #[test]
    fn test_type_program_lists_bindings() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        type_program(
            "let b = \"x\" | \"y\"; let a = {1, 2};",
            &mut out,
            &mut err,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(err.is_empty());
        // name order
        assert_eq!(
            out,
            "Variables:\na :: SetType<IntType>\nb :: FAType<IntType>\n"
        );
    }

    #[test]
    fn test_does_belong_to_language() {
        assert!(does_belong_to_language("let a = 1; print a;"));
        assert!(!does_belong_to_language("let a = ;"));
    }
}
