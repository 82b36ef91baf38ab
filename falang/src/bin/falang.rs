//! falang command-line interface.
//!
//! Usage:
//!   falang                          # Start interactive read-eval loop
//!   falang file.fal                 # Execute a program file
//!   falang -e "code"                # Execute a code string
//!   falang --types file.fal         # Type-check and list bindings
//!   falang --dump-ast -e "code"     # Show the parsed AST

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use falang::interpret::{execute_code, type_program};
use falang::repl::ReplSession;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = " >>> ";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() == 1 {
        // No arguments - start the interactive loop
        run_repl();
    } else if args[1] == "-e" {
        if args.len() < 3 {
            eprintln!("Error: -e requires an argument");
            process::exit(1);
        }
        run_code(&args[2]);
    } else if args[1] == "--types" || args[1] == "-t" {
        let source = source_from_args(&args[2..]);
        let stdout = io::stdout();
        let stderr = io::stderr();
        exit_on_io(type_program(&source, &mut stdout.lock(), &mut stderr.lock()));
    } else if args[1] == "--dump-ast" {
        let json = args.contains(&"--json".to_string());
        let rest: Vec<String> = args[2..]
            .iter()
            .filter(|a| *a != "--json")
            .cloned()
            .collect();
        let source = source_from_args(&rest);
        dump_ast(&source, json);
    } else if args[1] == "-h" || args[1] == "--help" {
        print_usage();
    } else {
        // File path provided - execute the file
        run_file(&args[1]);
    }
}

/// Resolve a source text from `-e "code"` or a file path.
fn source_from_args(args: &[String]) -> String {
    match args {
        [flag, code, ..] if flag.as_str() == "-e" => code.clone(),
        [path, ..] => read_file_or_exit(path),
        [] => {
            eprintln!("Error: expected -e 'code' or an input file");
            process::exit(1);
        }
    }
}

fn read_file_or_exit(path: &str) -> String {
    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' not found", path);
        process::exit(1);
    }
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    })
}

fn exit_on_io(result: io::Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_file(path: &str) {
    let source = read_file_or_exit(path);
    let stdout = io::stdout();
    let stderr = io::stderr();
    exit_on_io(execute_code(&source, &mut stdout.lock(), &mut stderr.lock()));
}

fn run_code(source: &str) {
    let stdout = io::stdout();
    let stderr = io::stderr();
    exit_on_io(execute_code(source, &mut stdout.lock(), &mut stderr.lock()));
}

fn run_repl() {
    println!("falang v{} - finite automata query language", VERSION);
    println!("Type \"q\" to quit.\n");

    let mut session = ReplSession::new();

    let mut rl = DefaultEditor::new().unwrap_or_else(|e| {
        eprintln!("Error: failed to create REPL editor: {}", e);
        process::exit(1);
    });

    let history_path = history_path();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(input) => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "q" {
                    break;
                }
                let _ = rl.add_history_entry(&input);

                let stdout = io::stdout();
                let stderr = io::stderr();
                let mut out = stdout.lock();
                let mut err = stderr.lock();
                if session.eval_line(&input, &mut out, &mut err).is_err() {
                    break;
                }
                let _ = out.flush();
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Error: {:?}", e);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }
}

fn history_path() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".falang").join("history.txt"))
}

fn dump_ast(source: &str, json: bool) {
    let (program, errors) = falang_parser::parse_with_errors(source);

    if json {
        let output = serde_json::json!({
            "ast": program.to_json(),
            "errors": errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{:#?}", program);
        if !errors.is_empty() {
            println!("\n=== Parse Errors ===");
            for error in &errors {
                println!("  {}", error);
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"falang - finite automata query language

USAGE:
    falang                        Start interactive read-eval loop
    falang <file>                 Execute a program file
    falang -e <code>              Execute a code string
    falang --types <file>         Type-check and list top-level bindings
    falang --types -e <code>      Same, for a code string
    falang --dump-ast <file>      Dump the parsed AST
    falang --dump-ast --json -e <code>  Dump the AST as JSON

OPTIONS:
    -e <code>      Execute a code string
    -t, --types    Type-check only and list bindings
        --dump-ast Dump the AST (useful for debugging the parser)
        --json     JSON output for --dump-ast
    -h, --help     Show this help message

EXAMPLES:
    falang queries.fal
    falang -e 'let fa = "a" | "b"; print get_labels of fa;'
    falang --types -e 'let s = {{1 .. 5}};'
"#
    );
}
