mod batch;
mod highlighter;
mod lexer;

use clap::{Parser, Subcommand};
use miette::Result;
use paxl::{EvaluatorOptions, Interpreter, Value, parse, render_error};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, ValidationResult, Validator, default_emacs_keybindings,
};
use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;

/// Paxl - a small expression language with first-class blocks
#[derive(Parser, Debug)]
#[command(name = "paxl")]
#[command(about = "Evaluate Paxl programs", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Print the parsed node graph (for debugging)
    #[arg(long, global = true)]
    debug_parse: bool,

    /// Maximum number of nested block calls
    #[arg(long, global = true, default_value_t = EvaluatorOptions::default().max_depth)]
    max_depth: usize,

    #[command(subcommand)]
    command: Option<Command>,

    /// Program to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a tab-separated file, one program per cell
    Batch {
        /// Input file, one row per line
        file: PathBuf,

        /// Number of worker threads
        #[arg(long, default_value_t = 4)]
        threads: usize,
    },
}

const KEYWORDS: &[&str] = &["if", "else", "for", "and", "or", "not", "true", "false", "this"];

/// Keeps reading lines while braces or parentheses are open.
struct BracketValidator;

impl Validator for BracketValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        match lexer::calculate_depth(line) {
            Some(depth) if depth > 0 => ValidationResult::Incomplete,
            _ => ValidationResult::Complete,
        }
    }
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let commands: Vec<String> = KEYWORDS.iter().map(|k| k.to_string()).collect();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['_']);
        completions.insert(commands);
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(highlighter::Highlighter))
        .with_validator(Box::new(BracketValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("paxl".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Parse and evaluate `input` in the interpreter's root scope. Errors are
/// rendered to stderr and yield `None`.
fn interpret_input(interpreter: &mut Interpreter, input: &str, debug_parse: bool) -> Option<Value> {
    let program = match parse(input) {
        Ok(program) => program,
        Err(e) => {
            render_error(&e.into());
            return None;
        }
    };

    if debug_parse {
        println!("=== Parsed Program ===");
        println!("{:#?}", program);
        println!();
    }

    match interpreter.eval(&program) {
        Ok(value) => Some(value),
        Err(e) => {
            render_error(&e);
            None
        }
    }
}

fn run_repl(interpreter: &mut Interpreter, debug_parse: bool) {
    let (mut line_editor, prompt) = setup_reedline();

    println!("Paxl REPL - Type programs to evaluate (exit, Ctrl+D or Ctrl+C to quit)");

    loop {
        let sig = match line_editor.read_line(&prompt) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Reedline error: {e}");
                return;
            }
        };

        match sig {
            Signal::Success(buffer) if buffer.trim() == "exit" => {
                println!("Goodbye!");
                return;
            }
            Signal::Success(buffer) if buffer.trim().is_empty() => {}
            Signal::Success(buffer) => {
                if let Some(value) = interpret_input(interpreter, &buffer, debug_parse) {
                    println!("=> {}", value);
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nGoodbye!");
                return;
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = EvaluatorOptions {
        max_depth: args.max_depth,
    };

    if let Some(Command::Batch { file, threads }) = args.command {
        let options = batch::BatchOptions {
            threads,
            evaluator: options,
        };
        for line in batch::run_file(&file, &options)? {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut interpreter = Interpreter::with_options(options);

    // Check if we have a direct expression argument
    if let Some(expr) = args.expression {
        if let Some(value) = interpret_input(&mut interpreter, &expr, args.debug_parse) {
            println!("{}", value);
        }
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    if atty::is(atty::Stream::Stdin) {
        run_repl(&mut interpreter, args.debug_parse);
    } else {
        // Pipe/stdin mode: every line shares one root scope
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            if let Some(value) = interpret_input(&mut interpreter, &line, args.debug_parse) {
                println!("{}", value);
            }
        }
    }

    Ok(())
}
