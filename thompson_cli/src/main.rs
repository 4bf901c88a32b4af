use clap::Parser;
use log::debug;
use std::process::ExitCode;
use thompson::postfix::{parse_postfix, render, to_postfix};
use thompson::{Error, Regex, SyntaxError, Trace};

/// Compiles a pattern into a Thompson NFA and matches whole subjects against it.
#[derive(Debug, Parser)]
#[command(name = "thompson", version, about)]
struct Cli {
    /// Pattern, infix syntax unless --postfix is given
    pattern: String,

    /// Strings to match against the pattern
    subjects: Vec<String>,

    /// Read the pattern as postfix notation (`&` concatenates, e.g. `abc|*&`)
    #[arg(long)]
    postfix: bool,

    /// Report the longest accepted prefix instead of a whole-subject verdict
    #[arg(long)]
    prefix: bool,

    /// Print the automaton in graphviz dot format
    #[arg(long)]
    dot: bool,

    /// Print the active state set after every consumed symbol
    #[arg(long)]
    trace: bool,
}

fn format_syntax_error(error: &SyntaxError, pattern: &str) -> String {
    format!(
        "Error: {}\n{}\n{}^",
        error,
        pattern,
        " ".repeat(error.position())
    )
}

fn compile(cli: &Cli) -> Result<Regex, String> {
    let tokens = if cli.postfix {
        parse_postfix(&cli.pattern)
    } else {
        to_postfix(&cli.pattern)
    };
    let result = tokens.map_err(Error::from).and_then(|tokens| {
        debug!("postfix form '{}'", render(&tokens));
        Regex::from_postfix(tokens).map_err(Error::from)
    });

    result.map_err(|err| match err {
        Error::Syntax(e) => format_syntax_error(&e, &cli.pattern),
        Error::MalformedPattern(e) => format!("Error: {}", e),
    })
}

// the first step is the start closure, each later one follows one consumed char
fn trace_lines(trace: &Trace, subject: &str) -> Vec<String> {
    let mut steps = trace.steps().iter();
    steps
        .next()
        .map(|start| format!("  start -> {}", start))
        .into_iter()
        .chain(
            steps
                .zip(subject.chars())
                .map(|(set, c)| format!("  '{}' -> {}", c, set)),
        )
        .collect()
}

fn print_trace(regex: &Regex, subject: &str) {
    let trace = regex.nfa().trace(subject.chars());
    for line in trace_lines(&trace, subject) {
        println!("{}", line);
    }
    if let Some((earlier, later)) = trace.first_repeat() {
        println!("  step {} repeats step {}", later, earlier);
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let regex = match compile(&cli) {
        Ok(regex) => regex,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    if cli.dot {
        println!("{}", regex.nfa().to_dot());
    }

    let mut all_accepted = true;
    for subject in &cli.subjects {
        if cli.prefix {
            match regex.longest_prefix(subject) {
                Some(prefix) => println!("{}: '{}'", subject, prefix),
                None => {
                    all_accepted = false;
                    println!("{}: no match", subject);
                }
            }
        } else {
            let accepted = regex.is_exact_match(subject);
            all_accepted &= accepted;
            println!("{}: {}", subject, if accepted { "accept" } else { "reject" });
        }

        if cli.trace {
            print_trace(&regex, subject);
        }
    }

    if all_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
