use clap::{Parser as ClapParser, Subcommand};
use stencil_lang::{
    cli::{self, CheckOptions, CheckResult, CliError, RenderOptions},
    output::{to_json, to_json_pretty},
};
use std::io::{self, Read};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "stencil")]
#[command(about = "Stencil - substitute {{ expressions }} in text from a JSON data context")]
#[command(version)]
struct Cli {
    /// Log every substitution, not only failures
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template, replacing each {{ expression }} marker
    Render {
        /// The template text
        template: String,

        /// JSON data context (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Fail on the first marker that cannot be evaluated
        #[arg(long)]
        strict: bool,
    },

    /// Evaluate a single expression and print the result as JSON
    Eval {
        /// The expression to evaluate
        expression: String,

        /// JSON data context (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render {
            template,
            input,
            strict,
        } => run_render(template, input, strict),
        Commands::Eval {
            expression,
            input,
            pretty,
            syntax_only,
        } => run_eval(expression, input, pretty, syntax_only),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_render(template: String, input: Option<String>, strict: bool) -> Result<(), CliError> {
    let options = RenderOptions {
        template,
        input: read_input(input)?,
        strict,
    };

    println!("{}", cli::execute_render(&options)?);
    Ok(())
}

fn run_eval(
    expression: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = if syntax_only { None } else { read_input(input)? };

    let options = CheckOptions {
        expression,
        input,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(value) => {
            let json = if pretty {
                to_json_pretty(&value)
            } else {
                to_json(&value)
            };
            println!("{}", json);
        }
    }
    Ok(())
}
