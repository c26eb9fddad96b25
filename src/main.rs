use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, WrapErr};
use std::io::{self, Write};
use xcalc::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a formula
    Tokenize {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Print the parsed formula in prefix notation
    Parse {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        #[arg(long, default_value_t = parser::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Evaluate a formula at a value of x
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
        /// Reject variables other than x instead of reading them as zero
        #[arg(long)]
        strict: bool,
        #[arg(long, default_value_t = parser::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Prompt for a formula and a value of x
    Calc,
}

fn prompt(message: &str) -> miette::Result<String> {
    print!("{message}");
    io::stdout().flush().into_diagnostic()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .into_diagnostic()
        .wrap_err("reading stdin failed")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokenize { expression } => {
            for token in Lexer::new(&expression) {
                let token = token?;
                println!("{:>3} {:<6} {}", token.offset, token, token.kind);
            }
        }
        Commands::Parse {
            expression,
            max_depth,
        } => {
            let expr = parser::Parser::new(&expression)
                .with_max_depth(max_depth)
                .parse()?;
            println!("{expr}");
        }
        Commands::Eval {
            expression,
            x,
            strict,
            max_depth,
        } => {
            let expr = parser::Parser::new(&expression)
                .with_max_depth(max_depth)
                .parse()?;
            let value = Evaluator::new(x).strict(strict).eval(&expr)?;
            println!("{value:.2}");
        }
        Commands::Calc => {
            let expression = prompt("Enter a function of x: ")?;
            let input = prompt("Enter value for x: ")?;
            let x: f64 = input
                .trim()
                .parse()
                .into_diagnostic()
                .wrap_err_with(|| format!("'{}' is not a value for x", input.trim()))?;

            let expr = parse_expression(&expression)?;
            let value = evaluate(&expr, x)?;
            println!("Result: {value:.2}");
        }
    }

    Ok(())
}
