use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use log::info;

use frontend::{
    config::{OptimizationLevel, Options},
    create_ast,
    errors::reporter::ConsoleReporter,
    lexer::lexer::tokenize,
};

/// Front end of the compiler: parses and checks a source file.
#[derive(Parser, Debug)]
#[command(name = "frontend")]
#[command(about = "Parses and checks a source file, printing its diagnostics")]
struct Cli {
    /// Source file, standard input when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Do not print errors
    #[arg(short = 'E')]
    no_errors: bool,

    /// Do not print warnings
    #[arg(short = 'W')]
    no_warnings: bool,

    /// Do not print messages
    #[arg(short = 'M')]
    no_messages: bool,

    /// Optimization level (0, 1, 2, 3, s, z)
    #[arg(short = 'O', default_value = "0")]
    opt_level: String,

    /// Print the parsed program as s-expressions
    #[arg(long)]
    print_ast: bool,

    /// Print the token stream
    #[arg(long)]
    print_tokens: bool,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let opt_level = OptimizationLevel::from_flag(&self.opt_level)
            .ok_or_else(|| anyhow!("invalid optimization level `{}`", self.opt_level))?;

        Ok(Options {
            opt_level,
            print_messages: !self.no_messages,
            print_warnings: !self.no_warnings,
            print_errors: !self.no_errors,
        })
    }

    fn read_source(&self) -> Result<String> {
        match &self.input {
            Some(path) => read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display())),
            None => {
                let mut source = String::new();
                io::stdin()
                    .read_to_string(&mut source)
                    .context("failed to read standard input")?;
                Ok(source)
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.options()?;
    let source = cli.read_source()?;
    info!("optimization level {}", options.opt_level);

    if cli.print_tokens {
        for token in tokenize(&source) {
            token.debug();
        }
    }

    let start = Instant::now();
    let mut reporter = ConsoleReporter::new(options);
    let ast = create_ast(&source, &mut reporter);
    info!("parsed in {:?}", start.elapsed());

    match ast {
        Ok(ast) => {
            if cli.print_ast {
                println!("{}", ast.dump());
            }
            Ok(())
        }
        Err(count) => {
            let plural = if count == 1 { "" } else { "s" };
            eprintln!("aborting due to {} error{}", count, plural);
            std::process::exit(1);
        }
    }
}
