use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use miralang::lexer::{Lexer, Token, TokenKind};
use miralang::parser::Parser as MiraParser;
use miralang::{error::LexerError, SemanticAnalyzer};

#[derive(Parser)]
#[command(name = "miralang")]
#[command(author, version, about = "The Mira language compiler front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a Mira source file for errors
    Check {
        /// The source file to check
        input: PathBuf,
    },

    /// Dump the token stream of a Mira source file
    Tokens {
        /// The source file to tokenize
        input: PathBuf,
    },

    /// Dump the AST of a Mira source file as JSON
    Ast {
        /// The source file to parse
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Check { input } => check(input),
        Commands::Tokens { input } => dump_tokens(input),
        Commands::Ast { input } => dump_ast(input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Compilation pipeline state
struct CompilationState {
    source: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
}

impl CompilationState {
    fn new(source_file: PathBuf) -> Result<Self> {
        let source = fs::read_to_string(&source_file)
            .with_context(|| format!("Failed to read source file: {:?}", source_file))?;

        let mut files = SimpleFiles::new();
        let file_id = files.add(source_file.display().to_string(), source.clone());

        Ok(Self {
            source,
            files,
            file_id,
        })
    }

    fn report_error(&self, diagnostic: &Diagnostic<usize>) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Always);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        Ok(())
    }

    /// Tokenize the source and report unrecognized tokens
    fn tokenize(&self) -> Result<Vec<Token>> {
        log::debug!("Starting lexical analysis");
        let tokens: Vec<Token> = Lexer::new(&self.source).collect();

        let mut has_errors = false;
        for token in &tokens {
            if matches!(token.kind, TokenKind::Error) {
                has_errors = true;
                let error = LexerError::UnrecognizedToken {
                    text: token.text.clone(),
                    span: token.span,
                };
                self.report_error(&error.to_diagnostic(self.file_id))?;
            }
        }

        if has_errors {
            anyhow::bail!("Lexical analysis failed");
        }

        Ok(tokens)
    }

    fn parse(&self) -> Result<miralang::Program> {
        let tokens = self.tokenize()?;

        log::debug!("Starting parsing");
        let mut parser = MiraParser::new(tokens);
        match parser.parse() {
            Ok(program) => Ok(program),
            Err(e) => {
                self.report_error(&e.to_diagnostic(self.file_id))?;
                anyhow::bail!("Parsing failed");
            }
        }
    }
}

fn check(input: PathBuf) -> Result<()> {
    log::info!("Checking {:?}", input);

    let state = CompilationState::new(input)?;
    let program = state.parse()?;

    log::debug!("Starting semantic analysis");
    let analysis = SemanticAnalyzer::new().analyze(&program);
    if !analysis.is_ok() {
        for error in &analysis.errors {
            state.report_error(&error.to_diagnostic(state.file_id))?;
        }
        anyhow::bail!("Semantic analysis failed with {} errors", analysis.errors.len());
    }

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn dump_tokens(input: PathBuf) -> Result<()> {
    let state = CompilationState::new(input)?;
    let tokens = state.tokenize()?;

    for (i, token) in tokens.iter().enumerate() {
        println!("{:4}: {:?}", i, token);
    }

    Ok(())
}

fn dump_ast(input: PathBuf) -> Result<()> {
    let state = CompilationState::new(input)?;
    let program = state.parse()?;

    println!("{}", serde_json::to_string_pretty(&program)?);
    Ok(())
}
