//! AgenticAttest CLI: `attest` command.
//!
//! Runs transaction functions against a file-backed ledger: register
//! identities, share claims, request and publish attestations.

mod config;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use agentic_attest::{Contract, EntityKind, FileLedger, Function, LedgerKey, Response};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// AgenticAttest CLI: identity claims and attestations on a local ledger.
#[derive(Parser, Debug)]
#[command(
    name = "attest",
    about = "AgenticAttest CLI",
    version,
    long_about = "attest - AgenticAttest CLI\n\nRegister identities, share claims with attesters, and request\nand publish attestations against a file-backed ledger."
)]
struct Cli {
    /// Ledger file (default: $AGENTIC_ATTEST_LEDGER or ~/.agentic/attest/ledger.json)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    /// Allow initLedger to write the demo identities
    #[arg(long, global = true)]
    demo: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a function and commit its writes
    Invoke {
        /// Function name (see `attest functions`)
        function: String,

        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a function without committing anything
    Query {
        /// Function name (see `attest functions`)
        function: String,

        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List ledger keys by entity kind
    Keys,

    /// List the available functions and their arguments
    Functions,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Invoke { function, args } => {
            cmd_invoke(cli.ledger, cli.demo, &function, &args, verbose)
        }
        Commands::Query { function, args } => {
            cmd_query(cli.ledger, cli.demo, &function, &args, verbose)
        }
        Commands::Keys => cmd_keys(cli.ledger, verbose),
        Commands::Functions => cmd_functions(verbose),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_ledger(flag: Option<PathBuf>, verbose: bool) -> Result<FileLedger> {
    let path = config::ledger_path(flag)?;
    if verbose {
        eprintln!("ledger: {}", path.display());
    }
    FileLedger::open(&path).with_context(|| format!("failed to open ledger {}", path.display()))
}

fn print_response(response: &Response, verbose: bool) -> Result<()> {
    if !response.is_empty() {
        // Payloads are JSON; anything else is printed as-is.
        match response.json() {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => println!("{}", response.text()),
        }
    }
    if verbose {
        match &response.commit {
            Some(commit) => eprintln!("{}", serde_json::to_string_pretty(commit)?),
            None => eprintln!("(not committed)"),
        }
    }
    Ok(())
}

// ── Command implementations ───────────────────────────────────────────────────

/// `attest invoke <function> [args..]`
fn cmd_invoke(
    ledger: Option<PathBuf>,
    demo: bool,
    function: &str,
    args: &[String],
    verbose: bool,
) -> Result<()> {
    let mut ledger = open_ledger(ledger, verbose)?;
    let contract = Contract::new(config::contract_config(demo));
    let response = contract.invoke(&mut ledger, function, args)?;
    print_response(&response, verbose)
}

/// `attest query <function> [args..]`
fn cmd_query(
    ledger: Option<PathBuf>,
    demo: bool,
    function: &str,
    args: &[String],
    verbose: bool,
) -> Result<()> {
    let mut ledger = open_ledger(ledger, verbose)?;
    let contract = Contract::new(config::contract_config(demo));
    let response = contract.evaluate(&mut ledger, function, args)?;
    print_response(&response, verbose)
}

/// `attest keys`
fn cmd_keys(ledger: Option<PathBuf>, verbose: bool) -> Result<()> {
    use agentic_attest::Ledger;

    let ledger = open_ledger(ledger, verbose)?;
    let keys = ledger.keys()?;
    if keys.is_empty() {
        println!("Ledger is empty ({})", ledger.path().display());
        return Ok(());
    }

    let mut grouped: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
    for key in &keys {
        let (kind, id) = LedgerKey::classify(key);
        grouped.entry(kind.as_str()).or_default().push(id);
    }

    println!("{:<14} ID", "KIND");
    println!("{}", "-".repeat(48));
    for kind in [
        EntityKind::Identity,
        EntityKind::AttestationRequests,
        EntityKind::Attestations,
    ] {
        for id in grouped.get(kind.as_str()).into_iter().flatten() {
            println!("{:<14} {id}", kind.as_str());
        }
    }
    if verbose {
        eprintln!("{} key(s)", keys.len());
    }
    Ok(())
}

/// `attest functions`
fn cmd_functions(verbose: bool) -> Result<()> {
    for function in Function::ALL {
        let params = function.params().join(" ");
        if verbose {
            let mode = if function.is_query() { "query" } else { "invoke" };
            println!("{:<26} {:<7} {params}", function.name(), mode);
        } else {
            println!("{:<26} {params}", function.name());
        }
    }
    Ok(())
}
