#![forbid(unsafe_code)]
//! Rewrite genesis exports: consolidate a validator set onto one validator, or
//! transplant one chain's staking state into another.

use clap::{Args, Parser, Subcommand};
use colored::*;
use genesis_surgeon::cli::{
    init_logging, print_consolidation_summary, print_transplant_summary, run_consolidate,
    run_transplant,
};
use genesis_surgeon::config::{
    load_config_or_default, ConsolidateConfig, ConsolidateSection, OutputSection,
    TransplantConfig, TransplantSection,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with [consolidate], [transplant] and [output] tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collapse the validator set onto a single validator
    Consolidate(ConsolidateArgs),
    /// Graft a donor chain's validators, staking and distribution state onto a main chain
    Transplant(TransplantArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// Indent the emitted JSON
    #[arg(long)]
    pretty: bool,
    /// Sort object keys recursively
    #[arg(long)]
    sort_keys: bool,
}

impl OutputArgs {
    fn section(&self) -> OutputSection {
        OutputSection {
            pretty: self.pretty.then_some(true),
            sort_keys: self.sort_keys.then_some(true),
        }
    }
}

#[derive(Args)]
struct ConsolidateArgs {
    /// Genesis file to rewrite
    #[arg(long)]
    input: Option<PathBuf>,
    /// Where to write the result (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Operator address of the surviving validator
    #[arg(long)]
    target_operator: Option<String>,
    /// Consensus public key of the surviving validator
    #[arg(long)]
    target_pubkey: Option<String>,
    /// Validator to replace (defaults to the first one in the staking state)
    #[arg(long)]
    source_operator: Option<String>,
    /// New genesis_time, RFC 3339
    #[arg(long)]
    genesis_time: Option<String>,
    /// New chain_id
    #[arg(long)]
    chain_id: Option<String>,
    /// Keep the other validators with nominal stake instead of dropping them
    #[arg(long)]
    keep_unused: bool,
    #[command(flatten)]
    output_args: OutputArgs,
}

#[derive(Args)]
struct TransplantArgs {
    /// Export of the chain that keeps its accounts and modules
    #[arg(long)]
    main: Option<PathBuf>,
    /// Export whose validators, staking and distribution state are adopted
    #[arg(long)]
    donor: Option<PathBuf>,
    /// Where to write the result (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
    /// New genesis_time, RFC 3339
    #[arg(long)]
    genesis_time: Option<String>,
    /// New chain_id
    #[arg(long)]
    chain_id: Option<String>,
    #[command(flatten)]
    output_args: OutputArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let file = load_config_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Consolidate(args) => {
            let section = file.consolidate.overlay(ConsolidateSection {
                input: args.input,
                output: args.output,
                target_operator_address: args.target_operator,
                target_consensus_pubkey: args.target_pubkey,
                source_operator_address: args.source_operator,
                prune_unused_validators: args.keep_unused.then_some(false),
                genesis_time: args.genesis_time,
                chain_id: args.chain_id,
            });
            let output = file.output.overlay(args.output_args.section());
            let config = ConsolidateConfig::resolve(section, output)?;

            let report = run_consolidate(&config)?;
            print_consolidation_summary(&config, &report);
        }
        Commands::Transplant(args) => {
            let section = file.transplant.overlay(TransplantSection {
                main: args.main,
                donor: args.donor,
                output: args.output,
                genesis_time: args.genesis_time,
                chain_id: args.chain_id,
            });
            let output = file.output.overlay(args.output_args.section());
            let config = TransplantConfig::resolve(section, output)?;

            let report = run_transplant(&config)?;
            print_transplant_summary(&config, &report);
        }
    }

    Ok(())
}
