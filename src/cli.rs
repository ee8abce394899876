//! Shared plumbing for the command-line tool: logging setup, the
//! load → transform → write pipelines and the run summaries.

use crate::config::{ConsolidateConfig, TransplantConfig};
use crate::consolidate::{consolidate, ConsolidationReport};
use crate::error::Result;
use crate::genesis::GenesisDocument;
use crate::transplant::{transplant, TransplantReport};
use colored::*;
use tracing::{info, Level};

/// Install the fmt subscriber. Logs go to stderr since stdout may carry the
/// rewritten document.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the input, consolidate it and write the result. Nothing is written
/// when any step fails.
pub fn run_consolidate(config: &ConsolidateConfig) -> Result<ConsolidationReport> {
    info!(input = %config.input.display(), "loading genesis");
    let mut doc = GenesisDocument::load(&config.input)?;
    let report = consolidate(&mut doc, &config.plan)?;
    doc.write(&config.output, config.output_options)?;
    Ok(report)
}

/// Load both exports, transplant the donor's staking state into main and
/// write the result. Nothing is written when any step fails.
pub fn run_transplant(config: &TransplantConfig) -> Result<TransplantReport> {
    info!(main = %config.main.display(), donor = %config.donor.display(), "loading genesis exports");
    let mut main = GenesisDocument::load(&config.main)?;
    let donor = GenesisDocument::load(&config.donor)?;
    let report = transplant(&mut main, donor, &config.plan)?;
    main.write(&config.output, config.output_options)?;
    Ok(report)
}

pub fn print_consolidation_summary(config: &ConsolidateConfig, report: &ConsolidationReport) {
    eprintln!("{}", "Validator set consolidated".bright_green().bold());
    eprintln!("  {:<24}{}", "Replaced validator:", report.source_address.bright_white());
    eprintln!("  {:<24}{}", "Surviving validator:", report.target_address.bright_cyan());
    eprintln!("  {:<24}{}", "Total tokens:", report.total_tokens.bright_yellow());
    eprintln!("  {:<24}{}", "Total shares:", report.total_shares.bright_yellow());
    eprintln!("  {:<24}{}", "Voting power:", report.total_power.bright_yellow());
    eprintln!(
        "  {:<24}{} → {}",
        "Validators:", report.validators_before, report.validators_after
    );
    eprintln!(
        "  {:<24}{} delegations, {} starting infos, {} redelegations, {} reward entries",
        "Rewritten:",
        report.delegations_rewritten,
        report.starting_infos_rewritten,
        report.redelegations_rewritten,
        report.distribution_entries_rewritten
    );
    eprintln!("  {:<24}{}", "Output:", config.output.to_string().italic());
}

pub fn print_transplant_summary(config: &TransplantConfig, report: &TransplantReport) {
    eprintln!("{}", "Staking state transplanted".bright_green().bold());
    eprintln!(
        "  {:<24}{} + {} = {}",
        "Accounts:",
        report.main_accounts,
        report.donor_accounts,
        report.merged_accounts()
    );
    if report.duplicate_accounts > 0 {
        eprintln!(
            "  {:<24}{}",
            "Duplicate accounts:",
            report.duplicate_accounts.to_string().yellow()
        );
    }
    eprintln!("  {:<24}{}", "Validators:", report.donor_validators);
    eprintln!("  {}", "Supply:".bright_white());
    for coin in &report.supply {
        eprintln!("    {:<22}{}", coin.denom, coin.amount.bright_yellow());
    }
    eprintln!("  {:<24}{}", "Output:", config.output.to_string().italic());
}
