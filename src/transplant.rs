//! Staking state transplantation
//!
//! Grafts a donor chain's validator set, staking and distribution state onto a
//! main chain export. Accounts from both chains are kept and supplies are
//! added up per denomination; every other module of the main chain is left as
//! it was.

use crate::amount::parse_integer;
use crate::error::{GenesisError, Result};
use crate::genesis::{display_path, GenesisDocument, SectionPath, AUTH_ACCOUNTS, DISTRIBUTION, STAKING, SUPPLY};
use crate::state::{records, Coin, Records, SupplyState};
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

/// Optional metadata overrides applied to the merged document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransplantPlan {
    pub genesis_time: Option<DateTime<Utc>>,
    pub chain_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransplantReport {
    pub main_accounts: usize,
    pub donor_accounts: usize,
    pub duplicate_accounts: usize,
    pub donor_validators: usize,
    pub supply: Vec<Coin>,
}

impl TransplantReport {
    pub fn merged_accounts(&self) -> usize {
        self.main_accounts + self.donor_accounts
    }
}

/// Move the donor's staking world into `main`. The donor is consumed; its
/// subtrees are moved, not copied.
pub fn transplant(
    main: &mut GenesisDocument,
    mut donor: GenesisDocument,
    plan: &TransplantPlan,
) -> Result<TransplantReport> {
    // The donor is ours to take apart; main is only read until every check
    // has passed.
    let main_accounts = account_count(main)?;
    let main_supply: SupplyState = main.section(SUPPLY)?;

    let donor_accounts = take_array(&mut donor, AUTH_ACCOUNTS)?;
    let donor_staking = take_object(&mut donor, STAKING)?;
    let donor_distribution = take_object(&mut donor, DISTRIBUTION)?;
    let donor_validators = donor
        .remove_field("validators")
        .ok_or_else(|| GenesisError::malformed("validators", "required field is missing in donor"))?;
    if !matches!(donor_validators, Value::Array(_) | Value::Null) {
        return Err(GenesisError::malformed(
            "validators",
            "expected an array or null in donor",
        ));
    }
    let donor_supply: SupplyState = donor.section(SUPPLY)?;
    let merged_supply = merge_supply(&[("main", &main_supply.supply), ("donor", &donor_supply.supply)])?;

    let mut accounts = take_array(main, AUTH_ACCOUNTS)?;
    let report = TransplantReport {
        main_accounts,
        donor_accounts: donor_accounts.len(),
        duplicate_accounts: count_duplicate_accounts(&accounts, &donor_accounts),
        donor_validators: donor_validators.as_array().map_or(0, Vec::len),
        supply: merged_supply.clone(),
    };
    if report.duplicate_accounts > 0 {
        warn!(
            duplicates = report.duplicate_accounts,
            "accounts present on both chains are kept twice"
        );
    }

    accounts.extend(donor_accounts);
    main.put_raw(AUTH_ACCOUNTS, Value::Array(accounts))?;
    main.insert_raw(STAKING, donor_staking)?;
    main.insert_raw(DISTRIBUTION, donor_distribution)?;
    main.set_field("validators", donor_validators);

    main.put_section(
        SUPPLY,
        &SupplyState {
            supply: Some(merged_supply),
            ..main_supply
        },
    )?;

    if let Some(time) = &plan.genesis_time {
        main.set_genesis_time(time);
    }
    if let Some(chain_id) = &plan.chain_id {
        main.set_chain_id(chain_id);
    }

    info!(
        accounts = report.merged_accounts(),
        validators = report.donor_validators,
        denoms = report.supply.len(),
        "transplanted donor staking state"
    );
    Ok(report)
}

/// Add up balances per denomination across every list. The result is sorted
/// by denomination, so the order of the inputs does not matter.
pub fn merge_supply(lists: &[(&str, &Records<Coin>)]) -> Result<Vec<Coin>> {
    let mut totals: BTreeMap<String, BigUint> = BTreeMap::new();
    for (label, list) in lists {
        for (i, coin) in records(*list).enumerate() {
            let amount = parse_integer(
                &format!("{}:{}.supply[{}].amount", label, display_path(SUPPLY), i),
                &coin.amount,
            )?;
            *totals.entry(coin.denom.clone()).or_default() += amount;
        }
    }

    Ok(totals
        .into_iter()
        .map(|(denom, amount)| Coin::new(denom, amount.to_string()))
        .collect())
}

fn take_array(doc: &mut GenesisDocument, path: SectionPath<'_>) -> Result<Vec<Value>> {
    match doc.take_raw(path)? {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        _ => Err(GenesisError::malformed(display_path(path), "expected an array")),
    }
}

fn account_count(main: &GenesisDocument) -> Result<usize> {
    match main.get(AUTH_ACCOUNTS) {
        Some(Value::Array(items)) => Ok(items.len()),
        Some(Value::Null) => Ok(0),
        Some(_) => Err(GenesisError::malformed(
            display_path(AUTH_ACCOUNTS),
            "expected an array in main",
        )),
        None => Err(GenesisError::malformed(
            display_path(AUTH_ACCOUNTS),
            "required field is missing in main",
        )),
    }
}

fn take_object(donor: &mut GenesisDocument, path: SectionPath<'_>) -> Result<Value> {
    let value = donor.take_raw(path)?;
    if !value.is_object() {
        return Err(GenesisError::malformed(
            display_path(path),
            "expected an object in donor",
        ));
    }
    Ok(value)
}

/// Accounts are either flat (`address`) or amino-wrapped (`value.address`).
fn account_address(account: &Value) -> Option<&str> {
    account
        .get("address")
        .or_else(|| account.pointer("/value/address"))
        .and_then(Value::as_str)
}

fn count_duplicate_accounts(main: &[Value], donor: &[Value]) -> usize {
    let known: HashSet<&str> = main.iter().filter_map(account_address).collect();
    donor
        .iter()
        .filter_map(account_address)
        .filter(|address| known.contains(address))
        .count()
}
