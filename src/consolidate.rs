//! Validator consolidation
//!
//! Collapses a whole validator set onto one target validator. The source
//! validator's records are repointed at the target identity, every delegation
//! is moved onto the target, and the stake and voting power of the entire set
//! are concentrated on it. Other validators keep nominal amounts of `1`, or
//! are dropped altogether when pruning is enabled.

use crate::amount::{parse_decimal, parse_integer, StakeTotals, NOMINAL_AMOUNT};
use crate::error::{GenesisError, Result};
use crate::genesis::{GenesisDocument, DISTRIBUTION, STAKING};
use crate::state::{
    record_count, records, records_mut, retain_records, DistributionState, LastValidatorPower,
    StakingState,
};
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Operator address and consensus key of the validator that survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorIdentity {
    pub operator_address: String,
    pub consensus_pubkey: String,
}

impl ValidatorIdentity {
    pub fn new(operator_address: impl Into<String>, consensus_pubkey: impl Into<String>) -> Result<Self> {
        let identity = ValidatorIdentity {
            operator_address: operator_address.into().trim().to_string(),
            consensus_pubkey: consensus_pubkey.into().trim().to_string(),
        };
        validate_bech32_shape("target operator address", &identity.operator_address)?;
        validate_bech32_shape("target consensus pubkey", &identity.consensus_pubkey)?;
        Ok(identity)
    }
}

/// Both target fields are bech32 strings: a human-readable prefix, the `1`
/// separator, then at least a checksum's worth of lowercase data.
fn validate_bech32_shape(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GenesisError::InvalidInput(format!("{} must be set", what)));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(GenesisError::InvalidInput(format!(
            "{} {:?} must be lowercase bech32",
            what, value
        )));
    }
    match value.rsplit_once('1') {
        Some((hrp, data)) if !hrp.is_empty() && data.len() >= 6 => Ok(()),
        _ => Err(GenesisError::InvalidInput(format!(
            "{} {:?} is not a bech32 string",
            what, value
        ))),
    }
}

/// Parameters of one consolidation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationPlan {
    pub target: ValidatorIdentity,
    /// Validator to replace. `None` picks the first entry of
    /// `app_state.staking.validators`.
    pub source_operator_address: Option<String>,
    pub prune_unused_validators: bool,
    pub genesis_time: DateTime<Utc>,
    pub chain_id: Option<String>,
}

/// What a consolidation did, for the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    pub source_address: String,
    pub target_address: String,
    pub total_tokens: String,
    pub total_shares: String,
    pub total_power: String,
    pub validators_before: usize,
    pub validators_after: usize,
    pub distribution_entries_rewritten: usize,
    pub delegations_rewritten: usize,
    pub starting_infos_rewritten: usize,
    pub redelegations_rewritten: usize,
    pub root_validators_removed: bool,
}

/// Rewrite `doc` in place so that the plan's target validator holds all stake.
pub fn consolidate(doc: &mut GenesisDocument, plan: &ConsolidationPlan) -> Result<ConsolidationReport> {
    let mut staking: StakingState = doc.section(STAKING)?;
    let mut distribution: DistributionState = doc.section(DISTRIBUTION)?;

    let source = select_source(&staking, plan.source_operator_address.as_deref())?;
    let target = plan.target.operator_address.clone();
    warn_on_double_credit(&staking, &source, &target);

    // Validate every amount before the document is touched.
    let totals = stake_totals(&staking)?;
    let total_power = parse_integer(
        "app_state.staking.last_total_power",
        &staking.last_total_power,
    )?;
    check_power_sum(&staking, &total_power)?;

    info!(source = %source, target = %target, "consolidating validator set");

    let mut report = ConsolidationReport {
        source_address: source.clone(),
        target_address: target.clone(),
        total_tokens: totals.tokens_string(),
        total_shares: totals.shares_string(),
        total_power: staking.last_total_power.clone(),
        validators_before: record_count(&staking.validators),
        ..Default::default()
    };

    report.root_validators_removed = doc.remove_field("validators").is_some();
    doc.set_genesis_time(&plan.genesis_time);
    if let Some(chain_id) = &plan.chain_id {
        doc.set_chain_id(chain_id);
    }

    for validator in records_mut(&mut staking.validators) {
        if validator.operator_address == source {
            validator.operator_address = target.clone();
            validator.consensus_pubkey = Value::String(plan.target.consensus_pubkey.clone());
        }
    }

    for collection in distribution.validator_keyed_mut() {
        for entry in records_mut(collection) {
            if entry.validator_address == source {
                entry.validator_address = target.clone();
                report.distribution_entries_rewritten += 1;
            }
        }
    }

    // Every delegation moves to the target, whichever validator it was on.
    for info in records_mut(&mut distribution.delegator_starting_infos) {
        info.validator_address = target.clone();
        report.starting_infos_rewritten += 1;
    }
    for delegation in records_mut(&mut staking.delegations) {
        delegation.validator_address = target.clone();
        report.delegations_rewritten += 1;
    }

    concentrate_power(&mut staking, &source, &target);

    for redelegation in records_mut(&mut staking.redelegations) {
        redelegation.validator_dst_address = target.clone();
        report.redelegations_rewritten += 1;
    }

    for validator in records_mut(&mut staking.validators) {
        validator.tokens = NOMINAL_AMOUNT.to_string();
        validator.delegator_shares = NOMINAL_AMOUNT.to_string();
    }
    for validator in records_mut(&mut staking.validators) {
        if validator.operator_address == target {
            validator.tokens = totals.tokens_string();
            validator.delegator_shares = totals.shares_string();
        }
    }

    if plan.prune_unused_validators {
        prune(&mut staking, &mut distribution, &target);
    }
    report.validators_after = record_count(&staking.validators);

    doc.put_section(STAKING, &staking)?;
    doc.put_section(DISTRIBUTION, &distribution)?;

    debug!(?report, "consolidation finished");
    Ok(report)
}

fn select_source(staking: &StakingState, explicit: Option<&str>) -> Result<String> {
    let validators = staking.validators.as_deref().unwrap_or_default();
    let first = validators.first().ok_or_else(|| {
        GenesisError::InvalidInput("app_state.staking.validators is empty".to_string())
    })?;

    let source = match explicit {
        None => first.operator_address.clone(),
        Some(address) => {
            if !validators.iter().any(|v| v.operator_address == address) {
                return Err(GenesisError::InvalidInput(format!(
                    "source validator {} is not in app_state.staking.validators",
                    address
                )));
            }
            address.to_string()
        }
    };
    Ok(source)
}

/// Every record under the target address receives the full totals, so a
/// target that already sits elsewhere in the set ends up credited twice.
fn warn_on_double_credit(staking: &StakingState, source: &str, target: &str) {
    let sources = records(&staking.validators)
        .filter(|v| v.operator_address == source)
        .count();
    let others = if source == target {
        0
    } else {
        records(&staking.validators)
            .filter(|v| v.operator_address == target)
            .count()
    };
    if sources + others > 1 {
        warn!(
            target = %target,
            records = sources + others,
            "target address ends up on more than one validator record, each receives the full stake"
        );
    }
}

fn stake_totals(staking: &StakingState) -> Result<StakeTotals> {
    let mut totals = StakeTotals::default();
    for (i, validator) in records(&staking.validators).enumerate() {
        let tokens = parse_integer(
            &format!("app_state.staking.validators[{}].tokens", i),
            &validator.tokens,
        )?;
        let shares = parse_decimal(
            &format!("app_state.staking.validators[{}].delegator_shares", i),
            &validator.delegator_shares,
        )?;
        totals.add(&tokens, &shares);
    }
    Ok(totals)
}

fn check_power_sum(staking: &StakingState, total_power: &BigUint) -> Result<()> {
    let mut sum = BigUint::default();
    for (i, entry) in records(&staking.last_validator_powers).enumerate() {
        sum += parse_integer(
            &format!("app_state.staking.last_validator_powers[{}].Power", i),
            &entry.power,
        )?;
    }
    if &sum != total_power {
        warn!(
            sum = %sum,
            last_total_power = %total_power,
            "last_validator_powers do not add up to last_total_power"
        );
    }
    Ok(())
}

/// Hand the whole `last_total_power` to the target and leave every other
/// entry with a power of 1.
fn concentrate_power(staking: &mut StakingState, source: &str, target: &str) {
    for entry in records_mut(&mut staking.last_validator_powers) {
        if entry.address == source {
            entry.address = target.to_string();
        }
    }

    let mut target_found = false;
    for entry in records_mut(&mut staking.last_validator_powers) {
        if entry.address == target {
            entry.power = staking.last_total_power.clone();
            target_found = true;
        } else {
            entry.power = NOMINAL_AMOUNT.to_string();
        }
    }

    if !target_found {
        warn!(target = %target, "source had no last_validator_powers entry, adding one for the target");
        staking
            .last_validator_powers
            .get_or_insert_with(Vec::new)
            .push(LastValidatorPower {
                address: target.to_string(),
                power: staking.last_total_power.clone(),
                extra: Map::new(),
            });
    }
}

fn prune(staking: &mut StakingState, distribution: &mut DistributionState, target: &str) {
    retain_records(&mut staking.validators, |v| v.operator_address == target);
    retain_records(&mut staking.last_validator_powers, |p| p.address == target);
    for collection in distribution.validator_keyed_mut() {
        retain_records(collection, |entry| entry.validator_address == target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const V1: &str = "emoneyvaloper1qqqqqqqqva";
    const V2: &str = "emoneyvaloper1qqqqqqqqvb";
    const V3: &str = "emoneyvaloper1qqqqqqqqvc";
    const V3_PUBKEY: &str = "emoneyvalconspub1qqqqqqqqvc";

    fn fixture() -> GenesisDocument {
        GenesisDocument::from_value(json!({
            "genesis_time": "2020-05-01T00:00:00Z",
            "chain_id": "emoney-1",
            "validators": [ { "address": "ABCDEF", "power": "7" } ],
            "app_state": {
                "staking": {
                    "params": { "bond_denom": "ungm" },
                    "last_total_power": "10",
                    "last_validator_powers": [
                        { "Address": V1, "Power": "7" },
                        { "Address": V2, "Power": "3" }
                    ],
                    "validators": [
                        {
                            "operator_address": V1,
                            "consensus_pubkey": "emoneyvalconspub1qqqqqqqqv1",
                            "jailed": false,
                            "tokens": "100",
                            "delegator_shares": "100.0"
                        },
                        {
                            "operator_address": V2,
                            "consensus_pubkey": "emoneyvalconspub1qqqqqqqqv2",
                            "jailed": false,
                            "tokens": "50",
                            "delegator_shares": "50.0"
                        }
                    ],
                    "delegations": [
                        { "delegator_address": "emoney1alice", "validator_address": V1, "shares": "100.0" },
                        { "delegator_address": "emoney1bob", "validator_address": V2, "shares": "50.0" }
                    ],
                    "unbonding_delegations": null,
                    "redelegations": [
                        {
                            "delegator_address": "emoney1carol",
                            "validator_src_address": V2,
                            "validator_dst_address": V1,
                            "entries": []
                        }
                    ]
                },
                "distribution": {
                    "fee_pool": { "community_pool": [] },
                    "outstanding_rewards": [
                        { "validator_address": V1, "outstanding_rewards": [] },
                        { "validator_address": V2, "outstanding_rewards": [] }
                    ],
                    "validator_accumulated_commissions": [
                        { "validator_address": V1, "accumulated": [] }
                    ],
                    "validator_current_rewards": [
                        { "validator_address": V2, "rewards": { "period": "3" } }
                    ],
                    "validator_historical_rewards": null,
                    "delegator_starting_infos": [
                        { "delegator_address": "emoney1alice", "validator_address": V1 },
                        { "delegator_address": "emoney1bob", "validator_address": V2 }
                    ]
                },
                "slashing": { "params": { "signed_blocks_window": "100" } }
            }
        }))
        .unwrap()
    }

    fn plan(prune: bool) -> ConsolidationPlan {
        ConsolidationPlan {
            target: ValidatorIdentity::new(V3, V3_PUBKEY).unwrap(),
            source_operator_address: None,
            prune_unused_validators: prune,
            genesis_time: DateTime::parse_from_rfc3339("2020-07-25T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            chain_id: None,
        }
    }

    fn staking(doc: &GenesisDocument) -> &Value {
        doc.get(STAKING).unwrap()
    }

    fn distribution(doc: &GenesisDocument) -> &Value {
        doc.get(DISTRIBUTION).unwrap()
    }

    #[test]
    fn test_scenario_two_validators_onto_third() {
        let mut doc = fixture();
        let report = consolidate(&mut doc, &plan(true)).unwrap();

        assert_eq!(report.source_address, V1);
        assert_eq!(report.total_tokens, "150");
        assert_eq!(report.total_shares, "150.0");
        assert_eq!(report.validators_before, 2);
        assert_eq!(report.validators_after, 1);

        let validators = staking(&doc)["validators"].as_array().unwrap();
        assert_eq!(validators.len(), 1);
        assert_eq!(validators[0]["operator_address"], json!(V3));
        assert_eq!(validators[0]["consensus_pubkey"], json!(V3_PUBKEY));
        assert_eq!(validators[0]["tokens"], json!("150"));
        assert_eq!(validators[0]["delegator_shares"], json!("150.0"));
        assert_eq!(validators[0]["jailed"], json!(false));

        assert_eq!(
            staking(&doc)["last_validator_powers"],
            json!([ { "Address": V3, "Power": "10" } ])
        );
    }

    #[test]
    fn test_root_metadata_rewritten() {
        let mut doc = fixture();
        let report = consolidate(&mut doc, &plan(true)).unwrap();

        assert!(report.root_validators_removed);
        assert!(doc.as_map().get("validators").is_none());
        assert_eq!(doc.genesis_time(), Some("2020-07-25T12:00:00Z"));
        assert_eq!(doc.chain_id(), Some("emoney-1"));
        assert_eq!(
            doc.get(&["app_state", "slashing", "params", "signed_blocks_window"]),
            Some(&json!("100"))
        );
    }

    #[test]
    fn test_chain_id_override() {
        let mut doc = fixture();
        let mut plan = plan(true);
        plan.chain_id = Some("emoney-2".to_string());
        consolidate(&mut doc, &plan).unwrap();
        assert_eq!(doc.chain_id(), Some("emoney-2"));
    }

    #[test]
    fn test_without_pruning_others_keep_nominal_amounts() {
        let mut doc = fixture();
        let report = consolidate(&mut doc, &plan(false)).unwrap();
        assert_eq!(report.validators_after, 2);

        let validators = staking(&doc)["validators"].as_array().unwrap();
        assert_eq!(validators[0]["operator_address"], json!(V3));
        assert_eq!(validators[0]["tokens"], json!("150"));
        assert_eq!(validators[1]["operator_address"], json!(V2));
        assert_eq!(validators[1]["tokens"], json!("1"));
        assert_eq!(validators[1]["delegator_shares"], json!("1"));

        assert_eq!(
            staking(&doc)["last_validator_powers"],
            json!([
                { "Address": V3, "Power": "10" },
                { "Address": V2, "Power": "1" }
            ])
        );
    }

    #[test]
    fn test_reward_collections_rewritten_only_for_source() {
        let mut doc = fixture();
        let report = consolidate(&mut doc, &plan(false)).unwrap();
        assert_eq!(report.distribution_entries_rewritten, 2);

        let distr = distribution(&doc);
        assert_eq!(distr["outstanding_rewards"][0]["validator_address"], json!(V3));
        assert_eq!(distr["outstanding_rewards"][1]["validator_address"], json!(V2));
        assert_eq!(
            distr["validator_accumulated_commissions"][0]["validator_address"],
            json!(V3)
        );
        assert_eq!(distr["validator_current_rewards"][0]["validator_address"], json!(V2));
        assert_eq!(distr["validator_historical_rewards"], Value::Null);
        assert_eq!(distr["fee_pool"], json!({ "community_pool": [] }));
    }

    #[test]
    fn test_delegations_and_starting_infos_all_move_to_target() {
        let mut doc = fixture();
        let report = consolidate(&mut doc, &plan(false)).unwrap();
        assert_eq!(report.delegations_rewritten, 2);
        assert_eq!(report.starting_infos_rewritten, 2);

        for delegation in staking(&doc)["delegations"].as_array().unwrap() {
            assert_eq!(delegation["validator_address"], json!(V3));
        }
        for info in distribution(&doc)["delegator_starting_infos"].as_array().unwrap() {
            assert_eq!(info["validator_address"], json!(V3));
        }
        assert_eq!(staking(&doc)["delegations"][1]["shares"], json!("50.0"));
    }

    #[test]
    fn test_redelegation_destinations_move_sources_stay() {
        let mut doc = fixture();
        let report = consolidate(&mut doc, &plan(true)).unwrap();
        assert_eq!(report.redelegations_rewritten, 1);

        let redelegation = &staking(&doc)["redelegations"][0];
        assert_eq!(redelegation["validator_dst_address"], json!(V3));
        assert_eq!(redelegation["validator_src_address"], json!(V2));
    }

    #[test]
    fn test_null_redelegations_are_fine() {
        let mut value = fixture().into_value();
        value["app_state"]["staking"]["redelegations"] = Value::Null;
        let mut doc = GenesisDocument::from_value(value).unwrap();

        let report = consolidate(&mut doc, &plan(true)).unwrap();
        assert_eq!(report.redelegations_rewritten, 0);
        assert_eq!(staking(&doc)["redelegations"], Value::Null);
        assert_eq!(staking(&doc)["unbonding_delegations"], Value::Null);
    }

    #[test]
    fn test_pruning_filters_every_validator_keyed_collection() {
        let mut doc = fixture();
        consolidate(&mut doc, &plan(true)).unwrap();

        let distr = distribution(&doc);
        assert_eq!(distr["outstanding_rewards"].as_array().unwrap().len(), 1);
        assert_eq!(distr["validator_current_rewards"], json!([]));
        // Starting infos are keyed by delegator and survive pruning.
        assert_eq!(distr["delegator_starting_infos"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_pruned_output_is_a_fixed_point() {
        let mut doc = fixture();
        consolidate(&mut doc, &plan(true)).unwrap();
        let once = doc.clone();

        let report = consolidate(&mut doc, &plan(true)).unwrap();
        assert_eq!(report.source_address, V3);
        assert!(!report.root_validators_removed);
        assert_eq!(doc, once);
    }

    #[test]
    fn test_target_equal_to_source() {
        let mut doc = fixture();
        let mut plan = plan(true);
        plan.target = ValidatorIdentity::new(V1, V3_PUBKEY).unwrap();

        let report = consolidate(&mut doc, &plan).unwrap();
        assert_eq!(report.source_address, V1);
        let validators = staking(&doc)["validators"].as_array().unwrap();
        assert_eq!(validators.len(), 1);
        assert_eq!(validators[0]["operator_address"], json!(V1));
        assert_eq!(validators[0]["consensus_pubkey"], json!(V3_PUBKEY));
        assert_eq!(validators[0]["tokens"], json!("150"));
    }

    #[test]
    fn test_explicit_source() {
        let mut doc = fixture();
        let mut plan = plan(true);
        plan.source_operator_address = Some(V2.to_string());

        let report = consolidate(&mut doc, &plan).unwrap();
        assert_eq!(report.source_address, V2);
        assert_eq!(report.distribution_entries_rewritten, 2);
        assert_eq!(staking(&doc)["validators"][0]["tokens"], json!("150"));
        assert_eq!(
            distribution(&doc)["validator_current_rewards"][0]["validator_address"],
            json!(V3)
        );
        assert_eq!(distribution(&doc)["validator_accumulated_commissions"], json!([]));
    }

    #[test]
    fn test_unknown_explicit_source_rejected() {
        let mut doc = fixture();
        let mut plan = plan(true);
        plan.source_operator_address = Some("emoneyvaloper1nobodyhere".to_string());
        let err = consolidate(&mut doc, &plan).unwrap_err();
        assert!(matches!(err, GenesisError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_validator_set_rejected() {
        let mut value = fixture().into_value();
        value["app_state"]["staking"]["validators"] = json!([]);
        let mut doc = GenesisDocument::from_value(value).unwrap();
        let before = doc.clone();

        let err = consolidate(&mut doc, &plan(true)).unwrap_err();
        assert!(matches!(err, GenesisError::InvalidInput(_)), "{err}");
        assert_eq!(doc, before);
    }

    #[test]
    fn test_null_validator_set_rejected() {
        let mut value = fixture().into_value();
        value["app_state"]["staking"]["validators"] = Value::Null;
        let mut doc = GenesisDocument::from_value(value).unwrap();

        let err = consolidate(&mut doc, &plan(true)).unwrap_err();
        assert!(matches!(err, GenesisError::InvalidInput(_)), "{err}");
    }

    #[test]
    fn test_target_already_in_the_set_is_credited_too() {
        let mut doc = fixture();
        let mut plan = plan(true);
        plan.target = ValidatorIdentity::new(V2, V3_PUBKEY).unwrap();

        let report = consolidate(&mut doc, &plan).unwrap();
        assert_eq!(report.source_address, V1);
        assert_eq!(report.validators_after, 2);
        for validator in staking(&doc)["validators"].as_array().unwrap() {
            assert_eq!(validator["operator_address"], json!(V2));
            assert_eq!(validator["tokens"], json!("150"));
        }
    }

    #[test]
    fn test_repeated_source_records_all_rewritten() {
        let mut value = fixture().into_value();
        value["app_state"]["staking"]["validators"][1]["operator_address"] = json!(V1);
        let mut doc = GenesisDocument::from_value(value).unwrap();

        consolidate(&mut doc, &plan(false)).unwrap();
        let validators = staking(&doc)["validators"].as_array().unwrap();
        assert_eq!(validators.len(), 2);
        for validator in validators {
            assert_eq!(validator["operator_address"], json!(V3));
            assert_eq!(validator["consensus_pubkey"], json!(V3_PUBKEY));
        }
    }

    #[test]
    fn test_bad_token_amount_names_the_field() {
        let mut value = fixture().into_value();
        value["app_state"]["staking"]["validators"][1]["tokens"] = json!("fifty");
        let mut doc = GenesisDocument::from_value(value).unwrap();
        let before = doc.clone();

        match consolidate(&mut doc, &plan(true)).unwrap_err() {
            GenesisError::InvalidAmount { field, value } => {
                assert_eq!(field, "app_state.staking.validators[1].tokens");
                assert_eq!(value, "fifty");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn test_missing_distribution_is_malformed() {
        let mut value = fixture().into_value();
        value["app_state"]
            .as_object_mut()
            .unwrap()
            .remove("distribution");
        let mut doc = GenesisDocument::from_value(value).unwrap();

        match consolidate(&mut doc, &plan(true)).unwrap_err() {
            GenesisError::MalformedGenesis { path, .. } => {
                assert_eq!(path, "app_state.distribution")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_source_without_power_entry_gets_one() {
        let mut value = fixture().into_value();
        value["app_state"]["staking"]["last_validator_powers"] =
            json!([ { "Address": V2, "Power": "10" } ]);
        let mut doc = GenesisDocument::from_value(value).unwrap();

        consolidate(&mut doc, &plan(true)).unwrap();
        assert_eq!(
            staking(&doc)["last_validator_powers"],
            json!([ { "Address": V3, "Power": "10" } ])
        );
    }

    #[test]
    fn test_identity_validation() {
        assert!(ValidatorIdentity::new(V3, V3_PUBKEY).is_ok());
        assert!(ValidatorIdentity::new("", V3_PUBKEY).is_err());
        assert!(ValidatorIdentity::new("EmoneyValoper1ABCDEFG", V3_PUBKEY).is_err());
        assert!(ValidatorIdentity::new("emoneyvaloper", V3_PUBKEY).is_err());
        assert!(ValidatorIdentity::new(V3, "emoney1abc").is_err());
        let trimmed = ValidatorIdentity::new(format!("  {}  ", V3), V3_PUBKEY).unwrap();
        assert_eq!(trimmed.operator_address, V3);
    }
}
