//! Typed views onto the genesis subtrees the transforms touch
//!
//! Only the fields the transforms read or write are named; everything else a
//! record carries is kept in an `extra` map and written back unchanged.
//! Collections that an export may encode as JSON `null` are `Option<Vec<_>>`
//! so that `null` survives a round trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type Records<T> = Option<Vec<T>>;

/// The key must be present, but its value may be `null`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Records<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::deserialize(deserializer)
}

/// Iterate mutably over a possibly-null collection.
pub fn records_mut<T>(records: &mut Records<T>) -> impl Iterator<Item = &mut T> {
    records.iter_mut().flatten()
}

/// Iterate over a possibly-null collection.
pub fn records<T>(records: &Records<T>) -> impl Iterator<Item = &T> {
    records.iter().flatten()
}

/// Keep only the entries matching `keep`, leaving `null` as `null`.
pub fn retain_records<T>(records: &mut Records<T>, keep: impl FnMut(&T) -> bool) {
    if let Some(list) = records.as_mut() {
        list.retain(keep);
    }
}

pub fn record_count<T>(records: &Records<T>) -> usize {
    records.as_ref().map_or(0, Vec::len)
}

/// A bonded validator in `app_state.staking.validators`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Validator {
    pub operator_address: String,
    pub consensus_pubkey: Value,
    pub tokens: String,
    pub delegator_shares: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Any record that points at a validator through `validator_address`:
/// delegations, starting infos and the per-validator distribution entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatorRef {
    pub validator_address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of `last_validator_powers`. Amino exports capitalise both keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LastValidatorPower {
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Power")]
    pub power: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Redelegation {
    pub validator_src_address: String,
    pub validator_dst_address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `app_state.staking`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StakingState {
    #[serde(deserialize_with = "nullable")]
    pub validators: Records<Validator>,
    #[serde(deserialize_with = "nullable")]
    pub delegations: Records<ValidatorRef>,
    #[serde(deserialize_with = "nullable")]
    pub last_validator_powers: Records<LastValidatorPower>,
    pub last_total_power: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redelegations: Records<Redelegation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `app_state.distribution`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionState {
    #[serde(deserialize_with = "nullable")]
    pub outstanding_rewards: Records<ValidatorRef>,
    #[serde(deserialize_with = "nullable")]
    pub validator_accumulated_commissions: Records<ValidatorRef>,
    #[serde(deserialize_with = "nullable")]
    pub validator_current_rewards: Records<ValidatorRef>,
    #[serde(deserialize_with = "nullable")]
    pub validator_historical_rewards: Records<ValidatorRef>,
    #[serde(deserialize_with = "nullable")]
    pub delegator_starting_infos: Records<ValidatorRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DistributionState {
    /// The four collections keyed by validator address. Starting infos are
    /// keyed by delegator and are not part of this set.
    pub fn validator_keyed_mut(&mut self) -> [&mut Records<ValidatorRef>; 4] {
        [
            &mut self.outstanding_rewards,
            &mut self.validator_accumulated_commissions,
            &mut self.validator_current_rewards,
            &mut self.validator_historical_rewards,
        ]
    }

    pub fn validator_keyed(&self) -> [&Records<ValidatorRef>; 4] {
        [
            &self.outstanding_rewards,
            &self.validator_accumulated_commissions,
            &self.validator_current_rewards,
            &self.validator_historical_rewards,
        ]
    }
}

/// One `{denom, amount}` balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Coin {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// `app_state.supply`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplyState {
    #[serde(deserialize_with = "nullable")]
    pub supply: Records<Coin>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
