//! Position merging through a Safe
//!
//! [`build_merge_call`] selects the contract that recombines the two outcome
//! positions of a market into collateral and encodes the call; it does no
//! network access. [`merge_positions`] runs the whole flow:
//! built, nonce read, hash computed, signed, submitted, then confirmed or failed.

use alloy::network::primitives::ReceiptResponse;
use alloy::network::AnyNetwork;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::providers::Provider;
use alloy::sol_types::SolCall;
use serde::Serialize;
use tracing::{info, warn};

use crate::chain::MergeAddresses;
use crate::contracts::{IConditionalTokens, INegRiskAdapter};
use crate::error::{Error, Result};
use crate::safe::Safe;
use crate::signing::DigestSigner;
use crate::types::{GasOverrides, PositionMergeRequest};

/// Index sets of the two outcomes of a binary market
pub const BINARY_PARTITION: [u64; 2] = [1, 2];

/// A call to be executed by the Safe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    /// Target contract
    pub to: Address,
    /// Calldata
    pub data: Bytes,
}

/// Builds the merge call for `request`
///
/// Neg-risk markets call `mergePositions(conditionId, amount)` on the adapter.
/// Standard markets call `mergePositions(collateral, 0x0, conditionId, [1, 2], amount)`
/// on the conditional-tokens contract.
pub fn build_merge_call(request: &PositionMergeRequest, addresses: &MergeAddresses) -> MergeCall {
    if request.is_neg_risk_market {
        let call = INegRiskAdapter::mergePositionsCall {
            conditionId: request.condition_id,
            amount: request.amount,
        };
        MergeCall {
            to: addresses.neg_risk_adapter,
            data: Bytes::from(call.abi_encode()),
        }
    } else {
        let call = IConditionalTokens::mergePositionsCall {
            collateralToken: addresses.collateral,
            parentCollectionId: B256::ZERO,
            conditionId: request.condition_id,
            partition: BINARY_PARTITION.iter().map(|i| U256::from(*i)).collect(),
            amount: request.amount,
        };
        MergeCall {
            to: addresses.conditional_tokens,
            data: Bytes::from(call.abi_encode()),
        }
    }
}

/// Result of a submitted merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Contract the Safe called
    pub to: Address,
    /// Hash the Safe owner signed
    pub safe_tx_hash: B256,
    /// Hash of the outer `execTransaction` transaction
    pub tx_hash: TxHash,
    /// Whether the transaction was mined successfully
    pub success: bool,
}

/// Builds, signs and submits a merge, then waits for its receipt
///
/// Any failure before submission aborts with nothing sent. A mined but
/// reverted transaction is reported through [`MergeOutcome::success`].
pub async fn merge_positions<P, S>(
    safe: &Safe<P, S>,
    request: &PositionMergeRequest,
    overrides: GasOverrides,
) -> Result<MergeOutcome>
where
    P: Provider<AnyNetwork> + Clone + 'static,
    S: DigestSigner + Send + Sync,
{
    let call = build_merge_call(request, &safe.config().addresses);
    info!(
        to = %call.to,
        amount = %request.amount,
        condition_id = %request.condition_id,
        neg_risk = request.is_neg_risk_market,
        "Built merge call"
    );

    let (signed, pending_tx) = safe.sign_and_execute(call.to, call.data, overrides).await?;

    let tx_hash = *pending_tx.tx_hash();
    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| Error::ReceiptUnavailable {
            tx_hash,
            reason: e.to_string(),
        })?;

    let outcome = MergeOutcome {
        to: call.to,
        safe_tx_hash: signed.safe_tx_hash,
        tx_hash: receipt.transaction_hash,
        success: receipt.status(),
    };

    if outcome.success {
        info!(tx_hash = %outcome.tx_hash, "Merge confirmed");
    } else {
        warn!(tx_hash = %outcome.tx_hash, "Merge transaction reverted");
    }

    Ok(outcome)
}
