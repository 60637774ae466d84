//! Merge flow against the forked conditional-tokens contract

use alloy::primitives::{B256, U256};
use poly_merger::{encode_packed, merge_positions, GasOverrides, PackedParam, PositionMergeRequest};

use crate::common::{IConditionalTokensAdmin, TestHarness};
use crate::skip_if_no_rpc;

#[tokio::test]
async fn test_condition_id_matches_packed_encoding() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let ctf = IConditionalTokensAdmin::new(
        poly_merger::MergeAddresses::polygon().conditional_tokens,
        &harness.provider,
    );

    let oracle = harness.signer_address();
    let question_id = B256::repeat_byte(0x51);
    let on_chain = ctf
        .getConditionId(oracle, question_id, U256::from(2))
        .call()
        .await
        .unwrap();

    let packed = encode_packed(&[
        PackedParam::Address(oracle),
        PackedParam::fixed_bytes(question_id.as_slice()).unwrap(),
        PackedParam::uint256(U256::from(2)),
    ])
    .unwrap();

    assert_eq!(alloy::primitives::keccak256(&packed), on_chain);
}

#[tokio::test]
async fn test_merge_on_prepared_condition() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness.deploy_safe(U256::from(10)).await.unwrap();
    let safe = harness.safe_client(safe_address);

    let ctf = IConditionalTokensAdmin::new(safe.config().addresses.conditional_tokens, &harness.provider);
    let oracle = harness.signer_address();
    let question_id = B256::repeat_byte(0x52);

    ctf.prepareCondition(oracle, question_id, U256::from(2))
        .send()
        .await
        .unwrap()
        .get_receipt()
        .await
        .unwrap();
    let condition_id = ctf
        .getConditionId(oracle, question_id, U256::from(2))
        .call()
        .await
        .unwrap();
    assert_eq!(
        ctf.getOutcomeSlotCount(condition_id).call().await.unwrap(),
        U256::from(2)
    );

    // A zero merge burns nothing and returns no collateral, but runs the full path
    let request = PositionMergeRequest::new(U256::ZERO, condition_id, false);
    let outcome = merge_positions(&safe, &request, GasOverrides::default())
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.to, safe.config().addresses.conditional_tokens);
    assert_ne!(outcome.safe_tx_hash, B256::ZERO);
    assert_eq!(safe.nonce().await.unwrap(), U256::from(1));
}

#[tokio::test]
async fn test_merge_on_unknown_condition_reverts() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness.deploy_safe(U256::from(11)).await.unwrap();
    let safe = harness.safe_client(safe_address);

    let request = PositionMergeRequest::new(U256::from(1), B256::repeat_byte(0x99), false);

    // Fixed gas limit skips estimation so the revert is mined
    let overrides = GasOverrides::default().with_gas_limit(1_000_000);
    let outcome = merge_positions(&safe, &request, overrides).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(safe.nonce().await.unwrap(), U256::ZERO);
}
