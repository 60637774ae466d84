//! Safe signing and execution against a forked Safe

use alloy::network::primitives::ReceiptResponse;
use alloy::primitives::{Address, Bytes, U256};
use poly_merger::signing::validate_signature;
use poly_merger::GasOverrides;

use crate::common::TestHarness;
use crate::skip_if_no_rpc;

#[tokio::test]
async fn test_fresh_safe_nonce_is_zero() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness.deploy_safe(U256::from(1)).await.unwrap();
    let safe = harness.safe_client(safe_address);

    assert_eq!(safe.nonce().await.unwrap(), U256::ZERO);
    assert_eq!(safe.signer_address(), harness.signer_address());
}

#[tokio::test]
async fn test_sign_produces_eth_sign_signature() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness.deploy_safe(U256::from(2)).await.unwrap();
    let safe = harness.safe_client(safe_address);

    let signed = safe
        .sign(Address::repeat_byte(0x42), Bytes::new())
        .await
        .unwrap();

    assert_eq!(signed.params.nonce(), U256::ZERO);
    assert_eq!(signed.signature.len(), 65);
    validate_signature(&signed.signature).unwrap();

    // Same parameters hash to the same value
    let again = safe.transaction_hash(&signed.params).await.unwrap();
    assert_eq!(again, signed.safe_tx_hash);
}

#[tokio::test]
async fn test_sign_and_execute_increments_nonce() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness.deploy_safe(U256::from(3)).await.unwrap();
    let safe = harness.safe_client(safe_address);

    let (_, pending_tx) = safe
        .sign_and_execute(Address::repeat_byte(0x42), Bytes::new(), GasOverrides::default())
        .await
        .unwrap();
    let receipt = pending_tx.get_receipt().await.unwrap();

    assert!(receipt.status(), "execTransaction should succeed");
    assert_eq!(safe.nonce().await.unwrap(), U256::from(1));
}

#[tokio::test]
async fn test_stale_signature_is_rejected() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness.deploy_safe(U256::from(4)).await.unwrap();
    let safe = harness.safe_client(safe_address);

    let stale = safe
        .sign(Address::repeat_byte(0x42), Bytes::new())
        .await
        .unwrap();

    // Consume nonce 0 with another transaction
    let (_, pending_tx) = safe
        .sign_and_execute(Address::repeat_byte(0x43), Bytes::new(), GasOverrides::default())
        .await
        .unwrap();
    pending_tx.get_receipt().await.unwrap();

    // Estimation fails, or the mined transaction reverts
    let overrides = GasOverrides::default().with_gas_limit(500_000);
    match safe.execute(&stale, overrides).await {
        Err(_) => {}
        Ok(pending_tx) => {
            let receipt = pending_tx.get_receipt().await.unwrap();
            assert!(!receipt.status(), "stale signature must not execute");
        }
    }

    assert_eq!(safe.nonce().await.unwrap(), U256::from(1));
}
