use alloy::network::{AnyNetwork, EthereumWallet};
use alloy::providers::{Provider, ProviderBuilder};
use color_eyre::eyre::{eyre, Result};
use poly_merger::{
    merge_positions, ChainConfig, GasOverrides, MergerConfig, PositionMergeRequest, Safe,
};
use tracing::info;

use crate::cli::Cli;
use crate::output::MergeOutput;

pub async fn run(args: Cli) -> Result<()> {
    let request = PositionMergeRequest::parse(
        &args.amount,
        &args.condition_id,
        &args.is_neg_risk_market,
    )?;

    // Fails before any network access when the key or Safe is missing
    let config = MergerConfig::from_parts(
        Some(&args.rpc_url),
        args.private_key.as_deref(),
        args.safe.as_deref(),
        ChainConfig::new(args.chain_id),
    )?;

    info!(
        safe = %config.safe_address,
        signer = %config.signer.address(),
        chain_id = config.chain.chain_id,
        "Config loaded"
    );

    // Create provider with wallet for transaction signing
    let provider = ProviderBuilder::new()
        .network::<AnyNetwork>()
        .wallet(EthereumWallet::from(config.signer.clone()))
        .connect_http(config.rpc_url.clone());

    let remote_chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| poly_merger::Error::Fetch {
            what: "chain id",
            reason: e.to_string(),
        })?;
    if remote_chain_id != config.chain.chain_id {
        return Err(eyre!(
            "RPC endpoint is on chain {remote_chain_id}, expected {}",
            config.chain.chain_id
        ));
    }

    let gas_price = match args.gas_price {
        Some(price) => price,
        None => provider
            .get_gas_price()
            .await
            .map_err(|e| poly_merger::Error::Fetch {
                what: "gas price",
                reason: e.to_string(),
            })?,
    };
    let overrides = GasOverrides::default()
        .with_gas_limit(args.gas_limit)
        .with_gas_price(gas_price);

    let safe = Safe::new(
        provider,
        config.signer.clone(),
        config.safe_address,
        config.chain.clone(),
    );

    let outcome = merge_positions(&safe, &request, overrides).await?;

    let success = outcome.success;
    let tx_hash = outcome.tx_hash;

    MergeOutput {
        safe: safe.address(),
        signer: safe.signer_address(),
        outcome,
    }
    .print(args.json);

    if !success {
        return Err(eyre!("Merge transaction {tx_hash} reverted"));
    }

    Ok(())
}
