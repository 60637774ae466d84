use clap::Parser;
use poly_merger::DEFAULT_RPC_URL;

#[derive(Parser)]
#[command(name = "merge")]
#[command(
    about = "Merge YES/NO positions of a market back into collateral through a Safe",
    long_about = None
)]
pub struct Cli {
    /// Amount of each position to merge, in raw units (decimal or 0x hex)
    #[arg(value_name = "AMOUNT")]
    pub amount: String,

    /// Condition ID of the market (32-byte hex)
    #[arg(value_name = "CONDITION_ID")]
    pub condition_id: String,

    /// "true" to merge through the neg-risk adapter
    #[arg(value_name = "IS_NEG_RISK_MARKET")]
    pub is_neg_risk_market: String,

    /// RPC endpoint URL
    #[arg(long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the Safe owner
    #[arg(long, env = "PK", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Safe wallet address
    #[arg(long, env = "BROWSER_ADDRESS")]
    pub safe: Option<String>,

    /// Chain ID
    #[arg(long, default_value_t = poly_merger::chain::chain_ids::POLYGON)]
    pub chain_id: u64,

    /// Gas limit for the execTransaction transaction
    #[arg(long, default_value_t = 10_000_000)]
    pub gas_limit: u64,

    /// Gas price in wei (current network gas price if not set)
    #[arg(long)]
    pub gas_price: Option<u128>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
