use alloy::primitives::Address;
use poly_merger::MergeOutcome;
use serde::Serialize;

#[derive(Serialize)]
pub struct MergeOutput {
    pub safe: Address,
    pub signer: Address,
    #[serde(flatten)]
    pub outcome: MergeOutcome,
}

impl MergeOutput {
    pub fn print(&self, json: bool) {
        if json {
            println!("{}", serde_json::to_string_pretty(self).unwrap());
        } else {
            println!("Merge Executed:");
            println!("  Safe: {}", self.safe);
            println!("  Signer: {}", self.signer);
            println!("  Target: {}", self.outcome.to);
            println!("  Safe Tx Hash: {}", self.outcome.safe_tx_hash);
            println!("  Tx Hash: {}", self.outcome.tx_hash);
            println!("  Success: {}", self.outcome.success);
        }
    }
}
