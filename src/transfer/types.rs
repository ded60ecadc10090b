use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::gateway::types::StrictAmount;

/// Transfer request body. Amounts cross the API as strings to avoid float
/// precision issues in JSON.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    #[schema(example = "WLT-AB12CD34EF")]
    pub recipient_wallet_id: String,
    #[schema(value_type = String, example = "100.50")]
    pub amount: StrictAmount,
    #[schema(example = "rent, thanks!")]
    pub note: Option<String>,
    #[schema(example = "4931")]
    pub pin: String,
    /// Optional client idempotency key; a replay with the same cid returns
    /// the original outcome instead of moving value twice
    pub cid: Option<String>,
}

/// Recipient summary echoed back on success
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipientInfo {
    pub name: String,
    pub wallet_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransferOutcome {
    pub transaction_id: String,
    /// Sender balance after the debit, formatted with 2 fraction digits
    #[schema(example = "899.50")]
    pub new_balance: String,
    pub recipient: RecipientInfo,
}
