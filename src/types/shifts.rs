//! Types for quotes, shifts, checkouts and order cancellation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A fixed-rate quote from the `/quotes` endpoint.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Quote id, used to create a fixed shift.
    pub id: String,
    /// When the quote was created.
    #[serde_as(as = "Rfc3339")]
    pub created_at: OffsetDateTime,
    /// Deposit coin symbol.
    pub deposit_coin: String,
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Deposit network.
    pub deposit_network: String,
    /// Settle network.
    pub settle_network: String,
    /// When the quote expires.
    #[serde_as(as = "Rfc3339")]
    pub expires_at: OffsetDateTime,
    /// Quoted deposit amount.
    pub deposit_amount: Decimal,
    /// Quoted settle amount.
    pub settle_amount: Decimal,
    /// Quoted exchange rate.
    pub rate: Decimal,
    /// Affiliate id the quote was created under.
    pub affiliate_id: String,
}

/// Whether a shift has a locked-in rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    /// Rate locked by a quote.
    Fixed,
    /// Rate determined at settlement time.
    Variable,
}

/// Lifecycle status of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    /// Waiting for a deposit.
    Waiting,
    /// Deposit detected, waiting for confirmations.
    Pending,
    /// Deposit confirmed, conversion in progress.
    Processing,
    /// Shift held for manual review.
    Review,
    /// Settlement in progress.
    Settling,
    /// Settlement complete.
    Settled,
    /// Queued for refund.
    Refund,
    /// Refund in progress.
    Refunding,
    /// Refund complete.
    Refunded,
    /// Shift expired without a deposit.
    Expired,
    /// Multiple deposits received; see the per-deposit list.
    Multiple,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// A shift, as returned by shift creation and lookup endpoints.
///
/// Fixed and variable shifts share this shape; fields that only apply to
/// one kind, or only once the shift settles or refunds, are optional.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// Shift id.
    pub id: String,
    /// When the shift was created.
    #[serde_as(as = "Rfc3339")]
    pub created_at: OffsetDateTime,
    /// Deposit coin symbol.
    pub deposit_coin: String,
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Deposit network.
    pub deposit_network: String,
    /// Settle network.
    pub settle_network: String,
    /// Address to deposit into.
    pub deposit_address: String,
    /// Memo required for the deposit, when the network uses memos.
    #[serde(default)]
    pub deposit_memo: Option<String>,
    /// Address the settlement is sent to.
    pub settle_address: String,
    /// Memo attached to the settlement.
    #[serde(default)]
    pub settle_memo: Option<String>,
    /// Minimum accepted deposit.
    pub deposit_min: Decimal,
    /// Maximum accepted deposit.
    pub deposit_max: Decimal,
    /// Fixed or variable rate.
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    /// When the shift expires.
    #[serde_as(as = "Option<Rfc3339>")]
    #[serde(default)]
    pub expires_at: Option<OffsetDateTime>,
    /// Current lifecycle status.
    pub status: ShiftStatus,
    /// Last status change.
    #[serde_as(as = "Option<Rfc3339>")]
    #[serde(default)]
    pub updated_at: Option<OffsetDateTime>,
    /// Average time to settlement, in seconds.
    #[serde(default)]
    pub average_shift_seconds: Option<Decimal>,
    /// Integration-supplied external id.
    #[serde(default)]
    pub external_id: Option<String>,
    /// Exchange rate (locked for fixed shifts).
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Quote the shift was created from (fixed shifts).
    #[serde(default)]
    pub quote_id: Option<String>,
    /// Deposit amount (fixed or settled shifts).
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
    /// Settle amount (fixed or settled shifts).
    #[serde(default)]
    pub settle_amount: Option<Decimal>,
    /// Settlement network fee in settle coin (variable shifts).
    #[serde(default)]
    pub settle_coin_network_fee: Option<Decimal>,
    /// Settlement network fee in USD (variable shifts).
    #[serde(default)]
    pub network_fee_usd: Option<Decimal>,
    /// Deposit transaction hash, once received.
    #[serde(default)]
    pub deposit_hash: Option<String>,
    /// Settlement transaction hash, once settled.
    #[serde(default)]
    pub settle_hash: Option<String>,
    /// When the deposit was received.
    #[serde_as(as = "Option<Rfc3339>")]
    #[serde(default)]
    pub deposit_received_at: Option<OffsetDateTime>,
    /// Refund address, once set.
    #[serde(default)]
    pub refund_address: Option<String>,
    /// Refund memo, once set.
    #[serde(default)]
    pub refund_memo: Option<String>,
    /// Per-deposit detail when several deposits arrived.
    #[serde(default)]
    pub deposits: Option<Vec<ShiftDeposit>>,
}

/// One deposit of a multi-deposit variable shift.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDeposit {
    /// Last status change for this deposit.
    #[serde_as(as = "Option<Rfc3339>")]
    #[serde(default)]
    pub updated_at: Option<OffsetDateTime>,
    /// Deposit transaction hash.
    #[serde(default)]
    pub deposit_hash: Option<String>,
    /// Settlement transaction hash.
    #[serde(default)]
    pub settle_hash: Option<String>,
    /// When the deposit was received.
    #[serde_as(as = "Option<Rfc3339>")]
    #[serde(default)]
    pub deposit_received_at: Option<OffsetDateTime>,
    /// Deposited amount.
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
    /// Settled amount.
    #[serde(default)]
    pub settle_amount: Option<Decimal>,
    /// Rate applied to this deposit.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Status of this deposit.
    pub status: ShiftStatus,
}

/// A checkout from the `/checkout` endpoints.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    /// Checkout id.
    pub id: String,
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Settle network.
    pub settle_network: String,
    /// Address the settlement is sent to.
    pub settle_address: String,
    /// Memo attached to the settlement.
    #[serde(default)]
    pub settle_memo: Option<String>,
    /// Amount to settle.
    pub settle_amount: Decimal,
    /// Last update.
    #[serde_as(as = "Rfc3339")]
    pub updated_at: OffsetDateTime,
    /// When the checkout was created.
    #[serde_as(as = "Rfc3339")]
    pub created_at: OffsetDateTime,
    /// Affiliate id the checkout was created under.
    #[serde(default)]
    pub affiliate_id: Option<String>,
    /// URL the payer is sent to on success.
    pub success_url: String,
    /// URL the payer is sent to on cancellation.
    pub cancel_url: String,
}

/// Acknowledgement for `/cancel-order`.
///
/// The endpoint may reply with a bodiless 204; the request layer then
/// synthesizes this envelope from the original request body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderAck {
    /// Whether the cancellation was accepted.
    pub success: bool,
    /// The cancelled order id, when it could be recovered.
    pub order_id: Option<String>,
}

/// Parameters for requesting a fixed-rate quote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Deposit coin symbol.
    pub deposit_coin: String,
    /// Deposit network.
    pub deposit_network: String,
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Settle network.
    pub settle_network: String,
    /// Amount to deposit; give this or `settle_amount`, not both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<Decimal>,
    /// Amount to settle; give this or `deposit_amount`, not both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_amount: Option<Decimal>,
    /// End user IP, forwarded in the `x-user-ip` header.
    #[serde(skip)]
    pub user_ip: Option<String>,
}

/// Parameters for creating a fixed shift from a quote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedShiftRequest {
    /// Address to settle into.
    pub settle_address: String,
    /// Quote to lock the rate from.
    pub quote_id: String,
    /// Memo for the settlement, when the network uses memos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_memo: Option<String>,
    /// Refund address, should the shift fail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_address: Option<String>,
    /// Memo for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_memo: Option<String>,
    /// Integration-supplied external id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// End user IP, forwarded in the `x-user-ip` header.
    #[serde(skip)]
    pub user_ip: Option<String>,
}

/// Parameters for creating a variable shift.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableShiftRequest {
    /// Address to settle into.
    pub settle_address: String,
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Settle network.
    pub settle_network: String,
    /// Deposit coin symbol.
    pub deposit_coin: String,
    /// Deposit network.
    pub deposit_network: String,
    /// Refund address, should the shift fail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_address: Option<String>,
    /// Memo for the settlement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_memo: Option<String>,
    /// Memo for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_memo: Option<String>,
    /// Integration-supplied external id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// End user IP, forwarded in the `x-user-ip` header.
    #[serde(skip)]
    pub user_ip: Option<String>,
}

/// Parameters for setting a refund address on an existing shift.
#[derive(Debug, Clone, Serialize)]
pub struct RefundAddressRequest {
    /// Shift to update; becomes part of the URL, not the body.
    #[serde(skip)]
    pub shift_id: String,
    /// Refund address.
    #[serde(rename = "address")]
    pub refund_address: String,
    /// Refund memo.
    #[serde(rename = "memo", skip_serializing_if = "Option::is_none")]
    pub refund_memo: Option<String>,
}

/// Parameters for creating a checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Settle network.
    pub settle_network: String,
    /// Amount to settle.
    pub settle_amount: Decimal,
    /// Address to settle into.
    pub settle_address: String,
    /// URL the payer is sent to on success.
    pub success_url: String,
    /// URL the payer is sent to on cancellation.
    pub cancel_url: String,
    /// Memo for the settlement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_memo: Option<String>,
    /// End user IP, forwarded in the `x-user-ip` header.
    #[serde(skip)]
    pub user_ip: Option<String>,
}
