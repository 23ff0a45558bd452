//! Types for coin listings, pairs, account data and statistics.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::serde_as;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A coin listing from the `/coins` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// Coin symbol, e.g. `BTC`.
    pub coin: String,
    /// Display name, e.g. `Bitcoin`.
    pub name: String,
    /// Networks the coin is available on.
    #[serde(default)]
    pub networks: Vec<String>,
    /// Whether deposits/settlements require a memo.
    #[serde(default)]
    pub has_memo: bool,
    /// Coin is only available for fixed-rate shifts.
    #[serde(default)]
    pub fixed_only: NetworkToggle,
    /// Coin is only available for variable-rate shifts.
    #[serde(default)]
    pub variable_only: NetworkToggle,
    /// Deposits are currently offline.
    #[serde(default)]
    pub deposit_offline: NetworkToggle,
    /// Settlements are currently offline.
    #[serde(default)]
    pub settle_offline: NetworkToggle,
    /// Per-network token contract details, when the coin is a token.
    #[serde(default)]
    pub token_details: Option<serde_json::Value>,
}

/// A flag SideShift reports either for the whole coin or per network.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NetworkToggle {
    /// The flag applies to every network.
    All(bool),
    /// The flag applies to the listed networks only.
    Networks(Vec<String>),
}

impl Default for NetworkToggle {
    fn default() -> Self {
        NetworkToggle::All(false)
    }
}

/// Response from the `/permissions` endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    /// Whether the caller's region may create shifts.
    pub create_shift: bool,
}

/// A trading pair quote from `/pair` or `/pairs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    /// Minimum deposit amount.
    pub min: Decimal,
    /// Maximum deposit amount.
    pub max: Decimal,
    /// Current exchange rate.
    pub rate: Decimal,
    /// Deposit coin symbol.
    pub deposit_coin: String,
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Deposit network.
    pub deposit_network: String,
    /// Settle network.
    pub settle_network: String,
}

/// A recently completed shift from `/recent-shifts`.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentShift {
    /// When the shift was created.
    #[serde_as(as = "Rfc3339")]
    pub created_at: OffsetDateTime,
    /// Deposit coin symbol.
    pub deposit_coin: String,
    /// Deposit network.
    pub deposit_network: String,
    /// Deposited amount.
    pub deposit_amount: Decimal,
    /// Settle coin symbol.
    pub settle_coin: String,
    /// Settle network.
    pub settle_network: String,
    /// Settled amount.
    pub settle_amount: Decimal,
}

/// XAI token statistics from `/xai/stats`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XaiStats {
    /// Total token supply (reported as a raw JSON number).
    pub total_supply: f64,
    /// Circulating token supply (reported as a raw JSON number).
    pub circulating_supply: f64,
    /// Number of staking accounts.
    pub number_of_stakers: u64,
    /// Latest APY.
    pub latest_annual_percentage_yield: Decimal,
    /// XAI distributed in the latest period.
    pub latest_distributed_xai: Decimal,
    /// Total staked XAI.
    pub total_staked: Decimal,
    /// Average APY.
    pub average_annual_percentage_yield: Decimal,
    /// Total value locked, in USD.
    pub total_value_locked: Decimal,
    /// TVL as a ratio of market cap.
    pub total_value_locked_ratio: Decimal,
    /// XAI price in USD.
    pub xai_price_usd: Decimal,
    /// svXAI price in USD.
    pub svxai_price_usd: Decimal,
    /// svXAI price in XAI.
    pub svxai_price_xai: Decimal,
}

/// The caller's affiliate account, from `/account`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account (affiliate) id.
    pub id: String,
    /// Lifetime staking rewards.
    pub lifetime_staking_rewards: Decimal,
    /// XAI currently unstaking.
    pub unstaking: Decimal,
    /// XAI currently staked.
    pub staked: Decimal,
    /// Available balance.
    pub available: Decimal,
    /// Total balance.
    pub total_balance: Decimal,
}
