//! SideShift REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::ClientBuilder;
use reqwest_tracing::TracingMiddleware;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::{self, Credentials, DEFAULT_COMMISSION_RATE};
use crate::config::RequestConfig;
use crate::endpoints;
use crate::error::SideShiftError;
use crate::http::{HttpExecutor, RequestDescriptor};
use crate::types::{
    Account, CancelOrderAck, Checkout, CheckoutRequest, Coin, FixedShiftRequest, Pair,
    Permissions, Quote, QuoteRequest, RecentShift, RefundAddressRequest, Shift,
    VariableShiftRequest, XaiStats,
};
use crate::validate;

/// The SideShift REST API client.
///
/// Handles authentication headers, parameter validation, and resilient
/// request execution (per-attempt timeouts, retry with capped exponential
/// backoff for idempotent calls).
///
/// # Example
///
/// ```rust,no_run
/// use sideshift_api_client::SideShiftClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SideShiftClient::new("account-secret", "affiliate-id")?;
///     let coins = client.get_coins().await?;
///     println!("{} coins supported", coins.len());
///     Ok(())
/// }
/// ```
pub struct SideShiftClient {
    executor: HttpExecutor,
    credentials: Credentials,
    header_plain: HeaderMap,
    header_icon: HeaderMap,
    header_token: HeaderMap,
    header_commission: HeaderMap,
}

impl SideShiftClient {
    /// Create a client with default settings.
    pub fn new(
        secret: impl Into<String>,
        affiliate_id: impl Into<String>,
    ) -> Result<Self, SideShiftError> {
        Self::builder(secret, affiliate_id).build()
    }

    /// Create a client builder.
    pub fn builder(
        secret: impl Into<String>,
        affiliate_id: impl Into<String>,
    ) -> SideShiftClientBuilder {
        SideShiftClientBuilder::new(secret, affiliate_id)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.executor.config().base_url, path)
    }

    fn url_with_query<Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<String, SideShiftError> {
        let query = serde_urlencoded::to_string(query)
            .map_err(|e| SideShiftError::InvalidInput(e.to_string()))?;
        if query.is_empty() {
            Ok(self.url(path))
        } else {
            Ok(format!("{}?{}", self.url(path), query))
        }
    }

    /// Serialize a request body with the affiliate id injected.
    fn body_with_affiliate<B: Serialize>(&self, request: &B) -> Result<String, SideShiftError> {
        let mut value = serde_json::to_value(request)?;
        if let Some(map) = value.as_object_mut() {
            map.insert(
                "affiliateId".to_string(),
                serde_json::Value::String(self.credentials.affiliate_id.clone()),
            );
        }
        Ok(serde_json::to_string(&value)?)
    }

    fn special_headers(&self, user_ip: Option<&str>) -> Result<HeaderMap, SideShiftError> {
        auth::with_user_ip(self.header_commission.clone(), user_ip)
    }

    async fn get_json<T>(&self, url: String, headers: HeaderMap) -> Result<T, SideShiftError>
    where
        T: serde::de::DeserializeOwned,
    {
        let descriptor = RequestDescriptor::get(url, headers);
        self.executor.execute_json(&descriptor).await
    }

    async fn post_json<T>(
        &self,
        url: String,
        headers: HeaderMap,
        body: String,
    ) -> Result<T, SideShiftError>
    where
        T: serde::de::DeserializeOwned,
    {
        let descriptor = RequestDescriptor::post(url, headers, body);
        self.executor.execute_json(&descriptor).await
    }

    // ========== GET endpoints ==========

    /// Get the list of supported coins.
    pub async fn get_coins(&self) -> Result<Vec<Coin>, SideShiftError> {
        self.get_json(self.url(endpoints::COINS), self.header_plain.clone())
            .await
    }

    /// Get a coin's icon as raw SVG bytes.
    pub async fn get_coin_icon(&self, coin: &str) -> Result<Vec<u8>, SideShiftError> {
        let coin = validate::require_string(coin, "coin", "get_coin_icon")?;
        let descriptor = RequestDescriptor::get(
            format!("{}/{}", self.url(endpoints::COIN_ICON), coin),
            self.header_icon.clone(),
        );
        self.executor.execute_bytes(&descriptor).await
    }

    /// Check whether the caller's region may create shifts.
    pub async fn get_permissions(&self) -> Result<Permissions, SideShiftError> {
        self.get_json(self.url(endpoints::PERMISSIONS), self.header_plain.clone())
            .await
    }

    /// Get rate, minimum and maximum for one trading pair.
    ///
    /// Without an amount the API assumes a deposit value of 500 USD.
    pub async fn get_pair(
        &self,
        from: &str,
        to: &str,
        amount: Option<Decimal>,
    ) -> Result<Pair, SideShiftError> {
        let from = validate::require_string(from, "from", "get_pair")?;
        let to = validate::require_string(to, "to", "get_pair")?;
        let amount = amount
            .map(|a| validate::require_amount(a, "amount", "get_pair"))
            .transpose()?;

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query<'a> {
            affiliate_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            amount: Option<Decimal>,
        }
        let url = self.url_with_query(
            &format!("{}/{}/{}", endpoints::PAIR, from, to),
            &Query {
                affiliate_id: &self.credentials.affiliate_id,
                amount,
            },
        )?;
        self.get_json(url, self.header_commission.clone()).await
    }

    /// Get rates for several pairs at once.
    ///
    /// Each entry is a coin with an optional network suffix, e.g.
    /// `btc-mainnet` or `eth`.
    pub async fn get_pairs<S: AsRef<str>>(&self, coins: &[S]) -> Result<Vec<Pair>, SideShiftError> {
        let coins = validate::require_ids(coins, "coins", "get_pairs")?;

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query<'a> {
            pairs: String,
            affiliate_id: &'a str,
        }
        let url = self.url_with_query(
            endpoints::PAIRS,
            &Query {
                pairs: coins.join(","),
                affiliate_id: &self.credentials.affiliate_id,
            },
        )?;
        self.get_json(url, self.header_commission.clone()).await
    }

    /// Get a shift by id.
    pub async fn get_shift(&self, shift_id: &str) -> Result<Shift, SideShiftError> {
        let shift_id = validate::require_string(shift_id, "shiftId", "get_shift")?;
        self.get_json(
            format!("{}/{}", self.url(endpoints::SHIFTS), shift_id),
            self.header_plain.clone(),
        )
        .await
    }

    /// Get up to ten shifts by id in one call.
    pub async fn get_bulk_shifts<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<Shift>, SideShiftError> {
        let ids = validate::require_ids(ids, "ids", "get_bulk_shifts")?;

        #[derive(Serialize)]
        struct Query {
            ids: String,
        }
        let url = self.url_with_query(endpoints::SHIFTS, &Query { ids: ids.join(",") })?;
        self.get_json(url, self.header_plain.clone()).await
    }

    /// Get recently completed shifts.
    ///
    /// `limit` is clamped to 1..=100; the API defaults to 10.
    pub async fn get_recent_shifts(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<RecentShift>, SideShiftError> {
        let url = match limit {
            Some(limit) => {
                #[derive(Serialize)]
                struct Query {
                    limit: u32,
                }
                self.url_with_query(
                    endpoints::RECENT_SHIFTS,
                    &Query {
                        limit: limit.clamp(1, 100),
                    },
                )?
            }
            None => self.url(endpoints::RECENT_SHIFTS),
        };
        self.get_json(url, self.header_plain.clone()).await
    }

    /// Get XAI token statistics.
    pub async fn get_xai_stats(&self) -> Result<XaiStats, SideShiftError> {
        self.get_json(self.url(endpoints::XAI_STATS), self.header_plain.clone())
            .await
    }

    /// Get the caller's affiliate account.
    pub async fn get_account(&self) -> Result<Account, SideShiftError> {
        self.get_json(self.url(endpoints::ACCOUNT), self.header_token.clone())
            .await
    }

    /// Get a checkout by id.
    pub async fn get_checkout(&self, checkout_id: &str) -> Result<Checkout, SideShiftError> {
        let checkout_id = validate::require_string(checkout_id, "checkoutId", "get_checkout")?;
        self.get_json(
            format!("{}/{}", self.url(endpoints::CHECKOUT), checkout_id),
            self.header_token.clone(),
        )
        .await
    }

    // ========== POST endpoints ==========

    /// Request a fixed-rate quote.
    ///
    /// The returned quote id can be passed to [`Self::create_fixed_shift`]
    /// before the quote expires.
    pub async fn request_quote(&self, request: &QuoteRequest) -> Result<Quote, SideShiftError> {
        let mut request = request.clone();
        request.deposit_coin =
            validate::require_string(&request.deposit_coin, "depositCoin", "request_quote")?;
        request.deposit_network =
            validate::require_string(&request.deposit_network, "depositNetwork", "request_quote")?;
        request.settle_coin =
            validate::require_string(&request.settle_coin, "settleCoin", "request_quote")?;
        request.settle_network =
            validate::require_string(&request.settle_network, "settleNetwork", "request_quote")?;
        if request.deposit_amount.is_none() && request.settle_amount.is_none() {
            return Err(SideShiftError::InvalidInput(
                "missing or invalid depositAmount or settleAmount parameter in request_quote"
                    .to_string(),
            ));
        }
        request.deposit_amount = request
            .deposit_amount
            .map(|a| validate::require_amount(a, "depositAmount", "request_quote"))
            .transpose()?;
        request.settle_amount = request
            .settle_amount
            .map(|a| validate::require_amount(a, "settleAmount", "request_quote"))
            .transpose()?;
        request.user_ip =
            validate::optional_string(request.user_ip.as_deref(), "userIp", "request_quote")?;

        let headers = self.special_headers(request.user_ip.as_deref())?;
        let body = self.body_with_affiliate(&request)?;
        self.post_json(self.url(endpoints::QUOTES), headers, body)
            .await
    }

    /// Create a fixed shift from a quote.
    pub async fn create_fixed_shift(
        &self,
        request: &FixedShiftRequest,
    ) -> Result<Shift, SideShiftError> {
        let op = "create_fixed_shift";
        let mut request = request.clone();
        request.settle_address =
            validate::require_string(&request.settle_address, "settleAddress", op)?;
        request.quote_id = validate::require_string(&request.quote_id, "quoteId", op)?;
        request.settle_memo =
            validate::optional_string(request.settle_memo.as_deref(), "settleMemo", op)?;
        request.refund_address =
            validate::optional_string(request.refund_address.as_deref(), "refundAddress", op)?;
        request.refund_memo =
            validate::optional_string(request.refund_memo.as_deref(), "refundMemo", op)?;
        request.external_id =
            validate::optional_string(request.external_id.as_deref(), "externalId", op)?;
        request.user_ip = validate::optional_string(request.user_ip.as_deref(), "userIp", op)?;

        let headers = self.special_headers(request.user_ip.as_deref())?;
        let body = self.body_with_affiliate(&request)?;
        self.post_json(self.url(endpoints::SHIFTS_FIXED), headers, body)
            .await
    }

    /// Create a variable shift.
    pub async fn create_variable_shift(
        &self,
        request: &VariableShiftRequest,
    ) -> Result<Shift, SideShiftError> {
        let op = "create_variable_shift";
        let mut request = request.clone();
        request.settle_address =
            validate::require_string(&request.settle_address, "settleAddress", op)?;
        request.settle_coin = validate::require_string(&request.settle_coin, "settleCoin", op)?;
        request.settle_network =
            validate::require_string(&request.settle_network, "settleNetwork", op)?;
        request.deposit_coin = validate::require_string(&request.deposit_coin, "depositCoin", op)?;
        request.deposit_network =
            validate::require_string(&request.deposit_network, "depositNetwork", op)?;
        request.refund_address =
            validate::optional_string(request.refund_address.as_deref(), "refundAddress", op)?;
        request.settle_memo =
            validate::optional_string(request.settle_memo.as_deref(), "settleMemo", op)?;
        request.refund_memo =
            validate::optional_string(request.refund_memo.as_deref(), "refundMemo", op)?;
        request.external_id =
            validate::optional_string(request.external_id.as_deref(), "externalId", op)?;
        request.user_ip = validate::optional_string(request.user_ip.as_deref(), "userIp", op)?;

        let headers = self.special_headers(request.user_ip.as_deref())?;
        let body = self.body_with_affiliate(&request)?;
        self.post_json(self.url(endpoints::SHIFTS_VARIABLE), headers, body)
            .await
    }

    /// Set the refund address for an existing shift.
    pub async fn set_refund_address(
        &self,
        request: &RefundAddressRequest,
    ) -> Result<Shift, SideShiftError> {
        let op = "set_refund_address";
        let mut request = request.clone();
        request.shift_id = validate::require_string(&request.shift_id, "shiftId", op)?;
        request.refund_address =
            validate::require_string(&request.refund_address, "refundAddress", op)?;
        request.refund_memo =
            validate::optional_string(request.refund_memo.as_deref(), "refundMemo", op)?;

        let url = format!(
            "{}/{}{}",
            self.url(endpoints::SHIFTS),
            request.shift_id,
            endpoints::SET_REFUND_ADDRESS
        );
        let body = serde_json::to_string(&request)?;
        self.post_json(url, self.header_token.clone(), body).await
    }

    /// Cancel an order.
    ///
    /// The endpoint may acknowledge with a bodiless 204; the request layer
    /// then synthesizes the [`CancelOrderAck`] from the request body.
    pub async fn cancel_order(&self, order_id: &str) -> Result<CancelOrderAck, SideShiftError> {
        let order_id = validate::require_string(order_id, "orderId", "cancel_order")?;

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            order_id: String,
        }
        let body = serde_json::to_string(&Body { order_id })?;
        self.post_json(
            self.url(endpoints::CANCEL_ORDER),
            self.header_token.clone(),
            body,
        )
        .await
    }

    /// Create a checkout.
    pub async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<Checkout, SideShiftError> {
        let op = "create_checkout";
        let mut request = request.clone();
        request.settle_coin = validate::require_string(&request.settle_coin, "settleCoin", op)?;
        request.settle_network =
            validate::require_string(&request.settle_network, "settleNetwork", op)?;
        request.settle_amount =
            validate::require_amount(request.settle_amount, "settleAmount", op)?;
        request.settle_address =
            validate::require_string(&request.settle_address, "settleAddress", op)?;
        request.success_url = validate::require_string(&request.success_url, "successUrl", op)?;
        request.cancel_url = validate::require_string(&request.cancel_url, "cancelUrl", op)?;
        request.settle_memo =
            validate::optional_string(request.settle_memo.as_deref(), "settleMemo", op)?;
        request.user_ip = validate::optional_string(request.user_ip.as_deref(), "userIp", op)?;

        let headers = self.special_headers(request.user_ip.as_deref())?;
        let body = self.body_with_affiliate(&request)?;
        self.post_json(self.url(endpoints::CHECKOUT), headers, body)
            .await
    }
}

impl std::fmt::Debug for SideShiftClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SideShiftClient")
            .field("base_url", &self.executor.config().base_url)
            .field("affiliate_id", &self.credentials.affiliate_id)
            .finish()
    }
}

/// Builder for [`SideShiftClient`].
pub struct SideShiftClientBuilder {
    secret: String,
    affiliate_id: String,
    commission_rate: String,
    config: RequestConfig,
    user_agent: Option<String>,
}

impl SideShiftClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(secret: impl Into<String>, affiliate_id: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            affiliate_id: affiliate_id.into(),
            commission_rate: DEFAULT_COMMISSION_RATE.to_string(),
            config: RequestConfig::default(),
            user_agent: None,
        }
    }

    /// Set the commission rate; a non-default rate is sent as a header.
    pub fn commission_rate(mut self, rate: impl Into<String>) -> Self {
        self.commission_rate = rate.into();
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the initial delay between retries.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the exponential backoff multiplier.
    pub fn retry_backoff(mut self, multiplier: f64) -> Self {
        self.config.retry_backoff = multiplier;
        self
    }

    /// Set the upper bound on the delay between retries.
    pub fn retry_capped_delay(mut self, cap: Duration) -> Self {
        self.config.retry_capped_delay = cap;
        self
    }

    /// Set the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Emit a structured debug dump of every request.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// Fails if the secret or affiliate id is blank or not representable as
    /// a header value.
    pub fn build(self) -> Result<SideShiftClient, SideShiftError> {
        let secret = validate::require_string(&self.secret, "secret", "SideShiftClient::build")?;
        let affiliate_id = validate::require_string(
            &self.affiliate_id,
            "affiliateId",
            "SideShiftClient::build",
        )?;
        let credentials = Credentials::new(secret, affiliate_id);

        let header_token = auth::token_headers(&credentials)?;
        let header_commission = auth::commission_headers(&credentials, &self.commission_rate)?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("sideshift-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("sideshift-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let http = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(SideShiftClient {
            executor: HttpExecutor::new(http, Arc::new(self.config)),
            credentials,
            header_plain: auth::default_headers(),
            header_icon: auth::icon_headers(),
            header_token,
            header_commission,
        })
    }
}
