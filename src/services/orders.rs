//! Order submission gateway.
//!
//! Submission is one-shot: a failure is surfaced to the caller and never
//! retried, so a rejected order can't silently consume a trade slot.

use serde::Serialize;
use tracing::debug;

use crate::error::OrderError;
use crate::models::TradeIntent;

/// Whatever JSON body the upstream acknowledged the order with.
#[derive(Debug, Clone)]
pub struct OrderAck(pub serde_json::Value);

#[async_trait::async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_order(&self, intent: &TradeIntent) -> Result<OrderAck, OrderError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderRequest<'a> {
    symbol: &'a str,
    quantity: u32,
    order_type: &'a str,
    product_type: &'a str,
    validity: &'a str,
    variety: &'a str,
}

/// Intraday order placement over REST with a bearer credential.
pub struct RestOrderGateway {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

impl RestOrderGateway {
    pub fn new(base_url: String, access_token: String) -> Self {
        Self::with_client(base_url, access_token, reqwest::Client::new())
    }

    pub fn with_client(base_url: String, access_token: String, client: reqwest::Client) -> Self {
        Self {
            base_url,
            access_token,
            client,
        }
    }
}

#[async_trait::async_trait]
impl OrderGateway for RestOrderGateway {
    async fn place_order(&self, intent: &TradeIntent) -> Result<OrderAck, OrderError> {
        let url = format!("{}/orders", self.base_url);
        let body = OrderRequest {
            symbol: &intent.symbol,
            quantity: intent.quantity,
            order_type: intent.side.as_order_type(),
            product_type: "MIS",
            validity: "DAY",
            variety: "REGULAR",
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| OrderError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrderError::Rejected {
                status: status.as_u16(),
            });
        }

        let ack: serde_json::Value =
            response.json().await.map_err(|e| OrderError::Transport {
                reason: e.to_string(),
            })?;

        debug!(symbol = %intent.symbol, side = intent.side.as_order_type(), "order acknowledged");
        Ok(OrderAck(ack))
    }
}
