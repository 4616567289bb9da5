//! Private spot account endpoints
//!
//! These endpoints require authentication.

use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::SpotBalance;
use bingx_types::Params;
use tracing::{debug, instrument};

const BALANCE_PATH: &str = "/openApi/spot/v1/account/balance";

/// Private spot account endpoints
pub struct SpotAccountEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> SpotAccountEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get spot balances for every asset
    ///
    /// An account without assets yields an empty list.
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Vec<SpotBalance>> {
        debug!("Fetching spot balances");

        let data: Option<BalancesData> = self
            .transport
            .get_signed(BALANCE_PATH, Params::new())
            .await?;

        Ok(data.map(|d| d.balances).unwrap_or_default())
    }

    /// Get the balance of a single asset, if the account holds it
    #[instrument(skip(self))]
    pub async fn get_asset_balance(&self, asset: &str) -> RestResult<Option<SpotBalance>> {
        let balances = self.get_balance().await?;
        Ok(balances
            .into_iter()
            .find(|b| b.asset.eq_ignore_ascii_case(asset)))
    }
}

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BalancesData {
    #[serde(default)]
    balances: Vec<SpotBalance>,
}
