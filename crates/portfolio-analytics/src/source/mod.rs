//! Asset Sources
//!
//! The seam between the analytics core and whatever fetches quotes. Sources
//! hand over fully populated records; missing figures are already zeroed.

mod fallback;

pub use fallback::{sector_for, StaticAssetSource, TRACKED_SYMBOLS};

use async_trait::async_trait;

use crate::error::Result;
use crate::model::AssetRecord;

/// Quote provider (Strategy pattern)
///
/// Implement this for each upstream feed; the analytics core only sees the
/// resulting snapshot.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Current snapshot of every tracked asset
    async fn fetch_assets(&self) -> Result<Vec<AssetRecord>>;

    /// Look up one symbol in the current snapshot
    async fn get_asset(&self, symbol: &str) -> Result<Option<AssetRecord>> {
        let symbol = symbol.to_uppercase();
        Ok(self
            .fetch_assets()
            .await?
            .into_iter()
            .find(|asset| asset.symbol == symbol))
    }

    /// Source name
    fn name(&self) -> &str;
}
