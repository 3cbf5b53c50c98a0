use crate::model::{Hotel, PriceObservation, StoreError};

/// Source of hotels and their price history.
#[async_trait::async_trait]
pub trait PriceStore: Send + Sync {
    async fn hotels(&self) -> Result<Vec<Hotel>, StoreError>;
    async fn hotel(&self, id: i64) -> Result<Hotel, StoreError>;
    async fn prices(&self, hotel_id: i64) -> Result<Vec<PriceObservation>, StoreError>;
}
