use crate::model::{Hotel, HotelSeries, PriceObservation, StoreError};
use crate::normalizer::normalize_all;
use crate::store::traits::PriceStore;
use futures::future::join_all;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Exported hotels and prices as served by the dashboard API.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub prices: Vec<PriceObservation>,
}

/// Read-only store over a JSON snapshot held in memory.
pub struct SnapshotStore {
    hotels: Vec<Hotel>,
    prices: Vec<PriceObservation>,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        let Snapshot { hotels, mut prices } = snapshot;
        normalize_all(&mut prices);
        Self { hotels, prices }
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        info!(
            "Loaded snapshot {}: {} hotels, {} prices",
            path.display(),
            snapshot.hotels.len(),
            snapshot.prices.len()
        );
        Ok(Self::new(snapshot))
    }
}

#[async_trait::async_trait]
impl PriceStore for SnapshotStore {
    async fn hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        Ok(self.hotels.clone())
    }

    async fn hotel(&self, id: i64) -> Result<Hotel, StoreError> {
        self.hotels
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or(StoreError::HotelNotFound(id))
    }

    async fn prices(&self, hotel_id: i64) -> Result<Vec<PriceObservation>, StoreError> {
        Ok(self
            .prices
            .iter()
            .filter(|p| p.hotel_id == hotel_id)
            .cloned()
            .collect())
    }
}

/// Loads a hotel and its prices.
pub async fn fetch_series<S: PriceStore + ?Sized>(store: &S, hotel_id: i64) -> Result<HotelSeries, StoreError> {
    let hotel = store.hotel(hotel_id).await?;
    let observations = store.prices(hotel_id).await?;
    Ok(HotelSeries::new(hotel, observations))
}

/// Loads several hotels concurrently, keeping the requested order. Hotels
/// that cannot be loaded are skipped.
pub async fn fetch_many<S: PriceStore + ?Sized>(store: &S, hotel_ids: &[i64]) -> Vec<HotelSeries> {
    let tasks = hotel_ids.iter().map(|&id| fetch_series(store, id));
    join_all(tasks)
        .await
        .into_iter()
        .zip(hotel_ids)
        .filter_map(|(result, id)| match result {
            Ok(series) => Some(series),
            Err(e) => {
                warn!("Skipping hotel {}: {}", id, e);
                None
            }
        })
        .collect()
}
