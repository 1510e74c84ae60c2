use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::dataset::Dataset;

/// Holds the dataset currently being searched
///
/// Readers get an `Arc` snapshot, so a replacement never disturbs a search
/// already in progress.
#[derive(Debug, Default)]
pub struct DatasetStore {
    current: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(dataset))),
        }
    }

    /// Swap in a new dataset, returning the one it replaced
    pub async fn replace(&self, dataset: Dataset) -> Option<Arc<Dataset>> {
        let mut current = self.current.write().await;
        tracing::debug!("Replacing dataset with {} ({} rows)", dataset.id, dataset.len());
        current.replace(Arc::new(dataset))
    }

    pub async fn current(&self) -> Option<Arc<Dataset>> {
        self.current.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn dataset(rows: usize) -> Dataset {
        let records = (0..rows)
            .map(|i| Record::new(i, Some("John"), Some("Smith"), None))
            .collect();
        Dataset::new("test", records)
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = DatasetStore::new();
        assert!(!store.is_loaded().await);
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_keeps_old_snapshot_alive() {
        let store = DatasetStore::with_dataset(dataset(1));
        let snapshot = store.current().await.unwrap();

        let previous = store.replace(dataset(3)).await.unwrap();

        assert_eq!(previous.id, snapshot.id);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.current().await.unwrap().len(), 3);
    }
}
