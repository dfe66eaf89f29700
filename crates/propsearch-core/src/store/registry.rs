use std::sync::Arc;

use tracing::debug;

use super::{
    DatasetId, DatasetStore, MetadataStore, PropertyStore, Record, SchoolStore, TransitStore,
};
use crate::api::{ApiClient, Endpoint};
use crate::bootstrap::{BootstrapCoordinator, Initialize};
use crate::cache::Persistence;
use crate::config::PersistSettings;

/// The application's four dataset stores, constructed once at startup and
/// handed to whatever reads them.
pub struct Stores {
    pub property: Arc<PropertyStore>,
    pub school: Arc<SchoolStore>,
    pub transit: Arc<TransitStore>,
    pub metadata: Arc<MetadataStore>,
}

impl Stores {
    /// Wire every store to its API resource and, where enabled, to `persistence`
    pub fn new(
        client: &ApiClient,
        persistence: Option<Arc<dyn Persistence>>,
        settings: PersistSettings,
    ) -> Self {
        let persisted = |id: DatasetId| persistence.clone().filter(|_| settings.enabled(id));

        Self {
            property: Arc::new(attach(
                DatasetStore::new(
                    DatasetId::Property,
                    Endpoint::collection(client.clone(), DatasetId::Property.resource_path()),
                ),
                persisted(DatasetId::Property),
            )),
            school: Arc::new(attach(
                DatasetStore::new(
                    DatasetId::School,
                    Endpoint::collection(client.clone(), DatasetId::School.resource_path()),
                ),
                persisted(DatasetId::School),
            )),
            transit: Arc::new(attach(
                DatasetStore::new(
                    DatasetId::Transit,
                    Endpoint::collection(client.clone(), DatasetId::Transit.resource_path()),
                ),
                persisted(DatasetId::Transit),
            )),
            metadata: Arc::new(attach(
                DatasetStore::new(
                    DatasetId::Metadata,
                    Endpoint::single(client.clone(), DatasetId::Metadata.resource_path()),
                ),
                persisted(DatasetId::Metadata),
            )),
        }
    }

    /// Load every persisted snapshot. Returns the datasets that were hydrated.
    pub fn hydrate_all(&self) -> Vec<DatasetId> {
        let hydrated: Vec<DatasetId> = [
            (DatasetId::Property, self.property.hydrate()),
            (DatasetId::School, self.school.hydrate()),
            (DatasetId::Transit, self.transit.hydrate()),
            (DatasetId::Metadata, self.metadata.hydrate()),
        ]
        .into_iter()
        .filter_map(|(id, hydrated)| hydrated.then_some(id))
        .collect();

        debug!(count = hydrated.len(), "Stores hydrated");
        hydrated
    }

    pub fn handles(&self) -> Vec<Arc<dyn Initialize>> {
        let handles: [Arc<dyn Initialize>; 4] = [
            self.property.clone(),
            self.school.clone(),
            self.transit.clone(),
            self.metadata.clone(),
        ];
        handles.to_vec()
    }

    pub fn coordinator(&self) -> BootstrapCoordinator {
        BootstrapCoordinator::new(self.handles())
    }
}

fn attach<R: Record>(
    store: DatasetStore<R>,
    persistence: Option<Arc<dyn Persistence>>,
) -> DatasetStore<R> {
    match persistence {
        Some(persistence) => store.with_persistence(persistence),
        None => store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use std::time::Duration;

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_persistence_follows_settings() {
        let cache: Arc<dyn Persistence> = Arc::new(MemoryCache::new());
        let stores = Stores::new(&client(), Some(cache), PersistSettings::default());

        assert!(!stores.property.is_persisted());
        assert!(stores.school.is_persisted());
        assert!(stores.transit.is_persisted());
        assert!(stores.metadata.is_persisted());
    }

    #[test]
    fn test_no_persistence_adapter() {
        let stores = Stores::new(&client(), None, PersistSettings::default());
        assert!(!stores.school.is_persisted());
        assert!(stores.hydrate_all().is_empty());
    }

    #[test]
    fn test_hydrate_all_reports_hydrated_datasets() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .save(
                DatasetId::Transit,
                r#"{"data":[{"id":"1","name":"Bank","postcode":"EC3V 3LA","coordinates":[-0.088,51.513],"lines":["Central"]}],"cached_at":"2024-03-01T12:00:00Z"}"#,
            )
            .unwrap();
        // Not persisted by default, so ignored even if present
        cache
            .save(DatasetId::Property, r#"{"data":[],"cached_at":"2024-03-01T12:00:00Z"}"#)
            .unwrap();

        let persistence = Some(cache as Arc<dyn Persistence>);
        let stores = Stores::new(&client(), persistence, PersistSettings::default());
        assert_eq!(stores.hydrate_all(), vec![DatasetId::Transit]);
        assert_eq!(stores.transit.all_lines(), vec!["Central"]);
        assert!(stores.property.is_empty());
    }

    #[test]
    fn test_handles_cover_every_dataset() {
        let stores = Stores::new(&client(), None, PersistSettings::default());
        let ids: Vec<DatasetId> = stores.handles().iter().map(|h| h.dataset()).collect();
        assert_eq!(ids, DatasetId::ALL.to_vec());
    }
}
