use crate::{DocumentStore, StoreResult};
use folio_editor::{normalize_collection, MigrationReport, PostCollection};

/// A collection ready for consumers, with what loading did to it
#[derive(Debug)]
pub struct Loaded {
    pub collection: PostCollection,
    pub report: MigrationReport,
    /// Whether the migrated collection was written back
    pub persisted: bool,
}

/// Load the collection, normalize every post, and save only if a post changed
pub fn load_normalized<S: DocumentStore + ?Sized>(store: &S) -> StoreResult<Loaded> {
    let mut collection = store.load_document()?;
    let report = normalize_collection(&mut collection);

    let persisted = report.has_changes();
    if persisted {
        store.save_document(&collection)?;
        tracing::info!(
            migrated = report.changed.len(),
            "persisted posts rewritten from legacy encodings"
        );
    }

    if !report.failures.is_empty() {
        tracing::warn!(
            failed = report.failures.len(),
            "some posts kept undecodable legacy data"
        );
    }

    Ok(Loaded {
        collection,
        report,
        persisted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn collection(json: &str) -> PostCollection {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_canonical_collection_is_not_rewritten() {
        let store = MemoryStore::new(collection(
            r#"{"posts":[{"id":"a","content":"x","blocks":[{"id":"1","type":"paragraph","content":"x"}]}]}"#,
        ));

        let loaded = load_normalized(&store).unwrap();

        assert!(!loaded.persisted);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_legacy_collection_is_rewritten_once() {
        let store = MemoryStore::new(collection(
            r#"{"posts":[{"id":"a","content":"[{\"id\":1,\"type\":\"paragraph\",\"content\":\"x\"}]"}]}"#,
        ));

        let first = load_normalized(&store).unwrap();
        assert!(first.persisted);
        assert_eq!(first.report.changed, vec!["a".to_string()]);

        let second = load_normalized(&store).unwrap();
        assert!(!second.persisted);
        assert_eq!(store.save_count(), 1);
        assert_eq!(second.collection, first.collection);
    }
}
