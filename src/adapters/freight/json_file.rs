//! JSON File Freight Repository
//!
//! Stores every record as one element of a JSON array on disk, in the same
//! camelCase document shape the hosted store uses. Writes go to a temp file
//! and are renamed into place.
//!
//! Each array element is decoded on its own. Documents that fail to decode
//! are kept on disk untouched. Listings skip them with a warning;
//! `find_by_id` reports them as a database error.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::in_memory::{conflict, not_found, sort_newest_first};
use crate::domain::foundation::{DomainError, ErrorCode, FreightId};
use crate::domain::freight::{FreightDocument, FreightRecord, FreightStatus};
use crate::ports::FreightRepository;

/// File-backed record store.
#[derive(Debug)]
pub struct JsonFileFreightRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileFreightRepository {
    /// # Example
    /// ```ignore
    /// let repo = JsonFileFreightRepository::new("./data/freights.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "freights.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_documents(&self) -> Result<Vec<Value>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(database_error("read", &self.path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| database_error("parse", &self.path, e))
    }

    async fn write_documents(&self, documents: &[Value]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| database_error("create directory for", &self.path, e))?;
        }

        let json = serde_json::to_vec_pretty(documents)
            .map_err(|e| database_error("serialize", &self.path, e))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| database_error("create", &temp_path, e))?;
        file.write_all(&json)
            .await
            .map_err(|e| database_error("write", &temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| database_error("sync", &temp_path, e))?;

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| database_error("replace", &self.path, e))
    }

    async fn decode_matching<F>(&self, keep: F) -> Result<Vec<FreightRecord>, DomainError>
    where
        F: Fn(&FreightDocument) -> bool + Send,
    {
        let mut records = Vec::new();
        for (index, value) in self.read_documents().await?.into_iter().enumerate() {
            let document = match serde_json::from_value::<FreightDocument>(value) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!(
                        index,
                        error = %e,
                        "Skipping malformed freight document"
                    );
                    continue;
                }
            };
            if !keep(&document) {
                continue;
            }
            match FreightRecord::try_from(document) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    freight_id = %e.freight_id(),
                    error = %e,
                    "Skipping freight document that failed to decode"
                ),
            }
        }
        sort_newest_first(&mut records);
        Ok(records)
    }
}

/// Id of a raw document, if it has a readable one.
fn document_id(value: &Value) -> Option<FreightId> {
    value.get("id")?.as_str()?.parse().ok()
}

fn document_version(value: &Value) -> u64 {
    value.get("version").and_then(Value::as_u64).unwrap_or(0)
}

fn encode(record: &FreightRecord) -> Result<Value, DomainError> {
    serde_json::to_value(FreightDocument::from(record)).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to encode freight: {}", e))
            .with_detail("freight_id", record.id().to_string())
    })
}

fn database_error(action: &str, path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {} {}: {}", action, path.display(), err),
    )
}

#[async_trait]
impl FreightRepository for JsonFileFreightRepository {
    async fn create(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.read_documents().await?;
        if let Some(existing) = documents.iter().find(|d| document_id(d) == Some(*record.id())) {
            return Err(conflict(record.id(), record.version(), document_version(existing)));
        }

        let stored = record.clone().with_version(0);
        documents.push(encode(&stored)?);
        self.write_documents(&documents).await?;
        Ok(stored)
    }

    async fn update(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.read_documents().await?;
        let slot = documents
            .iter_mut()
            .find(|d| document_id(d) == Some(*record.id()))
            .ok_or_else(|| not_found(record.id()))?;
        let stored_version = document_version(slot);
        if stored_version != record.version() {
            return Err(conflict(record.id(), record.version(), stored_version));
        }

        let stored = record.clone().with_version(stored_version + 1);
        *slot = encode(&stored)?;
        self.write_documents(&documents).await?;
        Ok(stored)
    }

    async fn find_by_id(&self, id: &FreightId) -> Result<Option<FreightRecord>, DomainError> {
        let value = self
            .read_documents()
            .await?
            .into_iter()
            .find(|d| document_id(d) == Some(*id));
        let Some(value) = value else {
            return Ok(None);
        };

        let unreadable = |message: String| {
            DomainError::new(ErrorCode::DatabaseError, message).with_detail("freight_id", id.to_string())
        };
        let document: FreightDocument =
            serde_json::from_value(value).map_err(|e| unreadable(e.to_string()))?;
        FreightRecord::try_from(document)
            .map(Some)
            .map_err(|e| unreadable(e.to_string()))
    }

    async fn find_by_status(&self, status: FreightStatus) -> Result<Vec<FreightRecord>, DomainError> {
        self.decode_matching(move |d| d.status == status.as_str()).await
    }

    async fn list(&self) -> Result<Vec<FreightRecord>, DomainError> {
        self.decode_matching(|_| true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::freight::fixtures::{at, contracted, negotiating};
    use crate::domain::freight::LoadingMode;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> JsonFileFreightRepository {
        JsonFileFreightRepository::new(dir.path().join("data").join("freights.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.find_by_id(&FreightId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let record = negotiating();
        repo_in(&dir).create(&record).await.unwrap();

        let reopened = repo_in(&dir);
        let found = reopened.find_by_id(record.id()).await.unwrap().unwrap();
        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn file_uses_camel_case_documents() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        repo.create(&negotiating()).await.unwrap();

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"mapNumber\""));
        assert!(raw.contains("\"carrierProposals\""));
        assert!(!dir.path().join("data").join("freights.json.tmp").exists());
    }

    #[tokio::test]
    async fn update_checks_version() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        let original = repo.create(&negotiating()).await.unwrap();

        let mut first = original.clone();
        first.record_proposal("A", 900.0).unwrap();
        let stored = repo.update(&first).await.unwrap();
        assert_eq!(stored.version(), 1);

        let mut stale = original;
        stale.record_proposal("B", 100.0).unwrap();
        let err = repo.update(&stale).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
    }

    #[tokio::test]
    async fn status_filter_and_skip_of_bad_documents() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        repo.create(&negotiating()).await.unwrap();
        let done = contracted("A", 900.0, 850.0, 1000.0, "Bauru/SP", LoadingMode::Bag, at(2024, 1, 1));
        repo.create(&done).await.unwrap();

        let mut documents: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
        let mut broken = documents[1].clone();
        broken["id"] = serde_json::json!(FreightId::new());
        broken["status"] = serde_json::json!("contracted");
        broken.as_object_mut().unwrap().remove("finalValue");
        documents.push(broken);
        std::fs::write(repo.path(), serde_json::to_string(&documents).unwrap()).unwrap();

        let contracted = repo.find_by_status(FreightStatus::Contracted).await.unwrap();
        assert_eq!(contracted.len(), 1);
        assert_eq!(contracted[0].id(), done.id());
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn malformed_documents_do_not_hide_valid_ones() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        let done = contracted("A", 900.0, 850.0, 1000.0, "Bauru/SP", LoadingMode::Bag, at(2024, 1, 1));
        repo.create(&done).await.unwrap();

        let mut documents: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
        let mut short_id = documents[0].clone();
        short_id["id"] = serde_json::json!("6650f2a1c3b9");
        let mut bad_type = documents[0].clone();
        bad_type["id"] = serde_json::json!(FreightId::new());
        bad_type["mapValue"] = serde_json::json!("mil");
        let mut null_km = documents[0].clone();
        let null_km_id = FreightId::new();
        null_km["id"] = serde_json::json!(null_km_id);
        null_km["totalKm"] = serde_json::Value::Null;
        documents.extend([short_id, bad_type, null_km]);
        std::fs::write(repo.path(), serde_json::to_string(&documents).unwrap()).unwrap();

        let contracted = repo.find_by_status(FreightStatus::Contracted).await.unwrap();
        let ids: Vec<_> = contracted.iter().map(|r| *r.id()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(done.id()));
        assert!(ids.contains(&null_km_id));
        assert_eq!(repo.list().await.unwrap().len(), 2);

        let null_km_record = repo.find_by_id(&null_km_id).await.unwrap().unwrap();
        assert_eq!(null_km_record.total_km(), 0.0);
    }

    #[tokio::test]
    async fn writes_keep_undecodable_documents_on_disk() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        let stored = repo.create(&negotiating()).await.unwrap();

        let mut documents: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
        let broken_id = FreightId::new();
        let mut broken = documents[0].clone();
        broken["id"] = serde_json::json!(broken_id);
        broken["weight"] = serde_json::json!("heavy");
        documents.push(broken);
        std::fs::write(repo.path(), serde_json::to_string(&documents).unwrap()).unwrap();

        let mut edited = stored;
        edited.record_proposal("A", 900.0).unwrap();
        repo.update(&edited).await.unwrap();

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"heavy\""));
        let err = repo.find_by_id(&broken_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_database_error() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        std::fs::write(repo.path(), "{ not json").unwrap();

        let err = repo.list().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
