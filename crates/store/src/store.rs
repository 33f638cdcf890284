//! File-backed assessment store.

use crate::model::{AssessmentPage, HealthGuide, StoredAssessment, HEALTH_GUIDE_TEMPLATE};
use crate::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use metarisk_core::{render_health_guide, AssessmentResult, HEALTH_GUIDE_TITLE};
use metarisk_types::CustomerId;
use metarisk_uuid::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ASSESSMENTS_DIR_NAME: &str = "assessments";
const ASSESSMENT_FILE_NAME: &str = "assessment.json";
const GUIDES_DIR_NAME: &str = "guides";

/// Page size used when the caller does not give one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct FileAssessmentStore {
    assessments_dir: PathBuf,
}

impl FileAssessmentStore {
    /// Opens the store rooted at `data_dir`, creating the `assessments/` directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidDataDir`] if `data_dir` does not exist or is not a
    /// directory, and [`StoreError::Io`] if the assessments directory cannot be created.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        if !data_dir.is_dir() {
            return Err(StoreError::InvalidDataDir(format!(
                "not a directory: {}",
                data_dir.display()
            )));
        }

        let assessments_dir = data_dir.join(ASSESSMENTS_DIR_NAME);
        fs::create_dir_all(&assessments_dir)?;
        Ok(Self { assessments_dir })
    }

    pub fn assessments_dir(&self) -> &Path {
        &self.assessments_dir
    }

    /// Persists `result` under a freshly allocated id, stamped with the current time.
    pub fn save(
        &self,
        result: AssessmentResult,
        customer_id: Option<CustomerId>,
    ) -> StoreResult<StoredAssessment> {
        let stored = StoredAssessment {
            assessment_id: RecordId::new(),
            customer_id,
            assessed_at: Utc::now(),
            output_data: result,
        };
        self.insert(&stored)?;
        Ok(stored)
    }

    /// Writes an already-identified record. An existing record with the same id is replaced.
    pub fn insert(&self, stored: &StoredAssessment) -> StoreResult<()> {
        let dir = stored.assessment_id.sharded_dir(&self.assessments_dir);
        fs::create_dir_all(&dir)?;
        write_json(&dir.join(ASSESSMENT_FILE_NAME), stored)?;

        tracing::debug!(
            assessment_id = %stored.assessment_id,
            "stored assessment"
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no assessment with `id` exists.
    pub fn load(&self, id: &RecordId) -> StoreResult<StoredAssessment> {
        let path = id
            .sharded_dir(&self.assessments_dir)
            .join(ASSESSMENT_FILE_NAME);
        if !path.is_file() {
            return Err(StoreError::NotFound(*id));
        }
        read_json(&path)
    }

    /// A customer's assessments, newest first, after skipping `skip` and taking `limit`.
    ///
    /// Files that cannot be read or parsed are skipped with a warning rather than failing the
    /// whole listing.
    pub fn list_for_customer(
        &self,
        customer_id: &CustomerId,
        limit: usize,
        skip: usize,
    ) -> StoreResult<AssessmentPage> {
        let mut matching: Vec<StoredAssessment> = self
            .scan()?
            .into_iter()
            .filter(|a| a.customer_id.as_ref() == Some(customer_id))
            .collect();

        matching.sort_by(|a, b| {
            b.assessed_at
                .cmp(&a.assessed_at)
                .then_with(|| a.assessment_id.cmp(&b.assessment_id))
        });

        let total = matching.len();
        let items = matching.into_iter().skip(skip).take(limit).collect();

        Ok(AssessmentPage {
            items,
            total,
            limit,
            skip,
        })
    }

    /// Renders the health guide for an assessment and saves it next to the record.
    pub fn create_guide(&self, id: &RecordId) -> StoreResult<HealthGuide> {
        let stored = self.load(id)?;
        self.create_guide_at(&stored, Utc::now())
    }

    fn create_guide_at(
        &self,
        stored: &StoredAssessment,
        created_at: DateTime<Utc>,
    ) -> StoreResult<HealthGuide> {
        let content = render_health_guide(
            &stored.output_data,
            &stored.assessment_id.to_string(),
            stored.assessed_at,
        );

        let guide = HealthGuide {
            guide_id: RecordId::new(),
            assessment_id: stored.assessment_id,
            customer_id: stored.customer_id.clone(),
            title: HEALTH_GUIDE_TITLE.to_string(),
            content,
            created_at,
            template_name: HEALTH_GUIDE_TEMPLATE.to_string(),
        };

        let guides_dir = stored
            .assessment_id
            .sharded_dir(&self.assessments_dir)
            .join(GUIDES_DIR_NAME);
        fs::create_dir_all(&guides_dir)?;
        write_json(&guides_dir.join(format!("{}.json", guide.guide_id)), &guide)?;

        Ok(guide)
    }

    /// Guides generated for an assessment, oldest first.
    ///
    /// Guide files that cannot be read or parsed are skipped with a warning, as in
    /// [`Self::list_for_customer`].
    pub fn list_guides(&self, id: &RecordId) -> StoreResult<Vec<HealthGuide>> {
        let dir = id.sharded_dir(&self.assessments_dir);
        if !dir.join(ASSESSMENT_FILE_NAME).is_file() {
            return Err(StoreError::NotFound(*id));
        }

        let guides_dir = dir.join(GUIDES_DIR_NAME);
        if !guides_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut guides = Vec::new();
        for entry in fs::read_dir(&guides_dir)?.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match read_json::<HealthGuide>(&path) {
                Ok(guide) => guides.push(guide),
                Err(err) => {
                    tracing::warn!("skipping unreadable guide {}: {err}", path.display());
                }
            }
        }
        guides.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(guides)
    }

    /// Walks `assessments/<s1>/<s2>/<id>/assessment.json`.
    fn scan(&self) -> StoreResult<Vec<StoredAssessment>> {
        let mut found = Vec::new();

        for s1 in fs::read_dir(&self.assessments_dir)?.flatten() {
            let s1_path = s1.path();
            if !s1_path.is_dir() {
                continue;
            }
            let Ok(s2_iter) = fs::read_dir(&s1_path) else {
                continue;
            };

            for s2 in s2_iter.flatten() {
                let s2_path = s2.path();
                if !s2_path.is_dir() {
                    continue;
                }
                let Ok(id_iter) = fs::read_dir(&s2_path) else {
                    continue;
                };

                for id_ent in id_iter.flatten() {
                    let path = id_ent.path().join(ASSESSMENT_FILE_NAME);
                    if !path.is_file() {
                        continue;
                    }
                    match read_json::<StoredAssessment>(&path) {
                        Ok(stored) => found.push(stored),
                        Err(err) => {
                            tracing::warn!(
                                "skipping unreadable assessment {}: {err}",
                                path.display()
                            );
                        }
                    }
                }
            }
        }

        Ok(found)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(StoreError::Serialization)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a JSON file, reporting the path of the first field that does not match `T`.
fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let contents = fs::read_to_string(path)?;
    let mut deserializer = serde_json::Deserializer::from_str(&contents);

    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let field = err.path().to_string();
        let field = if field.is_empty() {
            "<root>".to_string()
        } else {
            field
        };
        StoreError::Deserialization {
            file: path.display().to_string(),
            field,
            message: err.into_inner().to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use metarisk_core::{assess, RawPatientInput, Sex};
    use tempfile::TempDir;

    fn result(age: i64) -> AssessmentResult {
        assess(&RawPatientInput::new(age, Sex::Female)).unwrap()
    }

    fn open_store() -> (TempDir, FileAssessmentStore) {
        let temp = TempDir::new().unwrap();
        let store = FileAssessmentStore::open(temp.path()).unwrap();
        (temp, store)
    }

    fn customer(id: &str) -> CustomerId {
        CustomerId::new(id).unwrap()
    }

    fn stored_at(customer_id: &CustomerId, minutes: i64) -> StoredAssessment {
        StoredAssessment {
            assessment_id: RecordId::new(),
            customer_id: Some(customer_id.clone()),
            assessed_at: Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
                + Duration::minutes(minutes),
            output_data: result(40),
        }
    }

    #[test]
    fn open_rejects_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            FileAssessmentStore::open(&missing),
            Err(StoreError::InvalidDataDir(_))
        ));
    }

    #[test]
    fn save_then_load_returns_same_record() {
        let (_temp, store) = open_store();
        let stored = store.save(result(63), Some(customer("c-1"))).unwrap();

        let path = stored
            .assessment_id
            .sharded_dir(store.assessments_dir())
            .join(ASSESSMENT_FILE_NAME);
        assert!(path.is_file());

        let loaded = store.load(&stored.assessment_id).unwrap();
        assert_eq!(loaded, stored);
    }

    #[test]
    fn load_unknown_id_is_not_found() {
        let (_temp, store) = open_store();
        let id = RecordId::new();
        assert!(matches!(store.load(&id), Err(StoreError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn listing_is_newest_first_and_paged() {
        let (_temp, store) = open_store();
        let alice = customer("alice");
        let bob = customer("bob");

        let records: Vec<StoredAssessment> =
            (0..5).map(|minute| stored_at(&alice, minute)).collect();
        for record in &records {
            store.insert(record).unwrap();
        }
        store.insert(&stored_at(&bob, 10)).unwrap();
        store.save(result(30), None).unwrap();

        let page = store.list_for_customer(&alice, 2, 1).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.limit, 2);
        assert_eq!(page.skip, 1);
        let ids: Vec<RecordId> = page.items.iter().map(|a| a.assessment_id).collect();
        assert_eq!(ids, vec![records[3].assessment_id, records[2].assessment_id]);

        let beyond = store.list_for_customer(&alice, 10, 10).unwrap();
        assert_eq!(beyond.total, 5);
        assert!(beyond.items.is_empty());

        let nobody = store.list_for_customer(&customer("carol"), 10, 0).unwrap();
        assert_eq!(nobody.total, 0);
    }

    #[test]
    fn corrupt_file_is_skipped_in_listing_but_reported_on_load() {
        let (_temp, store) = open_store();
        let alice = customer("alice");
        let good = stored_at(&alice, 0);
        store.insert(&good).unwrap();

        let bad = stored_at(&alice, 1);
        store.insert(&bad).unwrap();
        let bad_path = bad
            .assessment_id
            .sharded_dir(store.assessments_dir())
            .join(ASSESSMENT_FILE_NAME);
        fs::write(&bad_path, r#"{"assessmentId": "not-canonical"}"#).unwrap();

        let page = store.list_for_customer(&alice, 10, 0).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].assessment_id, good.assessment_id);

        match store.load(&bad.assessment_id) {
            Err(StoreError::Deserialization { field, .. }) => assert_eq!(field, "assessmentId"),
            other => panic!("expected deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn guide_is_rendered_and_saved_next_to_assessment() {
        let (_temp, store) = open_store();
        let stored = store.save(result(58), Some(customer("c-9"))).unwrap();

        let guide = store.create_guide(&stored.assessment_id).unwrap();
        assert_eq!(guide.assessment_id, stored.assessment_id);
        assert_eq!(guide.customer_id, stored.customer_id);
        assert_eq!(guide.title, HEALTH_GUIDE_TITLE);
        assert_eq!(guide.template_name, HEALTH_GUIDE_TEMPLATE);
        assert!(guide
            .content
            .contains(&stored.assessment_id.to_string()));

        let guides = store.list_guides(&stored.assessment_id).unwrap();
        assert_eq!(guides, vec![guide]);
    }

    #[test]
    fn guide_for_unknown_assessment_is_not_found() {
        let (_temp, store) = open_store();
        assert!(matches!(
            store.create_guide(&RecordId::new()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn corrupt_guide_is_skipped_in_listing() {
        let (_temp, store) = open_store();
        let stored = store.save(result(47), None).unwrap();
        let guide = store.create_guide(&stored.assessment_id).unwrap();

        let guides_dir = stored
            .assessment_id
            .sharded_dir(store.assessments_dir())
            .join(GUIDES_DIR_NAME);
        fs::write(guides_dir.join(format!("{}.json", RecordId::new())), "{ truncated").unwrap();

        let guides = store.list_guides(&stored.assessment_id).unwrap();
        assert_eq!(guides, vec![guide]);
    }
}
