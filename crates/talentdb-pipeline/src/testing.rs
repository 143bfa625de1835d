//! In-memory fakes for the pipeline seams.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use talentdb_core::DerivedProfile;
use talentdb_db::{DbError, NewPerson, PendingPersonRow, UnprocessedProfileRow};
use talentdb_torre::{CandidateRecord, TorreError};

use crate::pacing::Pacer;
use crate::source::ProfileSource;
use crate::store::CollectionStore;

pub(crate) fn candidate(external_id: i64, username: &str) -> CandidateRecord {
    CandidateRecord {
        external_id,
        source_graph_id: format!("gg-{external_id}"),
        name: format!("Person {external_id}"),
        username: username.to_string(),
        headline: "Engineer".to_string(),
        image_url: None,
        completion: 0.5,
        verified: false,
        rank: 1.0,
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

pub(crate) struct FakeSource {
    /// `Err(status)` makes the search fail with that HTTP status.
    pub search: Mutex<Result<Vec<CandidateRecord>, u16>>,
    /// Missing usernames answer 404; `Err(status)` answers that status.
    pub profiles: HashMap<String, Result<Value, u16>>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_search(records: Vec<CandidateRecord>) -> Self {
        Self {
            search: Mutex::new(Ok(records)),
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        Self {
            search: Mutex::new(Ok(Vec::new())),
            profiles: HashMap::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_search(status: u16) -> Self {
        Self {
            search: Mutex::new(Err(status)),
            ..Self::empty()
        }
    }

    pub fn with_profile(mut self, username: &str, result: Result<Value, u16>) -> Self {
        self.profiles.insert(username.to_string(), result);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileSource for FakeSource {
    async fn search_people(
        &self,
        _query: &str,
        limit: u32,
    ) -> Result<Vec<CandidateRecord>, TorreError> {
        match &*self.search.lock().unwrap() {
            Ok(records) => Ok(records.iter().take(limit as usize).cloned().collect()),
            Err(status) => Err(TorreError::Status {
                status: *status,
                url: "fake://search".to_string(),
            }),
        }
    }

    async fn get_profile(&self, username: &str) -> Result<Value, TorreError> {
        self.fetched.lock().unwrap().push(username.to_string());
        match self.profiles.get(username) {
            Some(Ok(doc)) => Ok(doc.clone()),
            Some(Err(status)) => Err(TorreError::Status {
                status: *status,
                url: format!("fake://genome/bios/{username}"),
            }),
            None => Err(TorreError::NotFound {
                username: username.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub(crate) struct StoredPerson {
    pub external_id: i64,
    pub username: String,
    pub display_name: String,
    pub search_query: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredProfile {
    pub id: i64,
    pub username: String,
    pub raw_payload: Value,
    pub derived: Option<DerivedProfile>,
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub people: Mutex<Vec<StoredPerson>>,
    pub profiles: Mutex<Vec<StoredProfile>>,
    /// Usernames whose profile insert fails with a storage error.
    pub failing_profile_inserts: Vec<String>,
    /// Usernames that appear taken by a concurrent writer at insert time.
    pub racing_profile_inserts: Vec<String>,
}

impl MemoryStore {
    pub fn add_person(&self, external_id: i64, username: &str) {
        self.people.lock().unwrap().push(StoredPerson {
            external_id,
            username: username.to_string(),
            display_name: username.to_string(),
            search_query: None,
        });
    }

    pub fn add_profile(&self, username: &str, raw_payload: Value) -> i64 {
        let mut profiles = self.profiles.lock().unwrap();
        let id = i64::try_from(profiles.len()).unwrap() + 1;
        profiles.push(StoredProfile {
            id,
            username: username.to_string(),
            raw_payload,
            derived: None,
        });
        id
    }

    pub fn people(&self) -> Vec<StoredPerson> {
        self.people.lock().unwrap().clone()
    }

    pub fn profiles(&self) -> Vec<StoredProfile> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn insert_person(&self, person: &NewPerson<'_>) -> Result<bool, DbError> {
        let mut people = self.people.lock().unwrap();
        if people.iter().any(|p| p.external_id == person.external_id) {
            return Ok(false);
        }
        if people.iter().any(|p| p.username == person.username) {
            return Err(DbError::Conflict {
                constraint: "people_username_key".to_string(),
            });
        }
        people.push(StoredPerson {
            external_id: person.external_id,
            username: person.username.to_string(),
            display_name: person.display_name.to_string(),
            search_query: person.search_query.map(str::to_string),
        });
        Ok(true)
    }

    async fn profile_exists(&self, username: &str) -> Result<bool, DbError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.username == username))
    }

    async fn insert_profile(&self, username: &str, raw_payload: &Value) -> Result<bool, DbError> {
        if self.failing_profile_inserts.iter().any(|u| u == username) {
            return Err(DbError::NotFound);
        }
        if self.racing_profile_inserts.iter().any(|u| u == username) {
            return Ok(false);
        }
        if self.profile_exists(username).await? {
            return Ok(false);
        }
        self.add_profile(username, raw_payload.clone());
        Ok(true)
    }

    async fn list_pending_people(&self) -> Result<Vec<PendingPersonRow>, DbError> {
        let profiles = self.profiles();
        Ok(self
            .people()
            .into_iter()
            .filter(|p| !profiles.iter().any(|pr| pr.username == p.username))
            .map(|p| PendingPersonRow {
                username: p.username,
                display_name: p.display_name,
            })
            .collect())
    }

    async fn count_people(&self) -> Result<i64, DbError> {
        Ok(i64::try_from(self.people.lock().unwrap().len()).unwrap())
    }

    async fn count_profiles(&self) -> Result<i64, DbError> {
        Ok(i64::try_from(self.profiles.lock().unwrap().len()).unwrap())
    }

    async fn list_unprocessed_profiles(&self) -> Result<Vec<UnprocessedProfileRow>, DbError> {
        Ok(self
            .profiles()
            .into_iter()
            .filter(|p| p.derived.is_none())
            .map(|p| UnprocessedProfileRow {
                id: p.id,
                username: p.username,
                raw_payload: p.raw_payload,
            })
            .collect())
    }

    async fn mark_profile_processed(
        &self,
        id: i64,
        derived: &DerivedProfile,
    ) -> Result<bool, DbError> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| p.id == id) {
            Some(p) if p.derived.is_none() => {
                p.derived = Some(derived.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Pacer
// ---------------------------------------------------------------------------

#[derive(Default)]
pub(crate) struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}
