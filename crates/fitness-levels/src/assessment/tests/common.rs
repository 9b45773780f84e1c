use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::assessment::domain::{TestId, TestResults, UserLevelsId};
use crate::assessment::repository::{
    AssessmentRepository, RepositoryError, TestResultRecord, UserLevelRecord,
};
use crate::assessment::{assessment_router, AssessmentService};

pub(super) fn results(
    squats: u32,
    pushups_type: &str,
    push_ups: u32,
    snow_angels: u32,
    plank_seconds: u32,
    climbers: u32,
) -> TestResults {
    TestResults {
        max_squats: squats,
        pushups_type: pushups_type.to_string(),
        max_push_ups: push_ups,
        max_reverse_snow_angels_45s: snow_angels,
        plank_max_time_seconds: plank_seconds,
        mountain_climbers_45s: climbers,
    }
}

pub(super) fn body() -> Value {
    json!({
        "user_id": "user-123",
        "pushups_type": "classic",
        "results": {
            "max_push_ups": 12,
            "max_squats": 35,
            "max_reverse_snow_angels_45s": 15,
            "plank_max_time_seconds": 60,
            "mountain_climbers_45s": 45
        }
    })
}

pub(super) fn body_with_result(field: &str, value: Value) -> Value {
    let mut body = body();
    body["results"][field] = value;
    body
}

pub(super) fn body_without(field: &str) -> Value {
    let mut body = body();
    body.as_object_mut()
        .expect("fixture is an object")
        .remove(field);
    body
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    tests: Arc<Mutex<HashMap<TestId, TestResultRecord>>>,
    levels: Arc<Mutex<HashMap<UserLevelsId, UserLevelRecord>>>,
}

impl MemoryRepository {
    pub(super) fn test_count(&self) -> usize {
        self.tests.lock().expect("tests mutex poisoned").len()
    }

    pub(super) fn level_count(&self) -> usize {
        self.levels.lock().expect("levels mutex poisoned").len()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn put_test_result(&self, record: TestResultRecord) -> Result<(), RepositoryError> {
        let mut guard = self.tests.lock().expect("tests mutex poisoned");
        if guard.contains_key(&record.test_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.test_id.clone(), record);
        Ok(())
    }

    fn put_user_level(&self, record: UserLevelRecord) -> Result<(), RepositoryError> {
        let mut guard = self.levels.lock().expect("levels mutex poisoned");
        if guard.contains_key(&record.user_levels_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.user_levels_id.clone(), record);
        Ok(())
    }

    fn fetch_test_result(&self, id: &TestId) -> Result<Option<TestResultRecord>, RepositoryError> {
        Ok(self.tests.lock().expect("tests mutex poisoned").get(id).cloned())
    }

    fn fetch_user_level(
        &self,
        id: &UserLevelsId,
    ) -> Result<Option<UserLevelRecord>, RepositoryError> {
        Ok(self.levels.lock().expect("levels mutex poisoned").get(id).cloned())
    }

    fn user_levels_for(&self, user_id: &str) -> Result<Vec<UserLevelRecord>, RepositoryError> {
        let guard = self.levels.lock().expect("levels mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Accepts test results but fails on the level table, mimicking a partial outage.
pub(super) struct LevelsUnavailableRepository;

impl AssessmentRepository for LevelsUnavailableRepository {
    fn put_test_result(&self, _record: TestResultRecord) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn put_user_level(&self, _record: UserLevelRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("user_levels offline".to_string()))
    }

    fn fetch_test_result(&self, _id: &TestId) -> Result<Option<TestResultRecord>, RepositoryError> {
        Ok(None)
    }

    fn fetch_user_level(
        &self,
        _id: &UserLevelsId,
    ) -> Result<Option<UserLevelRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("user_levels offline".to_string()))
    }

    fn user_levels_for(&self, _user_id: &str) -> Result<Vec<UserLevelRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("user_levels offline".to_string()))
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    (AssessmentService::new(repository.clone()), repository)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
