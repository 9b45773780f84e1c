use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CategoryLevels, Level, TestId, TestResults, UserLevelsId};

/// Raw submission as stored, flattened next to its identifier and owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultRecord {
    pub test_id: TestId,
    pub user_id: String,
    #[serde(flatten)]
    pub results: TestResults,
    pub created_at: DateTime<Utc>,
}

/// Derived levels as stored, linked back to the test they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLevelRecord {
    pub user_levels_id: UserLevelsId,
    pub user_id: String,
    pub test_id: TestId,
    pub per_category: CategoryLevels,
    pub global_level: Level,
    pub global_level_raw_avg_points: f64,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction so the service can be exercised without a real backend.
pub trait AssessmentRepository: Send + Sync {
    fn put_test_result(&self, record: TestResultRecord) -> Result<(), RepositoryError>;
    fn put_user_level(&self, record: UserLevelRecord) -> Result<(), RepositoryError>;
    fn fetch_test_result(&self, id: &TestId) -> Result<Option<TestResultRecord>, RepositoryError>;
    fn fetch_user_level(
        &self,
        id: &UserLevelsId,
    ) -> Result<Option<UserLevelRecord>, RepositoryError>;
    fn user_levels_for(&self, user_id: &str) -> Result<Vec<UserLevelRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
