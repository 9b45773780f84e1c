use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use super::domain::{ClassificationResult, InvalidPushupVariant, TestId, UserLevelsId};
use super::levels::compute_levels;
use super::repository::{AssessmentRepository, RepositoryError, TestResultRecord, UserLevelRecord};
use super::validation::{validate, ValidationError};

/// Response handed back after a submission has been classified and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReceipt {
    pub user_levels_id: UserLevelsId,
    pub test_id: TestId,
    pub levels: ClassificationResult,
}

/// Service composing validation, classification, and persistence.
pub struct AssessmentService<R> {
    repository: Arc<R>,
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate, classify, and store a decoded submission body.
    ///
    /// The raw test record is written before the derived levels.
    pub fn submit(&self, body: &Value) -> Result<AssessmentReceipt, AssessmentServiceError> {
        let submission = validate(body)?;

        let test_id = TestId::generate();
        let user_levels_id = UserLevelsId::generate();
        let results = submission.test_results();
        let levels = compute_levels(&results)?;

        let test_record = TestResultRecord {
            test_id: test_id.clone(),
            user_id: submission.user_id.clone(),
            results,
            created_at: Utc::now(),
        };

        let level_record = UserLevelRecord {
            user_levels_id: user_levels_id.clone(),
            user_id: submission.user_id,
            test_id: test_id.clone(),
            per_category: levels.per_category.clone(),
            global_level: levels.global_level,
            global_level_raw_avg_points: levels.global_level_raw_avg_points,
            created_at: Utc::now(),
        };

        self.repository
            .put_test_result(test_record)
            .inspect_err(|err| error!(%test_id, %err, "failed to store test result"))?;
        info!(%test_id, "stored test result");

        self.repository
            .put_user_level(level_record)
            .inspect_err(|err| error!(%user_levels_id, %err, "failed to store user levels"))?;
        info!(%user_levels_id, global_level = %levels.global_level, "stored user levels");

        Ok(AssessmentReceipt {
            user_levels_id,
            test_id,
            levels,
        })
    }

    pub fn test_result(
        &self,
        test_id: &TestId,
    ) -> Result<TestResultRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch_test_result(test_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn user_levels(
        &self,
        user_levels_id: &UserLevelsId,
    ) -> Result<UserLevelRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch_user_level(user_levels_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// All level records for a user, newest first.
    pub fn levels_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserLevelRecord>, AssessmentServiceError> {
        let mut records = self.repository.user_levels_for(user_id)?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Classification(#[from] InvalidPushupVariant),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
