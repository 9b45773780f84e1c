use fitness_levels::assessment::{
    AssessmentRepository, RepositoryError, TestId, TestResultRecord, UserLevelRecord,
    UserLevelsId,
};
use fitness_levels::config::StorageConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the two key-value tables.
#[derive(Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    tables: StorageConfig,
    test_results: Arc<Mutex<HashMap<TestId, TestResultRecord>>>,
    user_levels: Arc<Mutex<HashMap<UserLevelsId, UserLevelRecord>>>,
}

impl InMemoryAssessmentRepository {
    pub(crate) fn new(tables: StorageConfig) -> Self {
        Self {
            tables,
            test_results: Arc::default(),
            user_levels: Arc::default(),
        }
    }
}

impl Default for InMemoryAssessmentRepository {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn put_test_result(&self, record: TestResultRecord) -> Result<(), RepositoryError> {
        let mut guard = self
            .test_results
            .lock()
            .map_err(|_| RepositoryError::Unavailable("test results lock poisoned".to_string()))?;
        if guard.contains_key(&record.test_id) {
            return Err(RepositoryError::Conflict);
        }
        info!(table = %self.tables.test_results_table, test_id = %record.test_id, "wrote item");
        debug!(?record, "test result item");
        guard.insert(record.test_id.clone(), record);
        Ok(())
    }

    fn put_user_level(&self, record: UserLevelRecord) -> Result<(), RepositoryError> {
        let mut guard = self
            .user_levels
            .lock()
            .map_err(|_| RepositoryError::Unavailable("user levels lock poisoned".to_string()))?;
        if guard.contains_key(&record.user_levels_id) {
            return Err(RepositoryError::Conflict);
        }
        info!(
            table = %self.tables.user_levels_table,
            user_levels_id = %record.user_levels_id,
            "wrote item"
        );
        debug!(?record, "user level item");
        guard.insert(record.user_levels_id.clone(), record);
        Ok(())
    }

    fn fetch_test_result(&self, id: &TestId) -> Result<Option<TestResultRecord>, RepositoryError> {
        let guard = self
            .test_results
            .lock()
            .map_err(|_| RepositoryError::Unavailable("test results lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn fetch_user_level(
        &self,
        id: &UserLevelsId,
    ) -> Result<Option<UserLevelRecord>, RepositoryError> {
        let guard = self
            .user_levels
            .lock()
            .map_err(|_| RepositoryError::Unavailable("user levels lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn user_levels_for(&self, user_id: &str) -> Result<Vec<UserLevelRecord>, RepositoryError> {
        let guard = self
            .user_levels
            .lock()
            .map_err(|_| RepositoryError::Unavailable("user levels lock poisoned".to_string()))?;
        Ok(guard
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}
