//! End-to-end scenarios through the public validation, classification, and service facade.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fitness_levels::assessment::{
    compute_levels, validate, AssessmentRepository, AssessmentService, AssessmentServiceError,
    Category, Level, RepositoryError, TestId, TestResultRecord, UserLevelRecord, UserLevelsId,
};
use serde_json::{json, Value};

#[derive(Default)]
struct TableStore {
    tests: Mutex<HashMap<TestId, TestResultRecord>>,
    levels: Mutex<HashMap<UserLevelsId, UserLevelRecord>>,
}

impl AssessmentRepository for TableStore {
    fn put_test_result(&self, record: TestResultRecord) -> Result<(), RepositoryError> {
        self.tests
            .lock()
            .expect("tests mutex poisoned")
            .insert(record.test_id.clone(), record);
        Ok(())
    }

    fn put_user_level(&self, record: UserLevelRecord) -> Result<(), RepositoryError> {
        self.levels
            .lock()
            .expect("levels mutex poisoned")
            .insert(record.user_levels_id.clone(), record);
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
        Ok(self
            .levels
            .lock()
            .expect("levels mutex poisoned")
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}

fn request(pushups_type: &str, results: [i64; 5]) -> Value {
    let [push_ups, squats, snow_angels, plank, climbers] = results;
    json!({
        "user_id": "athlete-7",
        "pushups_type": pushups_type,
        "results": {
            "max_push_ups": push_ups,
            "max_squats": squats,
            "max_reverse_snow_angels_45s": snow_angels,
            "plank_max_time_seconds": plank,
            "mountain_climbers_45s": climbers
        }
    })
}

#[test]
fn outlier_pair_caps_global_level() {
    let submission = validate(&request("classic", [20, 5, 50, 100, 80])).expect("valid request");
    let levels = compute_levels(&submission.test_results()).expect("classifies");

    assert_eq!(levels.level_for(Category::Lower), Some(Level::Beginner));
    assert_eq!(levels.global_level, Level::Intermediate);
    assert!((levels.global_level_raw_avg_points - 2.6).abs() < f64::EPSILON);
}

#[test]
fn beginner_wall_push_ups_stay_beginner() {
    let submission = validate(&request("wall", [40, 10, 5, 20, 10])).expect("valid request");
    let levels = compute_levels(&submission.test_results()).expect("classifies");

    assert_eq!(levels.level_for(Category::Push), Some(Level::Beginner));
    assert_eq!(levels.global_level, Level::Beginner);
}

#[test]
fn service_round_trip_persists_both_tables() {
    let store = Arc::new(TableStore::default());
    let service = AssessmentService::new(store.clone());

    let receipt = service
        .submit(&request("knee", [15, 45, 12, 80, 20]))
        .expect("submission succeeds");

    let test_record = service.test_result(&receipt.test_id).expect("test stored");
    assert_eq!(test_record.results.pushups_type, "knee");
    assert_eq!(test_record.results.max_squats, 45);

    let level_record = service
        .user_levels(&receipt.user_levels_id)
        .expect("levels stored");
    assert_eq!(level_record.user_id, "athlete-7");
    assert_eq!(level_record.per_category, receipt.levels.per_category);
    assert_eq!(level_record.global_level, Level::Intermediate);

    let serialized = serde_json::to_value(&level_record).expect("serializes");
    let restored: UserLevelRecord = serde_json::from_value(serialized).expect("deserializes");
    assert_eq!(restored, level_record);
}

#[test]
fn service_reports_first_validation_error() {
    let service = AssessmentService::new(Arc::new(TableStore::default()));

    let err = service
        .submit(&request("sideways", [-5, 10, 10, 10, 10]))
        .expect_err("invalid request rejected");

    match err {
        AssessmentServiceError::Validation(inner) => {
            assert!(inner.to_string().contains("pushups_type must be one of"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
