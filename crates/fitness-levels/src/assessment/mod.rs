//! Fitness self-assessment intake: validation, level classification, and storage.
//!
//! The classifier in [`levels`] is pure and stateless. Persistence goes through the
//! [`AssessmentRepository`] handed to [`AssessmentService`] at construction time.

pub mod domain;
pub mod levels;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, CategoryLevels, ClassificationResult, ExerciseResults, InvalidPushupVariant, Level,
    PushupVariant, Submission, TestId, TestResults, UserLevelsId,
};
pub use levels::compute_levels;
pub use repository::{AssessmentRepository, RepositoryError, TestResultRecord, UserLevelRecord};
pub use router::assessment_router;
pub use service::{AssessmentReceipt, AssessmentService, AssessmentServiceError};
pub use validation::{validate, ValidationError};
