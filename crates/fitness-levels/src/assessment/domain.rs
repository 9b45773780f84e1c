use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordinal fitness classification shared by every category and the global level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const fn points(self) -> u8 {
        match self {
            Level::Beginner => 1,
            Level::Intermediate => 2,
            Level::Advanced => 3,
        }
    }

    /// Maps a point value back to a level, clamping anything outside 1..=3.
    pub const fn from_points(points: u8) -> Self {
        match points {
            0 | 1 => Level::Beginner,
            2 => Level::Intermediate,
            _ => Level::Advanced,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Level::Beginner => "BEGINNER",
            Level::Intermediate => "INTERMEDIATE",
            Level::Advanced => "ADVANCED",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five fixed exercise groupings that are classified independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Lower,
    Push,
    Pull,
    Core,
    Cond,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Lower,
        Category::Push,
        Category::Pull,
        Category::Core,
        Category::Cond,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Lower => "LOWER",
            Category::Push => "PUSH",
            Category::Pull => "PULL",
            Category::Core => "CORE",
            Category::Cond => "COND",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Push-up variant reported alongside the push-up count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushupVariant {
    Wall,
    Incline,
    Knee,
    Classic,
}

impl PushupVariant {
    pub const ALL: [PushupVariant; 4] = [
        PushupVariant::Wall,
        PushupVariant::Incline,
        PushupVariant::Knee,
        PushupVariant::Classic,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PushupVariant::Wall => "wall",
            PushupVariant::Incline => "incline",
            PushupVariant::Knee => "knee",
            PushupVariant::Classic => "classic",
        }
    }
}

impl fmt::Display for PushupVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a push-up variant outside the accepted four reaches the classifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid push-up variant '{0}', expected one of: wall, incline, knee, classic")]
pub struct InvalidPushupVariant(pub String);

impl FromStr for PushupVariant {
    type Err = InvalidPushupVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wall" => Ok(PushupVariant::Wall),
            "incline" => Ok(PushupVariant::Incline),
            "knee" => Ok(PushupVariant::Knee),
            "classic" => Ok(PushupVariant::Classic),
            _ => Err(InvalidPushupVariant(raw.to_string())),
        }
    }
}

/// The five measured exercise results of a self-assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResults {
    pub max_push_ups: u32,
    pub max_squats: u32,
    pub max_reverse_snow_angels_45s: u32,
    pub plank_max_time_seconds: u32,
    pub mountain_climbers_45s: u32,
}

/// A validated submission. Only the validator constructs these from raw request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub user_id: String,
    pub pushups_type: PushupVariant,
    pub results: ExerciseResults,
}

impl Submission {
    pub fn test_results(&self) -> TestResults {
        TestResults {
            max_squats: self.results.max_squats,
            pushups_type: self.pushups_type.as_str().to_string(),
            max_push_ups: self.results.max_push_ups,
            max_reverse_snow_angels_45s: self.results.max_reverse_snow_angels_45s,
            plank_max_time_seconds: self.results.plank_max_time_seconds,
            mountain_climbers_45s: self.results.mountain_climbers_45s,
        }
    }
}

/// Flat classifier input matching the stored test-result layout.
///
/// The variant stays a string here because stored records are re-classified without passing
/// back through the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResults {
    pub max_squats: u32,
    pub pushups_type: String,
    pub max_push_ups: u32,
    pub max_reverse_snow_angels_45s: u32,
    pub plank_max_time_seconds: u32,
    pub mountain_climbers_45s: u32,
}

/// Per-category levels keyed by the fixed category set.
pub type CategoryLevels = BTreeMap<Category, Level>;

/// Classifier output returned to the caller for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub per_category: CategoryLevels,
    pub global_level: Level,
    pub global_level_raw_avg_points: f64,
}

impl ClassificationResult {
    pub fn level_for(&self, category: Category) -> Option<Level> {
        self.per_category.get(&category).copied()
    }
}

/// Identifier of a stored raw test result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestId(pub String);

/// Identifier of a stored user-level record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserLevelsId(pub String);

impl TestId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl UserLevelsId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserLevelsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
