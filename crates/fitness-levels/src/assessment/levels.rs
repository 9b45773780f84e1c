//! Deterministic mapping from raw exercise results to category and global levels.

use super::domain::{
    Category, CategoryLevels, ClassificationResult, InvalidPushupVariant, Level, PushupVariant,
    TestResults,
};

pub fn level_lower_from_squats(reps: u32) -> Level {
    match reps {
        0..=20 => Level::Beginner,
        21..=40 => Level::Intermediate,
        _ => Level::Advanced,
    }
}

pub fn level_pull_from_reverse_snow_angels(reps_45s: u32) -> Level {
    match reps_45s {
        0..=10 => Level::Beginner,
        11..=20 => Level::Intermediate,
        _ => Level::Advanced,
    }
}

pub fn level_core_from_plank(seconds: u32) -> Level {
    match seconds {
        0..=29 => Level::Beginner,
        30..=74 => Level::Intermediate,
        _ => Level::Advanced,
    }
}

pub fn level_cond_from_mountain_climbers(reps_45s: u32) -> Level {
    match reps_45s {
        0..=29 => Level::Beginner,
        30..=60 => Level::Intermediate,
        _ => Level::Advanced,
    }
}

/// Classifies the PUSH category for an already parsed variant.
///
/// Zero reps is always BEGINNER, whatever variant was reported.
pub fn level_push(variant: PushupVariant, reps: u32) -> Level {
    if reps == 0 {
        return Level::Beginner;
    }

    match variant {
        PushupVariant::Wall | PushupVariant::Incline => Level::Beginner,
        PushupVariant::Knee => Level::Intermediate,
        PushupVariant::Classic if reps >= 11 => Level::Advanced,
        PushupVariant::Classic => Level::Intermediate,
    }
}

/// Classifies the PUSH category from a raw variant string.
///
/// The zero-rep floor applies before the variant is inspected; any other unknown variant is an
/// error rather than a guessed level.
pub fn level_push_from_pushups(
    pushups_type: &str,
    reps: u32,
) -> Result<Level, InvalidPushupVariant> {
    if reps == 0 {
        return Ok(Level::Beginner);
    }

    let variant = pushups_type.parse::<PushupVariant>()?;
    Ok(level_push(variant, reps))
}

/// Half-up rounding for the positive average domain.
fn round_half_up(value: f64) -> u8 {
    let rounded = (value + 0.5).floor();
    rounded.clamp(1.0, 3.0) as u8
}

/// Aggregates category levels into the global level.
///
/// Returns the global level together with the raw average of category points. When the
/// categories contain both a BEGINNER and an ADVANCED the global level is capped to
/// INTERMEDIATE; the raw average is always reported before that override.
pub fn aggregate_global_level(per_category: &CategoryLevels) -> (Level, f64) {
    if per_category.is_empty() {
        return (Level::Beginner, f64::from(Level::Beginner.points()));
    }

    let total: u32 = per_category
        .values()
        .map(|level| u32::from(level.points()))
        .sum();
    let avg_points = f64::from(total) / per_category.len() as f64;

    let mut level = Level::from_points(round_half_up(avg_points));

    let has_beginner = per_category.values().any(|level| *level == Level::Beginner);
    let has_advanced = per_category.values().any(|level| *level == Level::Advanced);
    if has_beginner && has_advanced {
        level = Level::Intermediate;
    }

    (level, avg_points)
}

/// Computes per-category levels, the global level, and the raw average points.
pub fn compute_levels(
    results: &TestResults,
) -> Result<ClassificationResult, InvalidPushupVariant> {
    let push = level_push_from_pushups(&results.pushups_type, results.max_push_ups)?;

    let per_category: CategoryLevels = Category::ALL
        .iter()
        .map(|category| {
            let level = match category {
                Category::Lower => level_lower_from_squats(results.max_squats),
                Category::Push => push,
                Category::Pull => {
                    level_pull_from_reverse_snow_angels(results.max_reverse_snow_angels_45s)
                }
                Category::Core => level_core_from_plank(results.plank_max_time_seconds),
                Category::Cond => level_cond_from_mountain_climbers(results.mountain_climbers_45s),
            };
            (*category, level)
        })
        .collect();

    let (global_level, global_level_raw_avg_points) = aggregate_global_level(&per_category);

    Ok(ClassificationResult {
        per_category,
        global_level,
        global_level_raw_avg_points,
    })
}
