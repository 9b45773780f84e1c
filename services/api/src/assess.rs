use clap::Args;
use fitness_levels::assessment::{
    compute_levels, validate, AssessmentServiceError, Category, ClassificationResult, Submission,
};
use fitness_levels::error::AppError;
use serde_json::{json, Value};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Identifier recorded with the assessment
    #[arg(long, default_value = "cli")]
    pub(crate) user_id: String,
    /// Push-up variant: wall, incline, knee, or classic
    #[arg(long)]
    pub(crate) pushups_type: String,
    /// Maximum push-up repetitions
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) push_ups: i64,
    /// Maximum squat repetitions
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) squats: i64,
    /// Reverse snow angels completed in 45 seconds
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) snow_angels: i64,
    /// Longest plank hold in seconds
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) plank_seconds: i64,
    /// Mountain climbers completed in 45 seconds
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) mountain_climbers: i64,
    /// Print the classification as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn request_body(&self) -> Value {
        json!({
            "user_id": self.user_id,
            "pushups_type": self.pushups_type,
            "results": {
                "max_push_ups": self.push_ups,
                "max_squats": self.squats,
                "max_reverse_snow_angels_45s": self.snow_angels,
                "plank_max_time_seconds": self.plank_seconds,
                "mountain_climbers_45s": self.mountain_climbers
            }
        })
    }
}

pub(crate) fn assess(args: &AssessArgs) -> Result<(Submission, ClassificationResult), AppError> {
    let submission = validate(&args.request_body()).map_err(AssessmentServiceError::from)?;
    let levels =
        compute_levels(&submission.test_results()).map_err(AssessmentServiceError::from)?;
    Ok((submission, levels))
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let (submission, levels) = assess(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&levels)?);
    } else {
        render_levels(&submission, &levels);
    }

    Ok(())
}

fn render_levels(submission: &Submission, levels: &ClassificationResult) {
    println!("Fitness assessment for {}", submission.user_id);
    println!("Push-up variant: {}", submission.pushups_type);

    println!("\nCategory levels");
    for category in Category::ALL {
        if let Some(level) = levels.level_for(category) {
            println!("- {category}: {level}");
        }
    }

    println!(
        "\nGlobal level: {} (average {:.2} points)",
        levels.global_level, levels.global_level_raw_avg_points
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_levels::assessment::{Level, ValidationError};

    fn args(pushups_type: &str, squats: i64) -> AssessArgs {
        AssessArgs {
            user_id: "cli".to_string(),
            pushups_type: pushups_type.to_string(),
            push_ups: 15,
            squats,
            snow_angels: 25,
            plank_seconds: 90,
            mountain_climbers: 70,
            json: false,
        }
    }

    #[test]
    fn assess_classifies_valid_arguments() {
        let (submission, levels) = assess(&args("classic", 50)).expect("assessment succeeds");

        assert_eq!(submission.results.max_squats, 50);
        assert_eq!(levels.global_level, Level::Advanced);
    }

    #[test]
    fn assess_surfaces_validation_errors() {
        match assess(&args("classic", -5)) {
            Err(AppError::Assessment(AssessmentServiceError::Validation(
                ValidationError::Negative("max_squats"),
            ))) => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
