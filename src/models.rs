use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_id: i64,
    pub goal_type: String,
    pub image: Option<String>,
    pub description: String,
    pub target_days: i64,
    pub percentage_of_achievement: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub goal_type: String,
    pub image: Option<String>,
    pub description: String,
    pub target_days: i64,
    pub percentage_of_achievement: f64,
}

/// Partial update of a goal row. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub goal_type: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub target_days: Option<i64>,
    pub percentage_of_achievement: Option<f64>,
}

impl GoalPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Scalar fields of the add/update goal forms plus the stored upload name.
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub goal_type: String,
    pub description: String,
    pub target_days: String,
    pub percentage_of_achievement: String,
    pub image: Option<String>,
}

impl GoalForm {
    pub fn into_new_goal(self) -> NewGoal {
        NewGoal {
            target_days: coerce_days(&self.target_days),
            percentage_of_achievement: coerce_number(&self.percentage_of_achievement),
            goal_type: self.goal_type,
            image: self.image,
            description: self.description,
        }
    }

    /// Scalars are always overwritten; the image only when a file came with the request.
    pub fn into_patch(self) -> GoalPatch {
        GoalPatch {
            target_days: Some(coerce_days(&self.target_days)),
            percentage_of_achievement: Some(coerce_number(&self.percentage_of_achievement)),
            goal_type: Some(self.goal_type),
            image: self.image,
            description: Some(self.description),
        }
    }
}

fn coerce_days(value: &str) -> i64 {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|days| days.is_finite())
                .map(|days| days.round() as i64)
        })
        .unwrap_or(0)
}

fn coerce_number(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BmiRequest {
    pub weight: Option<String>,
    pub height: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BmiResponse {
    pub bmi: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(days: &str, percentage: &str) -> GoalForm {
        GoalForm {
            goal_type: "Fitness".into(),
            description: "Run daily".into(),
            target_days: days.into(),
            percentage_of_achievement: percentage.into(),
            image: None,
        }
    }

    #[test]
    fn numeric_fields_are_coerced_not_rejected() {
        let goal = form(" 30 ", "42.5").into_new_goal();
        assert_eq!(goal.target_days, 30);
        assert_eq!(goal.percentage_of_achievement, 42.5);

        let goal = form("12.6", "abc").into_new_goal();
        assert_eq!(goal.target_days, 13);
        assert_eq!(goal.percentage_of_achievement, 0.0);

        let goal = form("", "").into_new_goal();
        assert_eq!(goal.target_days, 0);
        assert_eq!(goal.percentage_of_achievement, 0.0);
    }

    #[test]
    fn patch_keeps_image_unless_uploaded() {
        let patch = form("10", "5").into_patch();
        assert_eq!(patch.image, None);
        assert_eq!(patch.goal_type.as_deref(), Some("Fitness"));
        assert_eq!(patch.target_days, Some(10));

        let mut with_file = form("10", "5");
        with_file.image = Some("run.png".into());
        assert_eq!(with_file.into_patch().image.as_deref(), Some("run.png"));
    }

    #[test]
    fn empty_patch_detection() {
        assert!(GoalPatch::default().is_empty());
        assert!(!form("1", "1").into_patch().is_empty());
    }
}
