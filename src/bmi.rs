use crate::models::{BmiRequest, BmiResponse};

pub const MISSING_INPUT: &str = "Please provide both weight and height.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obesity,
}

impl BmiCategory {
    /// Cascading thresholds. Values in [24.9, 25) match no band and land in
    /// `Obesity`, same as values from 29.9 upward.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi >= 18.5 && bmi < 24.9 {
            Self::NormalWeight
        } else if bmi >= 25.0 && bmi < 29.9 {
            Self::Overweight
        } else {
            Self::Obesity
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obesity => "Obesity",
        }
    }
}

/// `weight` in kilograms, `height` in centimeters.
pub fn compute_bmi(weight: f64, height: f64) -> f64 {
    let height_in_meters = height / 100.0;
    weight / (height_in_meters * height_in_meters)
}

pub fn evaluate(request: &BmiRequest) -> Result<BmiResponse, &'static str> {
    let weight = present(request.weight.as_deref()).ok_or(MISSING_INPUT)?;
    let height = present(request.height.as_deref()).ok_or(MISSING_INPUT)?;

    let bmi = compute_bmi(to_number(weight), to_number(height));
    Ok(BmiResponse {
        bmi: to_fixed(bmi),
        category: BmiCategory::classify(bmi).label().to_string(),
    })
}

/// Only an absent or empty field counts as missing.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Loose numeric conversion: surrounding whitespace is ignored, blank text is
/// zero and anything unparsable is NaN.
fn to_number(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    let unsigned = value.trim_start_matches(['+', '-']);
    if unsigned.starts_with(|ch: char| ch.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return f64::NAN;
    }
    match unsigned {
        "Infinity" if value.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => value.parse::<f64>().unwrap_or(f64::NAN),
    }
}

fn to_fixed(bmi: f64) -> String {
    if bmi.is_nan() {
        "NaN".to_string()
    } else if bmi.is_infinite() {
        (if bmi > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else {
        format!("{bmi:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(weight: Option<&str>, height: Option<&str>) -> BmiRequest {
        BmiRequest {
            weight: weight.map(str::to_owned),
            height: height.map(str::to_owned),
        }
    }

    fn evaluate_ok(weight: &str, height: &str) -> BmiResponse {
        evaluate(&request(Some(weight), Some(height))).expect("valid input")
    }

    #[test]
    fn reference_measurements() {
        let result = evaluate_ok("70", "175");
        assert_eq!(result.bmi, "22.86");
        assert_eq!(result.category, "Normal weight");

        let result = evaluate_ok("50", "160");
        assert_eq!(result.bmi, "19.53");
        assert_eq!(result.category, "Normal weight");

        let result = evaluate_ok("45", "170");
        assert_eq!(result.bmi, "15.57");
        assert_eq!(result.category, "Underweight");
    }

    #[test]
    fn upper_bands() {
        assert_eq!(evaluate_ok("80", "170").category, "Overweight");
        assert_eq!(evaluate_ok("120", "170").category, "Obesity");
    }

    #[test]
    fn gap_between_normal_and_overweight_falls_through() {
        assert_eq!(BmiCategory::classify(24.89), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::classify(24.95), BmiCategory::Obesity);
        assert_eq!(BmiCategory::classify(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(29.95), BmiCategory::Obesity);
    }

    #[test]
    fn absent_or_empty_input_is_missing() {
        assert_eq!(evaluate(&request(None, Some("170"))).unwrap_err(), MISSING_INPUT);
        assert_eq!(evaluate(&request(Some("70"), None)).unwrap_err(), MISSING_INPUT);
        assert_eq!(evaluate(&request(Some(""), Some("170"))).unwrap_err(), MISSING_INPUT);
        assert_eq!(evaluate(&request(None, None)).unwrap_err(), MISSING_INPUT);
    }

    #[test]
    fn present_but_odd_input_is_still_computed() {
        let result = evaluate_ok("heavy", "170");
        assert_eq!(result.bmi, "NaN");
        assert_eq!(result.category, "Obesity");

        let result = evaluate_ok("70", "0");
        assert_eq!(result.bmi, "Infinity");
        assert_eq!(result.category, "Obesity");

        let result = evaluate_ok("0", "170");
        assert_eq!(result.bmi, "0.00");
        assert_eq!(result.category, "Underweight");

        let result = evaluate_ok(" ", "170");
        assert_eq!(result.bmi, "0.00");

        assert_eq!(evaluate_ok(" 70 ", "175").bmi, "22.86");
        assert_eq!(evaluate_ok("inf", "170").bmi, "NaN");
    }
}
