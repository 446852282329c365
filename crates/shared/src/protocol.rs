use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

pub const PREDICT_PATH: &str = "/predict";
pub const SAVE_FLAG_FIELD: &str = "save_to_db";

pub const NO_PRODUCT: &str = "No product";
pub const NO_DETAILS: &str = "No detailed information available.";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const SAVE_FAILED: &str = "Failed to save reaction.";

/// Fields posted to `/predict`, both for predictions and for saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionForm {
    pub compound: String,
    pub catalyst: String,
    pub reaction_type: String,
}

impl PredictionForm {
    pub fn new(
        compound: impl Into<String>,
        catalyst: impl Into<String>,
        reaction_type: impl Into<String>,
    ) -> Self {
        Self {
            compound: compound.into(),
            catalyst: catalyst.into(),
            reaction_type: reaction_type.into(),
        }
    }

    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("compound", self.compound.as_str()),
            ("catalyst", self.catalyst.as_str()),
            ("reaction_type", self.reaction_type.as_str()),
        ]
    }
}

/// Raw `/predict` body. A missing `success` reads as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactant_svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalyst: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A successful prediction, kept by the form so it can be saved later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub reactant: String,
    pub reactant_svg: String,
    pub product: Option<String>,
    pub product_svg: Option<String>,
    pub reaction_type: String,
    pub catalyst: String,
    pub reaction_details: Option<String>,
}

impl PredictionResult {
    pub fn save_form(&self) -> PredictionForm {
        PredictionForm::new(&self.reactant, &self.catalyst, &self.reaction_type)
    }

    pub fn details_text(&self) -> &str {
        self.reaction_details.as_deref().unwrap_or(NO_DETAILS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Predicted(PredictionResult),
    Failed { error: Option<String> },
}

impl PredictionOutcome {
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        let response: PredictionResponse = serde_json::from_str(body)?;
        Self::try_from(response)
    }
}

impl TryFrom<PredictionResponse> for PredictionOutcome {
    type Error = ProtocolError;

    fn try_from(value: PredictionResponse) -> Result<Self, Self::Error> {
        if !value.success {
            return Ok(Self::Failed {
                error: non_empty(value.error),
            });
        }

        Ok(Self::Predicted(PredictionResult {
            reactant: required(value.reactant, "reactant")?,
            reactant_svg: required(value.reactant_svg, "reactant_svg")?,
            product: non_empty(value.product),
            product_svg: non_empty(value.product_svg),
            reaction_type: required(value.reaction_type, "reaction_type")?,
            catalyst: required(value.catalyst, "catalyst")?,
            reaction_details: non_empty(value.reaction_details),
        }))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    Failed { error: Option<String> },
}

impl SaveOutcome {
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        let response: SaveResponse = serde_json::from_str(body)?;
        Ok(Self::from(response))
    }
}

impl From<SaveResponse> for SaveOutcome {
    fn from(value: SaveResponse) -> Self {
        if value.success {
            Self::Saved
        } else {
            Self::Failed {
                error: non_empty(value.error),
            }
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ProtocolError> {
    value.ok_or(ProtocolError::MissingField(field))
}

// Empty strings are treated like missing fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success_without_product_fields() {
        let outcome = PredictionOutcome::from_json(
            r#"{"success":true,"reactant":"ethanol","reactant_svg":"<svg/>",
                "reaction_type":"oxidation","catalyst":"kmno4","reaction_details":"..."}"#,
        )
        .expect("decode");

        let result = match outcome {
            PredictionOutcome::Predicted(result) => result,
            other => panic!("expected prediction, got {other:?}"),
        };
        assert_eq!(result.reactant, "ethanol");
        assert_eq!(result.reactant_svg, "<svg/>");
        assert_eq!(result.product, None);
        assert_eq!(result.product_svg, None);
        assert_eq!(result.details_text(), "...");
    }

    #[test]
    fn empty_optional_strings_count_as_missing() {
        let outcome = PredictionOutcome::from_json(
            r#"{"success":true,"reactant":"phenol","reactant_svg":"<svg/>","product":"",
                "product_svg":"","reaction_type":"dehydration","catalyst":"heat",
                "reaction_details":""}"#,
        )
        .expect("decode");

        let result = match outcome {
            PredictionOutcome::Predicted(result) => result,
            other => panic!("expected prediction, got {other:?}"),
        };
        assert_eq!(result.product, None);
        assert_eq!(result.product_svg, None);
        assert_eq!(result.details_text(), NO_DETAILS);
    }

    #[test]
    fn failure_keeps_server_error() {
        let outcome =
            PredictionOutcome::from_json(r#"{"success":false,"error":"bad compound"}"#)
                .expect("decode");
        assert_eq!(
            outcome,
            PredictionOutcome::Failed {
                error: Some("bad compound".to_string())
            }
        );

        let outcome = PredictionOutcome::from_json(r#"{"success":false}"#).expect("decode");
        assert_eq!(outcome, PredictionOutcome::Failed { error: None });
    }

    #[test]
    fn success_missing_reactant_is_malformed() {
        let err = PredictionOutcome::from_json(
            r#"{"success":true,"reactant_svg":"<svg/>","reaction_type":"oxidation","catalyst":"pcc"}"#,
        )
        .expect_err("should reject");
        assert_eq!(err, ProtocolError::MissingField("reactant"));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = PredictionOutcome::from_json("<html>502 Bad Gateway</html>")
            .expect_err("should reject");
        assert!(matches!(err, ProtocolError::InvalidJson(_)));

    }

    #[test]
    fn missing_success_flag_reads_as_reported_failure() {
        assert_eq!(
            PredictionOutcome::from_json(r#"{"error":"server says no"}"#).expect("decode"),
            PredictionOutcome::Failed {
                error: Some("server says no".to_string())
            }
        );
        assert_eq!(
            SaveOutcome::from_json(r#"{"error":"no success flag"}"#).expect("decode"),
            SaveOutcome::Failed {
                error: Some("no success flag".to_string())
            }
        );
        assert_eq!(
            PredictionOutcome::from_json("{}").expect("decode"),
            PredictionOutcome::Failed { error: None }
        );
    }

    #[test]
    fn save_form_reuses_reaction_fields() {
        let result = PredictionResult {
            reactant: "butanol".to_string(),
            reactant_svg: "<svg/>".to_string(),
            product: Some("1-chlorobutane".to_string()),
            product_svg: Some("<svg/>".to_string()),
            reaction_type: "halogenation".to_string(),
            catalyst: "socl2".to_string(),
            reaction_details: None,
        };
        assert_eq!(
            result.save_form(),
            PredictionForm::new("butanol", "socl2", "halogenation")
        );
    }

    #[test]
    fn save_outcome_decodes_both_shapes() {
        assert_eq!(
            SaveOutcome::from_json(r#"{"success":true}"#).expect("decode"),
            SaveOutcome::Saved
        );
        assert_eq!(
            SaveOutcome::from_json(r#"{"success":false,"error":""}"#).expect("decode"),
            SaveOutcome::Failed { error: None }
        );
    }
}
