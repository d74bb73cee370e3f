use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Client attribute a demographic histogram can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DemographicKey {
    Gender,
    Country,
    Handedness,
    Age,
}

impl DemographicKey {
    /// Column in `clients` to group by; `None` for derived keys.
    pub fn column(self) -> Option<&'static str> {
        match self {
            DemographicKey::Gender => Some("gender"),
            DemographicKey::Country => Some("country"),
            DemographicKey::Handedness => Some("handedness"),
            DemographicKey::Age => None,
        }
    }
}

/// Test-result metric that may be charted. The only way a column name
/// reaches dashboard SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResultMetric {
    #[default]
    BlockingRoundDuration,
    TestDuration,
    NumberOfRounds,
    FatigueLevel,
    CognitiveProcessingIndex,
}

impl ResultMetric {
    pub fn column(self) -> &'static str {
        match self {
            ResultMetric::BlockingRoundDuration => "blocking_round_duration",
            ResultMetric::TestDuration => "test_duration",
            ResultMetric::NumberOfRounds => "number_of_rounds",
            ResultMetric::FatigueLevel => "fatigue_level",
            ResultMetric::CognitiveProcessingIndex => "cognitive_processing_index",
        }
    }
}
