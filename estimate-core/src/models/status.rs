use serde::{Deserialize, Serialize};

/// Workflow state of an estimate.
///
/// Transitions are plain field edits, not a guarded state machine; the only
/// hard rules are that new estimates start as `Draft` and duplication always
/// resets to `Draft`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Completed,
}

impl EstimateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "accepted" => Some(Self::Accepted),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_draft() {
        assert_eq!(EstimateStatus::default(), EstimateStatus::Draft);
    }

    #[test]
    fn parse_round_trips_every_code() {
        for status in [
            EstimateStatus::Draft,
            EstimateStatus::Sent,
            EstimateStatus::Accepted,
            EstimateStatus::Completed,
        ] {
            assert_eq!(EstimateStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(EstimateStatus::parse("archived"), None);
    }
}
