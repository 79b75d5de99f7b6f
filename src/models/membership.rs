use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipRole {
    Owner,
    Volunteer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Pending,
    Accepted,
    Rejected,
}

impl MembershipStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "Pendiente",
            MembershipStatus::Accepted => "Aceptado",
            MembershipStatus::Rejected => "Rechazado",
        }
    }
}

/// Owner decision on a pending join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberDecision {
    Accepted,
    Rejected,
}

impl From<MemberDecision> for MembershipStatus {
    fn from(decision: MemberDecision) -> Self {
        match decision {
            MemberDecision::Accepted => MembershipStatus::Accepted,
            MemberDecision::Rejected => MembershipStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMembership {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    #[serde(default)]
    pub message: Option<String>,
    pub joined_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct JoinProject<'a> {
    pub message: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ManageMember {
    pub action: MemberDecision,
}
