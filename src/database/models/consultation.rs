use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, TenantRecord};
use crate::database::scope::{Order, SqlParam};

/// Consultation request lead. Status moves pending -> contacted -> completed
/// by convention; the set is validated, transitions are not restricted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Consultation {
    pub id: Uuid,
    pub client_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub country_id: Option<Uuid>,
    pub program_name: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for Consultation {
    const TABLE: &'static str = "consultations";
    const LABEL: &'static str = "consultation";
    const DEFAULT_ORDER: (&'static str, Order) = ("created_at", Order::Desc);

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Pending,
    Contacted,
    Completed,
}

impl ConsultationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Contacted => "contacted",
            ConsultationStatus::Completed => "completed",
        }
    }
}

impl FromStr for ConsultationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ConsultationStatus::Pending),
            "contacted" => Ok(ConsultationStatus::Contacted),
            "completed" => Ok(ConsultationStatus::Completed),
            other => Err(format!("unknown consultation status: {}", other)),
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsultation {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub country_id: Option<Uuid>,
    pub program_name: Option<String>,
    pub message: Option<String>,
}

impl IntoColumns for CreateConsultation {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("full_name", self.full_name.into()),
            ("phone", self.phone.into()),
            ("status", ConsultationStatus::Pending.as_str().into()),
        ];
        if let Some(v) = self.email {
            columns.push(("email", v.into()));
        }
        if let Some(v) = self.country_id {
            columns.push(("country_id", v.into()));
        }
        if let Some(v) = self.program_name {
            columns.push(("program_name", v.into()));
        }
        if let Some(v) = self.message {
            columns.push(("message", v.into()));
        }
        columns
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateConsultationStatus {
    pub status: ConsultationStatus,
}

impl IntoColumns for UpdateConsultationStatus {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        vec![("status", self.status.as_str().into())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for s in ["pending", "contacted", "completed"] {
            assert_eq!(ConsultationStatus::from_str(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(ConsultationStatus::from_str("archived").is_err());
    }

    #[test]
    fn new_consultations_start_pending() {
        let columns = CreateConsultation {
            full_name: "Sara".into(),
            phone: "+96650000000".into(),
            email: None,
            country_id: None,
            program_name: None,
            message: None,
        }
        .into_columns();
        assert!(columns.contains(&("status", SqlParam::Text("pending".into()))));
    }
}
