use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::database::repository::{IntoColumns, TenantRecord};
use crate::database::scope::{Order, SqlParam};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord for ContactMessage {
    const TABLE: &'static str = "contact_messages";
    const LABEL: &'static str = "contact message";
    const DEFAULT_ORDER: (&'static str, Order) = ("created_at", Order::Desc);

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageStatus::Unread => "unread",
            MessageStatus::Read => "read",
            MessageStatus::Replied => "replied",
        }
    }
}

impl FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(MessageStatus::Unread),
            "read" => Ok(MessageStatus::Read),
            "replied" => Ok(MessageStatus::Replied),
            other => Err(format!("unknown message status: {}", other)),
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl IntoColumns for CreateContactMessage {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns: Vec<(&'static str, SqlParam)> = vec![
            ("name", self.name.into()),
            ("email", self.email.into()),
            ("message", self.message.into()),
            ("status", MessageStatus::Unread.as_str().into()),
        ];
        if let Some(v) = self.phone {
            columns.push(("phone", v.into()));
        }
        if let Some(v) = self.subject {
            columns.push(("subject", v.into()));
        }
        columns
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessageStatus {
    pub status: MessageStatus,
}

impl IntoColumns for UpdateMessageStatus {
    fn into_columns(self) -> Vec<(&'static str, SqlParam)> {
        vec![("status", self.status.as_str().into())]
    }
}
