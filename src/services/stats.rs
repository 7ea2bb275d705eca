use futures::try_join;
use serde::Serialize;

use crate::database::manager::DatabaseError;
use crate::database::models::{ConsultationStatus, MessageStatus};
use crate::database::repository::ScopedRepository;
use crate::database::scope::SqlParam;

/// Counts shown on the tenant admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub countries: i64,
    pub universities: i64,
    pub programs: i64,
    pub articles: i64,
    pub testimonials: i64,
    pub consultations: i64,
    pub pending_consultations: i64,
    pub contact_messages: i64,
    pub unread_messages: i64,
}

pub async fn dashboard_stats(repo: &ScopedRepository) -> Result<DashboardStats, DatabaseError> {
    let countries_repo = repo.countries();
    let universities_repo = repo.universities();
    let programs_repo = repo.programs();
    let articles_repo = repo.articles();
    let testimonials_repo = repo.testimonials();
    let consultations_repo = repo.consultations();
    let messages_repo = repo.contact_messages();

    let (
        countries,
        universities,
        programs,
        articles,
        testimonials,
        consultations,
        pending_consultations,
        contact_messages,
        unread_messages,
    ) = try_join!(
        countries_repo.count(),
        universities_repo.count(),
        programs_repo.count(),
        articles_repo.count(),
        testimonials_repo.count(),
        consultations_repo.count(),
        consultations_repo.count_filtered(vec![(
            "status",
            SqlParam::Text(ConsultationStatus::Pending.as_str().into()),
        )]),
        messages_repo.count(),
        messages_repo.count_filtered(vec![(
            "status",
            SqlParam::Text(MessageStatus::Unread.as_str().into()),
        )]),
    )?;

    Ok(DashboardStats {
        countries,
        universities,
        programs,
        articles,
        testimonials,
        consultations,
        pending_consultations,
        contact_messages,
        unread_messages,
    })
}
