//! Demo data loaded when `SEED_DEMO_DATA` is on.

use crate::models::{
    Comment, Report, ReportCategory, ReportId, ReportPriority, ReportStatus, User, UserRole,
};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, d, 0, 0, 0)
        .single()
        .expect("demo dates are valid calendar days")
}

pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "1".into(),
            name: "John Student".into(),
            email: "student@college.edu".into(),
            role: UserRole::Student,
            department: None,
            created_at: day(2024, 1, 15),
        },
        User {
            id: "2".into(),
            name: "Admin User".into(),
            email: "admin@college.edu".into(),
            role: UserRole::Admin,
            department: Some("IT Services".into()),
            created_at: day(2024, 1, 1),
        },
        User {
            id: "3".into(),
            name: "Super Admin".into(),
            email: "superadmin@college.edu".into(),
            role: UserRole::Superadmin,
            department: None,
            created_at: day(2023, 12, 1),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn report(
    id: ReportId,
    title: &str,
    description: &str,
    category: ReportCategory,
    location: &str,
    priority: ReportPriority,
    status: ReportStatus,
    assigned: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
) -> Report {
    Report {
        id,
        reporter_id: "1".into(),
        reporter_name: "John Student".into(),
        title: title.into(),
        description: description.into(),
        category,
        location: location.into(),
        priority,
        status,
        assigned_to: assigned.then(|| "2".to_string()),
        assigned_to_name: assigned.then(|| "Admin User".to_string()),
        attachments: Vec::new(),
        created_at,
        updated_at,
        resolved_at,
        version: 1,
    }
}

pub fn demo_reports() -> Vec<Report> {
    vec![
        report(
            1,
            "WiFi not working in Block A",
            "The WiFi connection in Block A, Room 201 has been down for 3 days. Unable to access online resources for assignments.",
            ReportCategory::It,
            "Block A, Room 201",
            ReportPriority::High,
            ReportStatus::InProgress,
            true,
            day(2024, 11, 20),
            day(2024, 11, 22),
            None,
        ),
        report(
            2,
            "Broken chair in Library",
            "There is a broken chair in the library study area near the computer section. It is a safety hazard.",
            ReportCategory::Library,
            "Central Library, Study Area",
            ReportPriority::Medium,
            ReportStatus::New,
            false,
            day(2024, 11, 24),
            day(2024, 11, 24),
            None,
        ),
        report(
            3,
            "Water leakage in hostel bathroom",
            "There is continuous water leakage from the tap in the common bathroom. Wasting a lot of water.",
            ReportCategory::Hostel,
            "Boys Hostel, Block 2, Floor 3",
            ReportPriority::High,
            ReportStatus::Resolved,
            true,
            day(2024, 11, 15),
            day(2024, 11, 18),
            Some(day(2024, 11, 18)),
        ),
        report(
            4,
            "Projector malfunction in Lecture Hall 5",
            "The projector in Lecture Hall 5 is showing distorted colors and occasionally shuts down during presentations.",
            ReportCategory::Academics,
            "Lecture Hall 5, Main Building",
            ReportPriority::Medium,
            ReportStatus::PendingStudent,
            true,
            day(2024, 11, 22),
            day(2024, 11, 23),
            None,
        ),
    ]
}

fn comment(report_id: ReportId, staff: bool, content: &str, at: DateTime<Utc>) -> Comment {
    let (author_id, author_name, author_role) = if staff {
        ("2", "Admin User", UserRole::Admin)
    } else {
        ("1", "John Student", UserRole::Student)
    };
    Comment {
        id: Uuid::new_v4(),
        report_id,
        author_id: author_id.into(),
        author_name: author_name.into(),
        author_role,
        content: content.into(),
        attachments: Vec::new(),
        created_at: at,
    }
}

pub fn demo_comments() -> Vec<(ReportId, Vec<Comment>)> {
    vec![
        (
            1,
            vec![
                comment(
                    1,
                    true,
                    "We have assigned a technician to look into this issue. Expected resolution within 24 hours.",
                    day(2024, 11, 21),
                ),
                comment(1, false, "Thank you for the quick response!", day(2024, 11, 21)),
            ],
        ),
        (
            3,
            vec![comment(
                3,
                true,
                "The plumber has fixed the leakage. Please confirm if the issue is resolved.",
                day(2024, 11, 18),
            )],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stats::compute_stats;

    #[test]
    fn demo_reports_are_consistent() {
        let reports = demo_reports();
        for r in &reports {
            assert_eq!(r.assigned_to.is_some(), r.assigned_to_name.is_some());
            assert!(r.updated_at >= r.created_at);
            if r.status == ReportStatus::Resolved {
                assert!(r.resolved_at.is_some());
            }
        }

        let stats = compute_stats(&reports);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.avg_resolution_days, 3.0);
    }

    #[test]
    fn demo_comments_reference_demo_reports() {
        let ids: Vec<_> = demo_reports().iter().map(|r| r.id).collect();
        for (report_id, thread) in demo_comments() {
            assert!(ids.contains(&report_id));
            assert!(thread.iter().all(|c| c.report_id == report_id));
        }
    }

    #[test]
    fn demo_users_cover_every_role() {
        let roles: Vec<_> = demo_users().iter().map(|u| u.role).collect();
        assert_eq!(
            roles,
            vec![UserRole::Student, UserRole::Admin, UserRole::Superadmin]
        );
    }
}
