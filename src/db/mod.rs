use crate::models::catalog::{GrowthSample, InfrastructureAsset, Project};
use crate::models::report::{Report, ReportStatus, ValidReport};
use crate::models::user::{Role, User};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

pub mod demo;

/// Credits a citizen earns for each submitted report.
pub const REPORT_CREDITS: u32 = 20;

/// In-memory records for users, session tokens and reports. Nothing
/// survives a restart.
pub struct Database {
    users: Mutex<HashMap<String, User>>,
    tokens: Mutex<HashMap<String, String>>,
    reports: Mutex<Vec<Report>>,
    projects: Vec<Project>,
    infrastructure: Vec<InfrastructureAsset>,
    growth: Vec<GrowthSample>,
}

impl Database {
    pub fn with_demo_data() -> Self {
        let users = demo::users()
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();

        Self {
            users: Mutex::new(users),
            tokens: Mutex::new(HashMap::new()),
            reports: Mutex::new(Vec::new()),
            projects: demo::projects(),
            infrastructure: demo::infrastructure(),
            growth: demo::growth_series(),
        }
    }

    /// Checks a username/password pair and issues a fresh bearer token.
    /// A user holds at most one token: logging in again revokes the old one.
    pub fn login(&self, username: &str, password: &str) -> Option<(String, User)> {
        let user = self
            .users
            .lock()
            .get(username)
            .filter(|user| user.password == password)
            .cloned()?;

        let token = Uuid::new_v4().simple().to_string();
        let mut tokens = self.tokens.lock();
        tokens.retain(|_, owner| *owner != user.username);
        tokens.insert(token.clone(), user.username.clone());
        drop(tokens);
        Some((token, user))
    }

    /// Resolves a bearer token to the user it was issued to.
    pub fn authenticate(&self, token: &str) -> Option<User> {
        let username = self.tokens.lock().get(token).cloned()?;
        self.users.lock().get(&username).cloned()
    }

    /// Stores a report for `user` and returns it with the user's credit
    /// balance after the submission.
    pub fn create_report(&self, user: &User, new: ValidReport) -> (Report, u32) {
        let report = {
            let mut reports = self.reports.lock();
            let report = Report {
                id: reports.len() as u64 + 1,
                user_id: user.id,
                kind: new.kind,
                description: new.description,
                latitude: new.latitude,
                longitude: new.longitude,
                status: ReportStatus::Pending,
                priority: new.priority,
                created_at: Utc::now(),
                image_url: new.image_url,
            };
            reports.push(report.clone());
            report
        };

        let mut users = self.users.lock();
        let credits = match users.get_mut(&user.username) {
            Some(stored) if stored.role == Role::Citizen => {
                *stored.reports_submitted.get_or_insert(0) += 1;
                let credits = stored.credits.get_or_insert(0);
                *credits += REPORT_CREDITS;
                *credits
            }
            Some(stored) => stored.credits.unwrap_or(0),
            None => 0,
        };

        (report, credits)
    }

    /// Admins see every report, everyone else only their own.
    pub fn reports_for(&self, user: &User) -> Vec<Report> {
        let reports = self.reports.lock();
        if user.is_admin() {
            reports.clone()
        } else {
            reports
                .iter()
                .filter(|report| report.user_id == user.id)
                .cloned()
                .collect()
        }
    }

    pub fn update_report_status(&self, id: u64, status: ReportStatus) -> Option<Report> {
        let mut reports = self.reports.lock();
        let report = reports.iter_mut().find(|report| report.id == id)?;

        let newly_resolved =
            report.status != ReportStatus::Resolved && status == ReportStatus::Resolved;
        report.status = status;
        let report = report.clone();

        if newly_resolved {
            let mut users = self.users.lock();
            if let Some(owner) = users
                .values_mut()
                .find(|user| user.id == report.user_id && user.role == Role::Citizen)
            {
                *owner.reports_resolved.get_or_insert(0) += 1;
            }
        }

        Some(report)
    }

    pub fn projects(&self, kind: Option<&str>) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|project| kind.map_or(true, |kind| project.kind == kind))
            .cloned()
            .collect()
    }

    pub fn infrastructure(&self) -> &[InfrastructureAsset] {
        &self.infrastructure
    }

    pub fn growth_series(&self) -> &[GrowthSample] {
        &self.growth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::Priority;

    fn report(kind: &str) -> ValidReport {
        ValidReport {
            kind: kind.to_string(),
            description: "Broken streetlight".to_string(),
            latitude: 37.77,
            longitude: -122.41,
            priority: Priority::Low,
            image_url: None,
        }
    }

    #[test]
    fn test_login_issues_usable_token() {
        let db = Database::with_demo_data();
        assert!(db.login("johndoe", "wrong").is_none());
        assert!(db.login("nobody", "password123").is_none());

        let (token, user) = db.login("johndoe", "password123").unwrap();
        assert_eq!(user.id, 2);
        assert_eq!(db.authenticate(&token).unwrap().username, "johndoe");
        assert!(db.authenticate("johndoe").is_none());
    }

    #[test]
    fn test_relogin_revokes_previous_token() {
        let db = Database::with_demo_data();
        let (old, _) = db.login("johndoe", "password123").unwrap();
        let (sarah, _) = db.login("sarahj", "password123").unwrap();
        let (new, _) = db.login("johndoe", "password123").unwrap();

        assert_ne!(old, new);
        assert!(db.authenticate(&old).is_none());
        assert_eq!(db.authenticate(&new).unwrap().username, "johndoe");
        assert_eq!(db.authenticate(&sarah).unwrap().username, "sarahj");
        assert_eq!(db.tokens.lock().len(), 2);
    }

    #[test]
    fn test_citizen_earns_credits() {
        let db = Database::with_demo_data();
        let (_, user) = db.login("johndoe", "password123").unwrap();

        let (report, credits) = db.create_report(&user, report("streetlight"));
        assert_eq!(report.id, 1);
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(credits, 245 + REPORT_CREDITS);

        let (_, user) = db.login("johndoe", "password123").unwrap();
        assert_eq!(user.reports_submitted, Some(13));
    }

    #[test]
    fn test_reports_scoped_by_role() {
        let db = Database::with_demo_data();
        let (_, john) = db.login("johndoe", "password123").unwrap();
        let (_, sarah) = db.login("sarahj", "password123").unwrap();
        let (_, admin) = db.login("admin", "admin123").unwrap();

        db.create_report(&john, report("pothole"));
        db.create_report(&sarah, report("graffiti"));
        let (_, admin_credits) = db.create_report(&admin, report("flooding"));

        assert_eq!(admin_credits, 0);
        assert_eq!(db.reports_for(&john).len(), 1);
        assert_eq!(db.reports_for(&sarah)[0].kind, "graffiti");
        assert_eq!(db.reports_for(&admin).len(), 3);
    }

    #[test]
    fn test_resolving_counts_once() {
        let db = Database::with_demo_data();
        let (_, john) = db.login("johndoe", "password123").unwrap();
        let (report, _) = db.create_report(&john, report("pothole"));

        db.update_report_status(report.id, ReportStatus::Resolved).unwrap();
        db.update_report_status(report.id, ReportStatus::Resolved).unwrap();
        assert!(db.update_report_status(99, ReportStatus::InProgress).is_none());

        let (_, john) = db.login("johndoe", "password123").unwrap();
        assert_eq!(john.reports_resolved, Some(9));
    }

    #[test]
    fn test_project_filter() {
        let db = Database::with_demo_data();
        assert_eq!(db.projects(None).len(), 2);
        assert_eq!(db.projects(Some("road"))[0].name, "Highway 101 Expansion");
        assert!(db.projects(Some("airport")).is_empty());
    }
}
