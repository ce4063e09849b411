use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Citizen,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_submitted: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_resolved: Option<u32>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_never_serialized() {
        let user = User {
            id: 2,
            username: "johndoe".to_string(),
            password: "password123".to_string(),
            role: Role::Citizen,
            email: "john@example.com".to_string(),
            credits: Some(245),
            reports_submitted: Some(12),
            reports_resolved: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("reports_resolved").is_none());
        assert_eq!(json["role"], "citizen");
        assert_eq!(json["credits"], 245);
    }
}
