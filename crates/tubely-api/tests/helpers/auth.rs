use crate::helpers::TestApp;
use uuid::Uuid;

/// Signing secret shared by the test config and token helpers.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// A caller with a valid bearer token.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn create_test_user(app: &TestApp) -> TestUser {
    create_test_user_with_id(app, Uuid::new_v4())
}

/// A token for a user whose records were seeded before the app was built.
pub fn create_test_user_with_id(app: &TestApp, user_id: Uuid) -> TestUser {
    let token = app.jwt.issue(user_id).expect("Failed to issue token");
    TestUser { user_id, token }
}
