use serde::Serialize;
use uuid::Uuid;

use crate::auth::{self, AuthError, Claims};
use crate::database::models::Admin;
use crate::database::repository::AdminRepository;

/// Login flows. The tenant/platform discriminator is pinned in the lookup
/// query itself, so a platform-owner row can never satisfy a tenant login
/// or vice versa.
pub struct AuthService {
    admins: AdminRepository,
}

#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub admin_id: Uuid,
    pub client_id: Option<Uuid>,
    pub email: String,
    pub full_name: Option<String>,
    pub expires_in: i64,
}

impl AuthService {
    pub fn new(admins: AdminRepository) -> Self {
        Self { admins }
    }

    /// Tenant-admin login, scoped to the tenant resolved from the host.
    pub async fn login_tenant_admin(
        &self,
        client_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let admin = self
            .admins
            .find_tenant_admin(email, client_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        self.finish_login(admin, password)
    }

    /// Platform-owner login. Only rows with client_id IS NULL qualify.
    pub async fn login_platform_owner(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let admin = self
            .admins
            .find_platform_owner(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        self.finish_login(admin, password)
    }

    fn finish_login(&self, admin: Admin, password: &str) -> Result<LoginOutcome, AuthError> {
        if !auth::verify_password(password, &admin.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        // Password first: a disabled account with the right password
        // reports account-disabled, not invalid-credentials.
        if !admin.is_active {
            return Err(AuthError::AccountDisabled);
        }

        let claims = Claims::for_admin(&admin);
        let token = auth::generate_token(&claims)?;

        tracing::info!(admin = %admin.email, "login successful");

        Ok(LoginOutcome {
            token,
            admin_id: admin.id,
            client_id: admin.client_id,
            email: admin.email,
            full_name: admin.full_name,
            expires_in: claims.expires_in_secs(),
        })
    }
}
