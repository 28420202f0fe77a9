pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;

use shared_types::{AppError, AppRole, User};

use crate::config::Settings;
use crate::repo::Store;

/// If the user's email matches `ADMIN_EMAIL`, grant the admin role.
/// Store errors are logged and the account keeps its current role.
pub async fn maybe_promote_admin(store: &dyn Store, settings: &Settings, user: &User) {
    if !settings.is_admin_email(&user.email) {
        return;
    }

    match store.role_of(user.id).await {
        Ok(Some(AppRole::Admin)) => {}
        Ok(_) => match store.set_role(user.id, AppRole::Admin).await {
            Ok(_) => tracing::info!(user_id = %user.id, email = %user.email, "granted admin via ADMIN_EMAIL"),
            Err(e) => log_promotion_failure(user, &e),
        },
        Err(e) => log_promotion_failure(user, &e),
    }
}

fn log_promotion_failure(user: &User, err: &AppError) {
    tracing::error!(user_id = %user.id, email = %user.email, error = %err, "failed to grant admin role");
}
