use anyhow::{Context, Result};
use uuid::Uuid;

use crate::config::Config;
use crate::repositories::{NewUser, UserRepository, UserUpdate};
use sea_orm::DatabaseConnection;

/// Makes sure the configured administrator account exists and holds the
/// admin flag.
pub async fn initialize_admin_user(db: &DatabaseConnection, config: &Config) -> Result<()> {
    let user_repo = UserRepository::new(db);

    let existing_admin = user_repo
        .find_by_email(&config.admin_email)
        .await
        .context("Failed to check existing admin")?;

    if let Some(admin) = existing_admin {
        if !admin.is_admin {
            user_repo
                .update(
                    admin.user_id,
                    UserUpdate {
                        is_admin: Some(true),
                        is_verified: Some(true),
                        ..Default::default()
                    },
                )
                .await
                .context("Failed to restore admin flag")?;
            tracing::warn!("Configured admin account had lost its admin flag; restored");
        } else {
            tracing::info!("Admin user already exists, skipping initialization");
        }
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password = bcrypt::hash(&config.admin_password, config.password_hash_cost)
        .context("Failed to hash admin password")?;

    user_repo
        .create(NewUser {
            user_id: Uuid::new_v4(),
            email: config.admin_email.clone(),
            password: hashed_password,
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            is_admin: true,
            is_supervisor: false,
            is_verified: true,
            scholar_id: None,
        })
        .await
        .context("Failed to insert admin user")?;

    tracing::info!("Admin user created: {}", config.admin_email);
    tracing::warn!("Please change the default admin password after first login");

    Ok(())
}
