//! Client-side list of registered users with password-gated deletion.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::ports::{GatewayError, UserGateway};
use super::validation::Locale;
use super::{User, UserId};

/// Format a birth date for display as `dd/mm/yyyy`.
///
/// ```
/// use chrono::NaiveDate;
/// use user_registry::domain::user_directory::format_birth_date;
///
/// let date = NaiveDate::from_ymd_opt(1990, 1, 2).expect("date");
/// assert_eq!(format_birth_date(date), "02/01/1990");
/// ```
pub fn format_birth_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Result of a delete request made from the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed(GatewayError),
}

impl DeleteOutcome {
    pub fn notification(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Deleted, Locale::Fr) => "Utilisateur supprimé avec succès",
            (Self::Deleted, Locale::En) => "User deleted successfully",
            (Self::Failed(GatewayError::WrongPassword), Locale::Fr) => "Mot de passe incorrect.",
            (Self::Failed(GatewayError::WrongPassword), Locale::En) => "Wrong password.",
            (Self::Failed(_), Locale::Fr) => "Erreur lors de la suppression de l'utilisateur",
            (Self::Failed(_), Locale::En) => "Error while deleting the user",
        }
    }
}

/// Cached view of the remote user list.
pub struct UserDirectory {
    gateway: Arc<dyn UserGateway>,
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(gateway: Arc<dyn UserGateway>) -> Self {
        Self {
            gateway,
            users: Vec::new(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Reload the list. The previous contents survive a failed reload.
    pub async fn refresh(&mut self) -> Result<&[User], GatewayError> {
        self.users = self.gateway.list_users().await?;
        Ok(&self.users)
    }

    /// Ask the registry to delete `id`, dropping it locally on success.
    pub async fn delete_user(&mut self, id: &UserId, password: &str) -> DeleteOutcome {
        match self.gateway.delete_user(id, password).await {
            Ok(()) => {
                self.users.retain(|user| user.id() != id);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(user_id = %id, error = %err, "delete request failed");
                DeleteOutcome::Failed(err)
            }
        }
    }
}
