//! Login, signup and logout

use std::sync::Arc;

use super::{Route, ViewError};
use crate::client::{LoginRequest, RegisterRequest, TaskApi};
use crate::session::{Locale, Preferences, Session, SessionStore, Storage};
use crate::validation::{LoginForm, SignupForm};

pub struct AuthView {
    api: Arc<dyn TaskApi>,
    session: SessionStore,
    preferences: Preferences,
}

impl AuthView {
    pub fn new(api: Arc<dyn TaskApi>, session: SessionStore) -> Self {
        let preferences = Preferences::new(Arc::clone(session.storage()));
        Self {
            api,
            session,
            preferences,
        }
    }

    /// Entering the login screen signs out and resets the language
    pub fn open_login(&self) -> Result<(), ViewError> {
        self.session.clear()?;
        self.preferences.set_locale(Locale::En)?;
        Ok(())
    }

    /// Entering the signup screen wipes every stored key, preferences included
    pub fn open_signup(&self) -> Result<(), ViewError> {
        self.session.storage().clear()?;
        self.preferences.set_locale(Locale::En)?;
        Ok(())
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Route, ViewError> {
        form.validate()?;

        let request = LoginRequest {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        let response = self.api.login(&request).await.map_err(|e| {
            tracing::warn!(email = %request.email, error = %e, "Login failed");
            e
        })?;

        self.session.save(&Session::from(response))?;
        Ok(Route::Dashboard)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Route, ViewError> {
        form.validate()?;

        let request = RegisterRequest {
            full_name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        let response = self.api.register(&request).await?;
        tracing::info!(email = %request.email, "Account created");

        self.session.save(&Session::from(response))?;
        Ok(Route::Dashboard)
    }

    pub fn logout(&self) -> Result<Route, ViewError> {
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Theme, KEY_COLOR_THEME, KEY_LOCALE};
    use crate::validation::ValidationError;
    use crate::views::testing::{memory_session, FakeApi, FAKE_TOKEN, WRONG_PASSWORD};

    fn signup_form() -> SignupForm {
        SignupForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@gmail.com".to_string(),
            password: "Secret1!".to_string(),
            confirm_password: "Secret1!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let (_, session) = memory_session();
        let view = AuthView::new(Arc::new(FakeApi::default()), session.clone());

        let route = view
            .login(&LoginForm {
                email: " ada@gmail.com ".to_string(),
                password: "Secret1!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(route, Route::Dashboard);
        assert_eq!(session.token().as_deref(), Some(FAKE_TOKEN));
        assert_eq!(session.user().unwrap().email, "ada@gmail.com");
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_store_alone() {
        let (_, session) = memory_session();
        let view = AuthView::new(Arc::new(FakeApi::default()), session.clone());

        let err = view
            .login(&LoginForm {
                email: "ada@gmail.com".to_string(),
                password: WRONG_PASSWORD.to_string(),
            })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Incorrect email or password"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_validation_order() {
        let (_, session) = memory_session();
        let view = AuthView::new(Arc::new(FakeApi::default()), session);

        let mut form = signup_form();
        form.email = "ada@example.com".to_string();
        form.confirm_password = "different".to_string();
        assert!(matches!(
            view.signup(&form).await,
            Err(ViewError::Validation(ValidationError::EmailDomain))
        ));

        let mut form = signup_form();
        form.password = "weak".to_string();
        form.confirm_password = "weaker".to_string();
        assert!(matches!(
            view.signup(&form).await,
            Err(ViewError::Validation(ValidationError::PasswordMismatch))
        ));

        let mut form = signup_form();
        form.password = "weak".to_string();
        form.confirm_password = "weak".to_string();
        assert!(matches!(
            view.signup(&form).await,
            Err(ViewError::Validation(ValidationError::WeakPassword))
        ));
    }

    #[tokio::test]
    async fn test_signup_stores_session() {
        let (_, session) = memory_session();
        let view = AuthView::new(Arc::new(FakeApi::default()), session.clone());

        assert_eq!(view.signup(&signup_form()).await.unwrap(), Route::Dashboard);
        assert_eq!(session.user().unwrap().full_name, "Ada Lovelace");
    }

    #[test]
    fn test_open_login_keeps_theme() {
        let (storage, session) = memory_session();
        storage.set_item(KEY_COLOR_THEME, Theme::ProLight.as_str()).unwrap();
        storage.set_item(KEY_LOCALE, "hi").unwrap();
        storage.set_item("token", "old").unwrap();

        let view = AuthView::new(Arc::new(FakeApi::default()), session.clone());
        view.open_login().unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(storage.get_item(KEY_LOCALE).as_deref(), Some("en"));
        assert_eq!(
            storage.get_item(KEY_COLOR_THEME).as_deref(),
            Some("pro-light")
        );
    }

    #[test]
    fn test_open_signup_clears_everything() {
        let (storage, session) = memory_session();
        storage.set_item(KEY_COLOR_THEME, "pro-light").unwrap();
        storage.set_item("token", "old").unwrap();

        let view = AuthView::new(Arc::new(FakeApi::default()), session);
        view.open_signup().unwrap();

        assert_eq!(storage.get_item(KEY_COLOR_THEME), None);
        assert_eq!(storage.get_item("token"), None);
        assert_eq!(storage.get_item(KEY_LOCALE).as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_logout() {
        let (_, session) = memory_session();
        let view = AuthView::new(Arc::new(FakeApi::default()), session.clone());
        view.signup(&signup_form()).await.unwrap();

        assert_eq!(view.logout().unwrap(), Route::Login);
        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
    }
}
