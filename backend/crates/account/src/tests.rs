//! Use-case and router tests against in-memory repositories

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use kernel::id::UserId;
    use platform::password::HashingCost;
    use platform::token::TokenConfig;

    use crate::application::config::AccountConfig;
    use crate::domain::entity::{user::User, user_settings::UserSettings};
    use crate::domain::repository::{UserDataCascade, UserRepository, UserSettingsRepository};
    use crate::domain::value_object::email::Email;
    use crate::error::{AccountError, AccountResult};

    #[derive(Clone, Default)]
    pub struct InMemoryAccountRepository {
        pub users: Arc<Mutex<HashMap<UserId, User>>>,
        pub settings: Arc<Mutex<HashMap<UserId, UserSettings>>>,
    }

    impl InMemoryAccountRepository {
        /// Stored row regardless of the tombstone flag
        pub fn raw_user(&self, user_id: &UserId) -> Option<User> {
            self.users.lock().unwrap().get(user_id).cloned()
        }

        pub fn row_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    impl UserRepository for InMemoryAccountRepository {
        async fn create(&self, user: &User) -> AccountResult<()> {
            let mut users = self.users.lock().unwrap();
            if users
                .values()
                .any(|u| !u.is_deleted && u.email == user.email)
            {
                return Err(AccountError::EmailTaken);
            }
            users.insert(user.user_id, user.clone());
            Ok(())
        }

        async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .get(user_id)
                .filter(|u| !u.is_deleted)
                .cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| !u.is_deleted && &u.email == email)
                .cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .any(|u| !u.is_deleted && &u.email == email))
        }

        async fn update(&self, user: &User) -> AccountResult<()> {
            let mut users = self.users.lock().unwrap();
            if let Some(stored) = users.get_mut(&user.user_id).filter(|u| !u.is_deleted) {
                *stored = user.clone();
            }
            Ok(())
        }

        async fn soft_delete(&self, user_id: &UserId) -> AccountResult<bool> {
            let mut users = self.users.lock().unwrap();
            match users.get_mut(user_id).filter(|u| !u.is_deleted) {
                Some(user) => {
                    user.is_deleted = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    impl UserSettingsRepository for InMemoryAccountRepository {
        async fn find_by_user_id(&self, user_id: &UserId) -> AccountResult<Option<UserSettings>> {
            Ok(self.settings.lock().unwrap().get(user_id).cloned())
        }

        async fn upsert(&self, settings: &UserSettings) -> AccountResult<()> {
            self.settings
                .lock()
                .unwrap()
                .insert(settings.user_id, settings.clone());
            Ok(())
        }

        async fn delete_by_user_id(&self, user_id: &UserId) -> AccountResult<u64> {
            Ok(self.settings.lock().unwrap().remove(user_id).map_or(0, |_| 1))
        }
    }

    /// Cascade that only records who was cascaded
    #[derive(Clone, Default)]
    pub struct RecordingCascade {
        pub calls: Arc<Mutex<Vec<UserId>>>,
    }

    impl UserDataCascade for RecordingCascade {
        async fn tombstone_user_data(&self, user_id: &UserId) -> AccountResult<u64> {
            self.calls.lock().unwrap().push(*user_id);
            Ok(0)
        }
    }

    pub fn config() -> AccountConfig {
        AccountConfig::new(HashingCost::minimal(), TokenConfig::with_random_secret()).unwrap()
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::*;
    use crate::domain::value_object::proficiency_level::ProficiencyLevel;
    use crate::error::AccountError;
    use kernel::id::UserId;

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
            level: None,
            native_language: None,
            target_language: None,
            learning_goals: None,
            allow_learning_data_sharing: None,
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_applies_defaults() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let user = RegisterUseCase::new(repo.clone(), Arc::new(config()))
            .execute(register_input(" a@x.io ", "pw1"))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "a@x.io");
        assert_eq!(user.level, ProficiencyLevel::A1);
        assert_eq!(user.native_language.as_str(), "hu");
        assert_eq!(user.target_language.as_str(), "en");
        assert!(user.password_hash.as_phc_string().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let use_case = RegisterUseCase::new(repo.clone(), Arc::new(config()));

        use_case.execute(register_input("a@x.io", "pw1")).await.unwrap();
        let err = use_case
            .execute(register_input("a@x.io", "other"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::EmailTaken));
        assert_eq!(repo.row_count(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let use_case = RegisterUseCase::new(repo.clone(), Arc::new(config()));

        let err = use_case
            .execute(register_input("not-an-email", "pw1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        let err = use_case
            .execute(register_input("a@x.io", "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        let mut input = register_input("a@x.io", "pw1");
        input.native_language = Some("hungarian".to_string());
        assert!(matches!(
            use_case.execute(input).await.unwrap_err(),
            AccountError::Validation(_)
        ));
        assert_eq!(repo.row_count(), 0);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let config = Arc::new(config());
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("a@x.io", "pw1"))
            .await
            .unwrap();

        let login = LoginUseCase::new(repo.clone(), config);
        let wrong_password = login
            .execute(login_input("a@x.io", "nope"))
            .await
            .unwrap_err();
        let unknown_email = login
            .execute(login_input("b@x.io", "pw1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AccountError::InvalidCredentials));
        assert!(matches!(unknown_email, AccountError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_unknown_email_login_costs_a_hash_verification() {
        use std::time::{Duration, Instant};

        use platform::password::HashingCost;
        use platform::token::TokenConfig;

        let cost = HashingCost {
            memory_kib: 8 * 1024,
            iterations: 2,
            parallelism: 1,
        };
        let config = Arc::new(
            crate::application::config::AccountConfig::new(
                cost,
                TokenConfig::with_random_secret(),
            )
            .unwrap(),
        );
        let repo = Arc::new(InMemoryAccountRepository::default());
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("a@x.io", "pw1"))
            .await
            .unwrap();
        let login = LoginUseCase::new(repo.clone(), config);

        async fn fastest(
            login: &LoginUseCase<InMemoryAccountRepository>,
            email: &str,
        ) -> Duration {
            let mut best = Duration::MAX;
            for _ in 0..3 {
                let started = Instant::now();
                let err = login.execute(login_input(email, "nope")).await.unwrap_err();
                assert!(matches!(err, AccountError::InvalidCredentials));
                best = best.min(started.elapsed());
            }
            best
        }

        let wrong_password = fastest(&login, "a@x.io").await;
        let unknown_email = fastest(&login, "b@x.io").await;

        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email took {unknown_email:?}, wrong password took {wrong_password:?}"
        );
    }

    #[tokio::test]
    async fn test_login_records_last_login_and_issues_token() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let config = Arc::new(config());
        let user = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("a@x.io", "pw1"))
            .await
            .unwrap();

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(login_input("a@x.io", "pw1"))
            .await
            .unwrap();

        let claims = config.tokens.verify(&output.access_token).unwrap();
        assert_eq!(claims.subject().unwrap(), user.user_id.into_uuid());
        assert_eq!(claims.email, "a@x.io");
        assert!(repo.raw_user(&user.user_id).unwrap().last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_deleted_user_is_invisible() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let cascade = Arc::new(RecordingCascade::default());
        let config = Arc::new(config());
        let user = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("a@x.io", "pw1"))
            .await
            .unwrap();

        DeleteAccountUseCase::new(repo.clone(), repo.clone(), cascade.clone())
            .execute(&user.user_id)
            .await
            .unwrap();

        // Tombstoned, not removed
        assert!(repo.raw_user(&user.user_id).unwrap().is_deleted);
        assert_eq!(cascade.calls.lock().unwrap().as_slice(), &[user.user_id]);

        let err = GetProfileUseCase::new(repo.clone())
            .execute(&user.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::UserNotFound));

        let err = LoginUseCase::new(repo.clone(), config.clone())
            .execute(login_input("a@x.io", "pw1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));

        // The email is free again
        let again = RegisterUseCase::new(repo.clone(), config)
            .execute(register_input("a@x.io", "pw2"))
            .await
            .unwrap();
        assert_ne!(again.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let cascade = Arc::new(RecordingCascade::default());
        let user = RegisterUseCase::new(repo.clone(), Arc::new(config()))
            .execute(register_input("a@x.io", "pw1"))
            .await
            .unwrap();

        let delete = DeleteAccountUseCase::new(repo.clone(), repo.clone(), cascade.clone());
        delete.execute(&user.user_id).await.unwrap();
        let err = delete.execute(&user.user_id).await.unwrap_err();

        assert!(matches!(err, AccountError::UserNotFound));
        assert_eq!(cascade.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_profile_presence_semantics() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let mut input = register_input("a@x.io", "pw1");
        input.learning_goals = Some("Pass B2".to_string());
        let user = RegisterUseCase::new(repo.clone(), Arc::new(config()))
            .execute(input)
            .await
            .unwrap();

        let edit = EditProfileUseCase::new(repo.clone());

        let updated = edit
            .execute(
                &user.user_id,
                EditProfileInput {
                    target_language: Some("de".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.target_language.as_str(), "de");
        assert_eq!(updated.native_language.as_str(), "hu");
        assert_eq!(updated.learning_goals.as_deref(), Some("Pass B2"));

        let cleared = edit
            .execute(
                &user.user_id,
                EditProfileInput {
                    learning_goals: Some(String::new()),
                    allow_learning_data_sharing: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.learning_goals, None);
        assert!(cleared.allow_learning_data_sharing);
        assert_eq!(cleared.target_language.as_str(), "de");
    }

    #[tokio::test]
    async fn test_edit_unknown_user_is_not_found() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let err = EditProfileUseCase::new(repo)
            .execute(&UserId::new(), EditProfileInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::UserNotFound));
    }

    #[tokio::test]
    async fn test_settings_upsert_and_clear() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let user = RegisterUseCase::new(repo.clone(), Arc::new(config()))
            .execute(register_input("a@x.io", "pw1"))
            .await
            .unwrap();

        let empty = GetSettingsUseCase::new(repo.clone(), repo.clone())
            .execute(&user.user_id)
            .await
            .unwrap();
        assert!(empty.tts_voice.is_none());
        assert!(empty.response_speed.is_none());

        let update = UpdateSettingsUseCase::new(repo.clone(), repo.clone());
        let saved = update
            .execute(
                &user.user_id,
                UpdateSettingsInput {
                    tts_voice: Some("nova".to_string()),
                    response_speed: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.tts_voice.as_deref(), Some("nova"));
        assert_eq!(saved.response_speed.map(|s| s.value()), Some(3));

        let cleared = update
            .execute(
                &user.user_id,
                UpdateSettingsInput {
                    tts_voice: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.tts_voice.is_none());
        assert_eq!(cleared.response_speed.map(|s| s.value()), Some(3));

        let err = update
            .execute(
                &user.user_id,
                UpdateSettingsInput {
                    response_speed: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_settings_row() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let user = RegisterUseCase::new(repo.clone(), Arc::new(config()))
            .execute(register_input("a@x.io", "pw1"))
            .await
            .unwrap();
        UpdateSettingsUseCase::new(repo.clone(), repo.clone())
            .execute(
                &user.user_id,
                UpdateSettingsInput {
                    llm_style: Some("friendly".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        DeleteAccountUseCase::new(
            repo.clone(),
            repo.clone(),
            Arc::new(RecordingCascade::default()),
        )
        .execute(&user.user_id)
        .await
        .unwrap();

        assert!(repo.settings.lock().unwrap().is_empty());
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::presentation::router::account_router_generic;

    fn router() -> Router {
        account_router_generic(
            InMemoryAccountRepository::default(),
            RecordingCascade::default(),
            config(),
        )
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_register_login_me_delete_flow() {
        let router = router();

        let (status, user) = send(
            &router,
            "POST",
            "/register",
            None,
            Some(json!({ "email": "a@x.io", "password": "pw1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["email"], "a@x.io");
        assert_eq!(user["nativeLanguage"], "hu");
        assert!(user.get("passwordHash").is_none());

        let (status, login) = send(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "a@x.io", "password": "pw1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(login["expiresAt"].is_string());
        let token = login["accessToken"].as_str().unwrap().to_string();

        let (status, me) = send(&router, "GET", "/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["id"], user["id"]);

        let (status, _) = send(&router, "DELETE", "/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, problem) = send(&router, "GET", "/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(problem["status"], 404);
    }

    #[tokio::test]
    async fn test_duplicate_register_is_409() {
        let router = router();
        let body = json!({ "email": "a@x.io", "password": "pw1" });

        let (status, _) = send(&router, "POST", "/register", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, problem) = send(&router, "POST", "/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(problem["title"], "Conflict");
    }

    #[tokio::test]
    async fn test_login_failure_bodies_match() {
        let router = router();
        send(
            &router,
            "POST",
            "/register",
            None,
            Some(json!({ "email": "a@x.io", "password": "pw1" })),
        )
        .await;

        let wrong_password = send(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "a@x.io", "password": "bad" })),
        )
        .await;
        let unknown_email = send(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "nobody@x.io", "password": "pw1" })),
        )
        .await;

        assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password, unknown_email);
    }

    #[tokio::test]
    async fn test_me_requires_bearer() {
        let router = router();
        let (status, _) = send(&router, "GET", "/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&router, "GET", "/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_edit_me_and_settings() {
        let router = router();
        send(
            &router,
            "POST",
            "/register",
            None,
            Some(json!({ "email": "a@x.io", "password": "pw1", "level": "B1" })),
        )
        .await;
        let (_, login) = send(
            &router,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "a@x.io", "password": "pw1" })),
        )
        .await;
        let token = login["accessToken"].as_str().unwrap().to_string();

        let (status, me) = send(
            &router,
            "PUT",
            "/me",
            Some(&token),
            Some(json!({ "targetLanguage": "de" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["targetLanguage"], "de");
        assert_eq!(me["level"], "B1");

        let (status, settings) = send(
            &router,
            "PUT",
            "/me/settings",
            Some(&token),
            Some(json!({ "ttsVoice": "nova", "responseSpeed": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settings["ttsVoice"], "nova");

        let (status, settings) = send(&router, "GET", "/me/settings", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settings["responseSpeed"], 2);
    }
}
