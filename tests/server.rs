#[cfg(test)]
mod tests {
    use heures::api::{ApiClient, Session, SessionStore};
    use heures::db::db::Db;
    use heures::db::users::User;
    use heures::libs::categories::DEFAULT_CATEGORIES;
    use heures::libs::data_storage::DataStorage;
    use heures::libs::entry::WorkEntry;
    use heures::libs::period::PeriodKind;
    use heures::server::{self, AppState, ServerSettings};
    use reqwest::StatusCode;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Backend bound to an ephemeral port, backed by a throwaway database.
    struct ServerTestContext {
        temp_dir: TempDir,
        base_url: String,
        server: JoinHandle<()>,
    }

    impl AsyncTestContext for ServerTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("heures.db")).unwrap();
            let state = AppState::new(db, ServerSettings::default());

            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let base_url = format!("http://{}", listener.local_addr().unwrap());
            let server = tokio::spawn(async move {
                let _ = server::serve(listener, state).await;
            });

            ServerTestContext { temp_dir, base_url, server }
        }

        async fn teardown(self) {
            self.server.abort();
        }
    }

    impl ServerTestContext {
        fn anonymous(&self) -> ApiClient {
            ApiClient::new(&self.base_url)
        }

        /// Signs up `email` and returns the account with an authenticated client.
        async fn register(&self, email: &str) -> (User, ApiClient) {
            let auth = self.anonymous().signup("Ada", "Lovelace", email, "secret1").await.unwrap();
            (auth.user, self.anonymous().with_token(auth.token))
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }
    }

    fn scenario_entry(user_id: &str) -> WorkEntry {
        WorkEntry::new(user_id, "2025-01-10", "09:00", "2025-01-10", "17:00")
            .with_break("12", "00", "13", "00")
            .with_rate(50.0)
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_health(ctx: &mut ServerTestContext) {
        let health = ctx.anonymous().health().await.unwrap();
        assert_eq!(health["ok"], true);
        assert_eq!(health["service"], "heures-backend");
        assert_eq!(health["database"], "SQLite");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_signup_login_and_me(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("Ada@Example.com").await;
        assert_eq!(user.email, "ada@example.com");

        let me = client.me().await.unwrap();
        assert_eq!(me, user);

        let login = ctx.anonymous().login("ada@example.com", "secret1").await.unwrap();
        assert_eq!(login.user.id, user.id);
        assert_ne!(Some(login.token.as_str()), client.token());

        let error = ctx.anonymous().login("ada@example.com", "wrong-password").await.unwrap_err();
        assert!(error.to_string().contains("Invalid credentials"));

        let error = ctx
            .anonymous()
            .signup("Ada", "Lovelace", "ada@example.com", "secret1")
            .await
            .unwrap_err();
        assert!(error.to_string().contains("Email already registered"));
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_signup_status_and_validation(ctx: &mut ServerTestContext) {
        let http = reqwest::Client::new();

        let res = http
            .post(ctx.url("/auth/signup"))
            .json(&json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "password": "secret1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = http
            .post(ctx.url("/auth/signup"))
            .json(&json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "grace@example.com", "password": "123" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["field"], "password");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_requests_without_token_are_rejected(ctx: &mut ServerTestContext) {
        let http = reqwest::Client::new();

        let res = http.get(ctx.url("/work-entries")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = http.get(ctx.url("/users/me")).bearer_auth("forged").send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_entry_crud(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;

        let created = client.create_entry(&scenario_entry(&user.id)).await.unwrap();
        assert_eq!(created.duration_hours, 7.0);
        assert_eq!(created.entry.user_id, user.id);

        let listed = client.list_entries().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].entry.id, created.entry.id);

        let updated = client
            .update_entry(&created.entry.id, &json!({ "endTime": "18:00" }))
            .await
            .unwrap();
        assert_eq!(updated.duration_hours, 8.0);

        client.delete_entry(&created.entry.id).await.unwrap();
        assert!(client.list_entries().await.unwrap().is_empty());
        assert!(client.delete_entry(&created.entry.id).await.is_err());
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_invalid_entry_names_the_field(ctx: &mut ServerTestContext) {
        let (_, client) = ctx.register("ada@example.com").await;
        let http = reqwest::Client::new();

        let res = http
            .post(ctx.url("/work-entries"))
            .bearer_auth(client.token().unwrap())
            .json(&json!({ "startDate": "2025-01-10", "startTime": "09:00", "endDate": "2025-01-10" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["field"], "endTime");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_foreign_entries_are_forbidden(ctx: &mut ServerTestContext) {
        let (ada, ada_client) = ctx.register("ada@example.com").await;
        let (_, grace_client) = ctx.register("grace@example.com").await;
        let http = reqwest::Client::new();

        let created = ada_client.create_entry(&scenario_entry(&ada.id)).await.unwrap();

        let res = http
            .get(ctx.url(&format!("/work-entries/{}", created.entry.id)))
            .bearer_auth(grace_client.token().unwrap())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = http
            .get(ctx.url("/work-entries/e_missing"))
            .bearer_auth(grace_client.token().unwrap())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        // creating on behalf of someone else
        let res = http
            .post(ctx.url("/work-entries"))
            .bearer_auth(grace_client.token().unwrap())
            .json(&scenario_entry(&ada.id))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        assert!(grace_client.list_entries().await.unwrap().is_empty());
        assert!(grace_client.delete_entry(&created.entry.id).await.is_err());
        assert_eq!(ada_client.list_entries().await.unwrap().len(), 1);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_invoice_preview(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;
        client.create_entry(&scenario_entry(&user.id)).await.unwrap();
        client
            .create_entry(&WorkEntry::new(&user.id, "2025-02-03", "09:00", "2025-02-03", "10:00").with_rate(50.0))
            .await
            .unwrap();

        let preview = client.invoice_preview(Some("2025-01-01"), Some("2025-01-31"), None).await.unwrap();
        assert_eq!(preview.user_id, user.id);
        assert_eq!(preview.invoice.lines.len(), 1);
        assert_eq!(preview.invoice.total_hours, 7.0);
        assert_eq!(preview.invoice.total_amount, 350.0);
        assert_eq!(preview.invoice.from.as_deref(), Some("2025-01-01"));

        let preview = client.invoice_preview(None, None, Some(80.0)).await.unwrap();
        assert_eq!(preview.invoice.lines.len(), 2);
        assert_eq!(preview.invoice.total_amount, 640.0);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_summary(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;
        client
            .create_entry(&WorkEntry::new(&user.id, "2025-01-10", "08:00", "2025-01-10", "12:00").with_rate(40.0))
            .await
            .unwrap();
        client
            .create_entry(
                &WorkEntry::new(&user.id, "2025-01-10", "13:00", "2025-01-10", "15:00")
                    .with_rate(60.0)
                    .with_category("Formation"),
            )
            .await
            .unwrap();

        let response = client
            .summary(Some(PeriodKind::Month), Some("2025-01-20"), None, None, None)
            .await
            .unwrap();
        assert_eq!(response.from.as_deref(), Some("2025-01-01"));
        assert_eq!(response.to.as_deref(), Some("2025-01-31"));
        assert_eq!(response.summary.total_hours, 6.0);
        assert_eq!(response.summary.total_amount, 280.0);
        assert_eq!(response.summary.by_category[0].category, "Standard");

        let response = client
            .summary(Some(PeriodKind::Custom), None, Some("2025-02-01"), None, None)
            .await
            .unwrap();
        assert_eq!(response.summary.total_hours, 0.0);
        assert_eq!(response.summary.unique_days, 0);

        assert!(client.summary(None, Some("20/01/2025"), None, None, None).await.is_err());
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_malformed_period_bounds_are_rejected(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;
        client.create_entry(&scenario_entry(&user.id)).await.unwrap();
        let token = client.token().unwrap().to_string();
        let http = reqwest::Client::new();

        let res = http
            .post(ctx.url("/invoice-preview"))
            .bearer_auth(&token)
            .json(&json!({ "from": "2025-1-5", "to": "2025-1-31" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["field"], "from");

        let res = http
            .post(ctx.url("/invoice-preview"))
            .bearer_auth(&token)
            .json(&json!({ "from": "2025-01-05", "to": "31/01/2025" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["field"], "to");

        let res = http
            .get(ctx.url("/summary?from=2025-1-5"))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["field"], "from");

        // blank bounds still mean unbounded
        let res = http
            .post(ctx.url("/invoice-preview"))
            .bearer_auth(&token)
            .json(&json!({ "from": " ", "to": "" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["lines"].as_array().unwrap().len(), 1);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_invoice_rate_accepts_numeric_strings(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;
        client.create_entry(&scenario_entry(&user.id)).await.unwrap();
        let http = reqwest::Client::new();

        let res = http
            .post(ctx.url("/invoice-preview"))
            .bearer_auth(client.token().unwrap())
            .json(&json!({ "hourlyRate": "80" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["totalAmount"].as_f64(), Some(560.0));
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_entry_patch_null_clears_fields(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;
        let created = client.create_entry(&scenario_entry(&user.id).with_category("Formation")).await.unwrap();
        let http = reqwest::Client::new();

        let res = http
            .put(ctx.url(&format!("/work-entries/{}", created.entry.id)))
            .bearer_auth(client.token().unwrap())
            .json(&json!({ "hourlyRate": null, "category": null }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert!(body["hourlyRate"].is_null());
        assert!(body["category"].is_null());
        assert_eq!(body["startTime"], "09:00");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_client_rate_reaches_invoice(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;
        let acme = client
            .create_client(&json!({ "name": "ACME", "type": "client", "defaultRate": 60 }))
            .await
            .unwrap();

        let mut entry = WorkEntry::new(&user.id, "2025-01-10", "09:00", "2025-01-10", "11:00");
        entry.client_id = Some(acme.id.clone());
        client.create_entry(&entry).await.unwrap();

        let preview = client.invoice_preview(None, None, None).await.unwrap();
        assert_eq!(preview.invoice.lines[0].rate, 60.0);
        assert_eq!(preview.invoice.total_amount, 120.0);
        assert_eq!(client.list_clients().await.unwrap().len(), 1);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_categories(ctx: &mut ServerTestContext) {
        let (_, client) = ctx.register("ada@example.com").await;
        let token = client.token().unwrap().to_string();
        let http = reqwest::Client::new();

        assert_eq!(client.list_categories().await.unwrap().len(), DEFAULT_CATEGORIES.len());

        let res = http
            .post(ctx.url("/categories"))
            .bearer_auth(&token)
            .json(&json!({ "name": "Audit" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let listed: Vec<String> = res.json().await.unwrap();
        assert_eq!(listed.last().map(String::as_str), Some("Audit"));

        let res = http
            .post(ctx.url("/categories"))
            .bearer_auth(&token)
            .json(&json!({ "name": "Audit" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = http.delete(ctx.url("/categories/Standard")).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = http.delete(ctx.url("/categories/Audit")).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = http.delete(ctx.url("/categories/Audit")).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_logout_revokes_token(ctx: &mut ServerTestContext) {
        let (_, client) = ctx.register("ada@example.com").await;

        client.logout().await.unwrap();
        assert!(client.me().await.is_err());
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_session_store_round_trip(ctx: &mut ServerTestContext) {
        let (user, client) = ctx.register("ada@example.com").await;
        let store = SessionStore::at(DataStorage::at(ctx.temp_dir.path().join("data")));

        assert!(store.read().unwrap().is_none());

        let session = Session {
            base_url: ctx.base_url.clone(),
            token: client.token().unwrap().to_string(),
            user,
        };
        store.write(&session).unwrap();
        assert_eq!(store.read().unwrap(), Some(session.clone()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.path().unwrap()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        let restored = ApiClient::new(&session.base_url).with_session(store.read().unwrap());
        assert_eq!(restored.me().await.unwrap().id, session.user.id);

        assert!(store.delete().unwrap());
        assert!(!store.delete().unwrap());
        assert!(store.read().unwrap().is_none());
    }
}
