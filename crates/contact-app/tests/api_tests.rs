//! Integration tests for the contact app pages and workflows.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
};
use contact_app::{
    api::{
        create_app, create_router_with_public_dir, with_method_override, App, AppState,
        MSG_ADDED, MSG_DELETED, MSG_UPDATED,
    },
    validation::{MSG_EMAIL_INVALID, MSG_NAME_TAKEN, MSG_PHONE_INVALID},
    Views,
};
use contact_store::{ContactFields, ContactStore, DocumentStore};
use session_store::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct TestApp {
    app: App,
    store: Arc<DocumentStore>,
}

/// Create a test app with memory-only storage.
fn create_test_app() -> TestApp {
    let store = Arc::new(DocumentStore::memory());
    let sessions = SessionStore::new(Duration::from_secs(60));
    let state = AppState::new(store.clone(), sessions, Views::new().unwrap());

    TestApp {
        app: create_app(state),
        store,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn submit(&self, method: &str, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn seed(&self, name: &str, phone: &str, email: &str) -> String {
        self.store
            .insert(ContactFields::new(name, phone, email))
            .await
            .unwrap()
            .id
    }
}

async fn body_string(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// `name=value` of the session cookie set by a response.
fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn assert_redirect_to_list(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/contact");
}

#[tokio::test]
async fn test_static_pages() {
    let t = create_test_app();

    let response = t.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("<title>Halaman Index</title>"));

    let response = t.get("/about", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("<title>Halaman About</title>"));
}

#[tokio::test]
async fn test_list_empty() {
    let t = create_test_app();

    let response = t.get("/contact", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Data kontak masih kosong!"));
}

#[tokio::test]
async fn test_add_form() {
    let t = create_test_app();

    let response = t.get("/contact/add", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("<title>Halaman Tambah Kontak</title>"));
    assert!(body.contains("name=\"nohp\""));
}

#[tokio::test]
async fn test_add_redirects_and_flashes_once() {
    let t = create_test_app();

    let response = t
        .submit(
            "POST",
            "/contact",
            "nama=Ana&nohp=081234567890&email=ana%40example.com",
            None,
        )
        .await;
    assert_redirect_to_list(&response);
    let cookie = session_cookie(&response).expect("session cookie");
    assert!(cookie.starts_with("contact_sid="));

    let body = body_string(t.get("/contact", Some(&cookie)).await).await;
    assert!(body.contains("Ana"));
    assert_eq!(body.matches(MSG_ADDED).count(), 1);

    let body = body_string(t.get("/contact", Some(&cookie)).await).await;
    assert!(body.contains("Ana"));
    assert!(!body.contains(MSG_ADDED));

    assert_eq!(t.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_flash_not_shown_to_other_clients() {
    let t = create_test_app();

    let response = t
        .submit("POST", "/contact", "nama=Ana&nohp=081234567890&email=ana@example.com", None)
        .await;
    assert_redirect_to_list(&response);

    let body = body_string(t.get("/contact", None).await).await;
    assert!(body.contains("Ana"));
    assert!(!body.contains(MSG_ADDED));
}

#[tokio::test]
async fn test_existing_session_cookie_is_reused() {
    let t = create_test_app();

    let first = t
        .submit("POST", "/contact", "nama=Ana&nohp=081234567890&email=ana@example.com", None)
        .await;
    let cookie = session_cookie(&first).unwrap();

    let second = t
        .submit(
            "POST",
            "/contact",
            "nama=Budi&nohp=085712345678&email=budi@example.com",
            Some(&cookie),
        )
        .await;
    assert_redirect_to_list(&second);
    assert!(second.headers().get(header::SET_COOKIE).is_none());

    let body = body_string(t.get("/contact", Some(&cookie)).await).await;
    assert_eq!(body.matches(MSG_ADDED).count(), 2);
}

#[tokio::test]
async fn test_add_duplicate_name_rejected() {
    let t = create_test_app();
    t.seed("Ana", "081234567890", "ana@example.com").await;

    let response = t
        .submit("POST", "/contact", "nama=Ana&nohp=085712345678&email=other@example.com", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = body_string(response).await;
    assert!(body.contains(MSG_NAME_TAKEN));
    assert!(body.contains("<title>Form tambah data kontak</title>"));

    assert_eq!(t.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_reports_every_error_together() {
    let t = create_test_app();
    t.seed("Ana", "081234567890", "ana@example.com").await;

    let response = t
        .submit("POST", "/contact", "nama=Ana&nohp=12345&email=not-an-email", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(MSG_NAME_TAKEN));
    assert!(body.contains(MSG_PHONE_INVALID));
    assert!(body.contains(MSG_EMAIL_INVALID));
    // Add form does not echo rejected values
    assert!(!body.contains("not-an-email"));

    assert_eq!(t.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_format_errors_without_duplicate() {
    let t = create_test_app();

    let response = t
        .submit("POST", "/contact", "nama=Ana&nohp=0812&email=ana@example.com", None)
        .await;
    let body = body_string(response).await;

    assert!(body.contains(MSG_PHONE_INVALID));
    assert!(!body.contains(MSG_NAME_TAKEN));
    assert!(!body.contains(MSG_EMAIL_INVALID));
    assert_eq!(t.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_detail_page() {
    let t = create_test_app();
    t.seed("Ana Maria", "081234567890", "ana@example.com").await;

    let response = t.get("/contact/Ana%20Maria", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("<title>Halaman Detail Contact</title>"));
    assert!(body.contains("Ana Maria"));
    assert!(body.contains("081234567890"));
    assert!(body.contains("ana@example.com"));
}

#[tokio::test]
async fn test_list_links_reach_awkward_names() {
    let t = create_test_app();
    t.seed("a/b", "081234567890", "ab@example.com").await;
    t.seed("add", "085712345678", "add@example.com").await;
    t.seed("edit/Budi", "081398765432", "eb@example.com").await;

    let list = body_string(t.get("/contact", None).await).await;

    for (name, link) in [
        ("a/b", "/contact/a%2Fb"),
        ("add", "/contact/%61%64%64"),
        ("edit/Budi", "/contact/edit%2FBudi"),
    ] {
        assert!(list.contains(&format!("href=\"{}\"", link)), "no link for {}", name);

        let response = t.get(link, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", link);

        let body = body_string(response).await;
        assert!(body.contains("<title>Halaman Detail Contact</title>"), "{}", link);
        assert!(body.contains(&format!("/contact/edit{}", &link["/contact".len()..])));
    }

    let response = t.get("/contact/edit/a%2Fb", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("ab@example.com"));
}

#[tokio::test]
async fn test_detail_not_found() {
    let t = create_test_app();

    let response = t.get("/contact/Nobody", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Nobody"));
}

#[tokio::test]
async fn test_edit_form_prefilled() {
    let t = create_test_app();
    let id = t.seed("Ana", "081234567890", "ana@example.com").await;

    let response = t.get("/contact/edit/Ana", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(&format!("name=\"_id\" value=\"{}\"", id)));
    assert!(body.contains("name=\"oldNama\" value=\"Ana\""));
    assert!(body.contains("value=\"081234567890\""));
    assert!(body.contains("action=\"/contact?_method=PUT\""));
}

#[tokio::test]
async fn test_edit_form_not_found() {
    let t = create_test_app();

    let response = t.get("/contact/edit/Nobody", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_keeping_own_name() {
    let t = create_test_app();
    let id = t.seed("Ana", "081234567890", "ana@example.com").await;

    let body = format!(
        "_id={}&oldNama=Ana&nama=Ana&nohp=085712345678&email=ana.new@example.com",
        id
    );
    let response = t.submit("POST", "/contact?_method=PUT", &body, None).await;
    assert_redirect_to_list(&response);
    let cookie = session_cookie(&response).unwrap();

    let contact = t.store.find_by_name("Ana").await.unwrap().unwrap();
    assert_eq!(contact.id, id);
    assert_eq!(contact.phone, "085712345678");
    assert_eq!(contact.email, "ana.new@example.com");

    let body = body_string(t.get("/contact", Some(&cookie)).await).await;
    assert!(body.contains(MSG_UPDATED));
}

#[tokio::test]
async fn test_update_unknown_id_still_reports_success() {
    let t = create_test_app();

    let response = t
        .submit(
            "POST",
            "/contact?_method=PUT",
            "_id=missing&oldNama=Ana&nama=Ana&nohp=081234567890&email=ana@example.com",
            None,
        )
        .await;
    assert_redirect_to_list(&response);
    let cookie = session_cookie(&response).unwrap();

    let body = body_string(t.get("/contact", Some(&cookie)).await).await;
    assert!(body.contains(MSG_UPDATED));
    assert!(body.contains("Data kontak masih kosong!"));
    assert_eq!(t.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_rename() {
    let t = create_test_app();
    let id = t.seed("Ana", "081234567890", "ana@example.com").await;

    let body = format!(
        "_id={}&oldNama=Ana&nama=Ana+Maria&nohp=081234567890&email=ana@example.com",
        id
    );
    let response = t.submit("PUT", "/contact", &body, None).await;
    assert_redirect_to_list(&response);

    assert!(t.store.find_by_name("Ana").await.unwrap().is_none());
    assert_eq!(
        t.store.find_by_name("Ana Maria").await.unwrap().unwrap().id,
        id
    );
}

#[tokio::test]
async fn test_update_to_existing_name_rejected() {
    let t = create_test_app();
    let id = t.seed("Ana", "081234567890", "ana@example.com").await;
    t.seed("Budi", "085712345678", "budi@example.com").await;

    let body = format!(
        "_id={}&oldNama=Ana&nama=Budi&nohp=081299998888&email=ana@example.com",
        id
    );
    let response = t.submit("POST", "/contact?_method=PUT", &body, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(MSG_NAME_TAKEN));
    assert!(body.contains("<title>Form ubah data kontak</title>"));
    // Edit form echoes the submitted values
    assert!(body.contains("value=\"081299998888\""));
    assert!(body.contains("name=\"oldNama\" value=\"Ana\""));

    let ana = t.store.find_by_name("Ana").await.unwrap().unwrap();
    assert_eq!(ana.phone, "081234567890");
}

#[tokio::test]
async fn test_delete_contact() {
    let t = create_test_app();
    t.seed("Ana", "081234567890", "ana@example.com").await;
    t.seed("Budi", "085712345678", "budi@example.com").await;

    let response = t
        .submit("POST", "/contact?_method=DELETE", "nama=Ana", None)
        .await;
    assert_redirect_to_list(&response);
    let cookie = session_cookie(&response).unwrap();

    let body = body_string(t.get("/contact", Some(&cookie)).await).await;
    assert!(body.contains(MSG_DELETED));
    assert!(body.contains("Budi"));
    assert!(!body.contains("/contact/Ana\""));
    assert_eq!(t.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_missing_name_still_reports_success() {
    let t = create_test_app();
    t.seed("Ana", "081234567890", "ana@example.com").await;

    let response = t.submit("DELETE", "/contact", "nama=Nobody", None).await;
    assert_redirect_to_list(&response);
    let cookie = session_cookie(&response).unwrap();

    let body = body_string(t.get("/contact", Some(&cookie)).await).await;
    assert!(body.contains(MSG_DELETED));
    assert_eq!(t.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let t = create_test_app();

    let response = t.get("/nowhere", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Halaman tidak ditemukan."));
}

#[tokio::test]
async fn test_health_endpoint() {
    let t = create_test_app();
    t.seed("Ana", "081234567890", "ana@example.com").await;

    let response = t.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["contacts"], 1);
    assert_eq!(json["sessions"], 0);
}

#[tokio::test]
async fn test_public_assets_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("css")).unwrap();
    std::fs::write(dir.path().join("css/style.css"), "body { margin: 0; }").unwrap();

    let state = AppState::new(
        Arc::new(DocumentStore::memory()),
        SessionStore::new(Duration::from_secs(60)),
        Views::new().unwrap(),
    );
    let app = with_method_override(create_router_with_public_dir(state, dir.path()));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/public/css/style.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/css"));
    assert_eq!(body_string(response).await, "body { margin: 0; }");

    let response = app
        .oneshot(Request::builder().uri("/public/missing.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
