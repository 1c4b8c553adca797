use actix_web::{
    cookie::Cookie,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::Value;
use std::sync::Arc;
use web_service::config::ServerConfig;
use web_service::dto::{ListFormDTO, ListPageDTO, ListsPageDTO};
use web_service::middleware::{SessionMiddleware, TracingMiddleware};
use web_service::server::{app_config, AppState};
use web_service::services::FlashKind;

const COOKIE: &str = "list_session";

async fn create_test_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let config = ServerConfig::default();
    let state = web::Data::new(AppState::new(&config));
    test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware::new(
                Arc::clone(&state.sessions),
                &config.cookie_name,
            ))
            .wrap(TracingMiddleware)
            .configure(app_config),
    )
    .await
}

fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == COOKIE)
        .map(|c| c.into_owned())
}

fn location(resp: &ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn start_session<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::get().uri("/lists").to_request();
    let resp = test::call_service(app, req).await;
    session_cookie(&resp).expect("first request should issue a session cookie")
}

async fn post_form<S>(
    app: &S,
    cookie: &Cookie<'static>,
    uri: &str,
    form: &[(&str, &str)],
) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_form(form)
        .to_request();
    test::call_service(app, req).await
}

async fn get_json<S, T>(app: &S, cookie: &Cookie<'static>, uri: &str) -> T
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    T: serde::de::DeserializeOwned,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "GET {}", uri);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_root_redirects_to_lists() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists");
}

#[actix_web::test]
async fn test_session_cookie_issued_once() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;
    assert_eq!(cookie.http_only(), Some(true));

    let req = test::TestRequest::get()
        .uri("/lists")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(session_cookie(&resp).is_none());
}

#[actix_web::test]
async fn test_create_list_redirects_with_flash() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;

    let resp = post_form(&app, &cookie, "/lists", &[("list_name", "  Groceries ")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists");

    let page: ListsPageDTO = get_json(&app, &cookie, "/lists").await;
    assert_eq!(page.lists.len(), 1);
    assert_eq!(page.lists[0].name, "Groceries");
    assert_eq!(page.lists[0].id, 0);
    let flash = page.flash.expect("flash after create");
    assert_eq!(flash.kind, FlashKind::Success);
    assert_eq!(flash.message, "The list has been created.");

    // Flash is shown once
    let page: ListsPageDTO = get_json(&app, &cookie, "/lists").await;
    assert!(page.flash.is_none());
}

#[actix_web::test]
async fn test_create_list_validation_preserves_input() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;

    let resp = post_form(&app, &cookie, "/lists", &[("list_name", "   ")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"]["message"],
        "List name must be between 1 and 200 characters"
    );
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["list_name"], "   ");

    let long = "x".repeat(201);
    let resp = post_form(&app, &cookie, "/lists", &[("list_name", long.as_str())]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Missing field is treated as an empty name
    let resp = post_form(&app, &cookie, "/lists", &[]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let page: ListsPageDTO = get_json(&app, &cookie, "/lists").await;
    assert!(page.lists.is_empty());
}

#[actix_web::test]
async fn test_duplicate_list_name_rejected() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;

    post_form(&app, &cookie, "/lists", &[("list_name", "A")]).await;
    let resp = post_form(&app, &cookie, "/lists", &[("list_name", "A")]).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "List name must be unique.");
    assert_eq!(body["list_name"], "A");
}

#[actix_web::test]
async fn test_sessions_do_not_share_lists() {
    let app = create_test_app().await;
    let alice = start_session(&app).await;
    let bob = start_session(&app).await;
    assert_ne!(alice.value(), bob.value());

    post_form(&app, &alice, "/lists", &[("list_name", "Groceries")]).await;
    let resp = post_form(&app, &bob, "/lists", &[("list_name", "Groceries")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let page: ListsPageDTO = get_json(&app, &alice, "/lists").await;
    assert_eq!(page.lists.len(), 1);
    let page: ListsPageDTO = get_json(&app, &bob, "/lists").await;
    assert_eq!(page.lists.len(), 1);
}

#[actix_web::test]
async fn test_unknown_session_cookie_is_replaced() {
    let app = create_test_app().await;
    let forged = Cookie::new(COOKIE, "not-a-session");

    let req = test::TestRequest::get()
        .uri("/lists")
        .cookie(forged)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let issued = session_cookie(&resp).expect("replacement cookie");
    assert_ne!(issued.value(), "not-a-session");
}

#[actix_web::test]
async fn test_todos_display_incomplete_first() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;
    post_form(&app, &cookie, "/lists", &[("list_name", "Today")]).await;

    for name in ["Buy", "Wash", "Cook"] {
        let resp = post_form(&app, &cookie, "/lists/0/todos", &[("todo", name)]).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/lists/0");
    }

    let resp = post_form(&app, &cookie, "/lists/0/todos/1", &[("completed", "true")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let page: ListPageDTO = get_json(&app, &cookie, "/lists/0").await;
    let order: Vec<_> = page.todos.iter().map(|t| (t.name.as_str(), t.id)).collect();
    assert_eq!(order, vec![("Buy", 0), ("Cook", 2), ("Wash", 1)]);
    assert_eq!(page.item_count, 3);
    assert_eq!(page.remaining_count, 2);
    assert!(!page.is_complete);
    assert_eq!(
        page.flash.map(|f| f.message),
        Some("The todo has been updated.".to_string())
    );

    // Anything other than "true" clears the flag
    post_form(&app, &cookie, "/lists/0/todos/1", &[("completed", "false")]).await;
    let page: ListPageDTO = get_json(&app, &cookie, "/lists/0").await;
    assert_eq!(page.remaining_count, 3);
}

#[actix_web::test]
async fn test_repeated_todo_names_allowed() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;
    post_form(&app, &cookie, "/lists", &[("list_name", "Groceries")]).await;

    post_form(&app, &cookie, "/lists/0/todos", &[("todo", "Milk")]).await;
    post_form(&app, &cookie, "/lists/0/todos", &[("todo", "Milk")]).await;

    let page: ListPageDTO = get_json(&app, &cookie, "/lists/0").await;
    assert_eq!(page.item_count, 2);
    assert_eq!(page.remaining_count, 2);
}

#[actix_web::test]
async fn test_invalid_todo_preserves_input() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;
    post_form(&app, &cookie, "/lists", &[("list_name", "Groceries")]).await;

    let resp = post_form(&app, &cookie, "/lists/0/todos", &[("todo", "")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"]["message"],
        "Todo name must be between 1 and 200 characters"
    );
    assert_eq!(body["todo"], "");
}

#[actix_web::test]
async fn test_complete_all_and_delete_todo() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;
    post_form(&app, &cookie, "/lists", &[("list_name", "Chores")]).await;
    post_form(&app, &cookie, "/lists/0/todos", &[("todo", "Sweep")]).await;
    post_form(&app, &cookie, "/lists/0/todos", &[("todo", "Mop")]).await;

    let resp = post_form(&app, &cookie, "/lists/0/complete_all", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let page: ListPageDTO = get_json(&app, &cookie, "/lists/0").await;
    assert!(page.is_complete);

    let lists: ListsPageDTO = get_json(&app, &cookie, "/lists").await;
    assert!(lists.lists[0].is_complete);

    let resp = post_form(&app, &cookie, "/lists/0/todos/0/destroy", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let page: ListPageDTO = get_json(&app, &cookie, "/lists/0").await;
    assert_eq!(page.todos.len(), 1);
    assert_eq!(page.todos[0].name, "Mop");
    assert_eq!(page.todos[0].id, 0);

    let resp = post_form(&app, &cookie, "/lists/0/todos/1/destroy", &[]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_rename_list() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;
    post_form(&app, &cookie, "/lists", &[("list_name", "Work")]).await;
    post_form(&app, &cookie, "/lists", &[("list_name", "Home")]).await;

    let form: ListFormDTO = get_json(&app, &cookie, "/lists/1/edit").await;
    assert_eq!(form.id, Some(1));
    assert_eq!(form.list_name, "Home");

    // Renaming to its own name is not a conflict
    let resp = post_form(&app, &cookie, "/lists/1", &[("list_name", "Home")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists/1");

    let resp = post_form(&app, &cookie, "/lists/1", &[("list_name", "Work")]).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    post_form(&app, &cookie, "/lists/1", &[("list_name", "House")]).await;
    let page: ListPageDTO = get_json(&app, &cookie, "/lists/1").await;
    assert_eq!(page.name, "House");
    assert_eq!(
        page.flash.map(|f| f.message),
        Some("The list name has been updated.".to_string())
    );
}

#[actix_web::test]
async fn test_destroy_list_shifts_ids() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;
    for name in ["A", "B", "C"] {
        post_form(&app, &cookie, "/lists", &[("list_name", name)]).await;
    }

    let resp = post_form(&app, &cookie, "/lists/0/destroy", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/lists");

    let page: ListsPageDTO = get_json(&app, &cookie, "/lists").await;
    assert_eq!(
        page.flash.map(|f| f.message),
        Some("The \"A\" list has been deleted.".to_string())
    );
    let names: Vec<_> = page.lists.iter().map(|l| (l.name.as_str(), l.id)).collect();
    assert_eq!(names, vec![("B", 0), ("C", 1)]);

    let resp = post_form(&app, &cookie, "/lists/2/destroy", &[]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_missing_list_page_redirects_with_error() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;

    for uri in ["/lists/7", "/lists/abc", "/lists/7/edit"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "GET {}", uri);
        assert_eq!(location(&resp), "/lists");
    }

    let page: ListsPageDTO = get_json(&app, &cookie, "/lists").await;
    let flash = page.flash.expect("error flash");
    assert_eq!(flash.kind, FlashKind::Error);
    assert_eq!(flash.message, "The specified list was not found.");
}

#[actix_web::test]
async fn test_malformed_index_on_mutation_is_not_found() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;

    let resp = post_form(&app, &cookie, "/lists/abc/todos", &[("todo", "x")]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "not_found");

    let resp = post_form(&app, &cookie, "/lists/0/todos", &[("todo", "x")]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_non_form_body_returns_json_error() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;

    let req = test::TestRequest::post()
        .uri("/lists")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({ "list_name": "Groceries" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "{}", content_type);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "invalid_request");
    assert!(body["error"]["message"].is_string());

    let page: ListsPageDTO = get_json(&app, &cookie, "/lists").await;
    assert!(page.lists.is_empty());
}

#[actix_web::test]
async fn test_new_list_form() {
    let app = create_test_app().await;
    let cookie = start_session(&app).await;

    let form: ListFormDTO = get_json(&app, &cookie, "/lists/new").await;
    assert_eq!(form.id, None);
    assert_eq!(form.list_name, "");
}

#[actix_web::test]
async fn test_trace_id_is_echoed() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/lists")
        .insert_header(("X-Trace-Id", "trace-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers()
            .get("x-trace-id")
            .and_then(|v| v.to_str().ok()),
        Some("trace-123")
    );

    let req = test::TestRequest::get().uri("/lists").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key("x-trace-id"));
}
