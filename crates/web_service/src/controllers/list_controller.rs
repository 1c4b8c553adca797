use actix_web::{get, post, web, HttpResponse};
use list_store::ListStoreError;
use log::{debug, info, warn};

use super::{parse_index, see_other, ListNameForm, LIST_NOT_FOUND};
use crate::dto::{ListFormDTO, ListPageDTO, ListsPageDTO};
use crate::error::AppError;
use crate::server::AppState;
use crate::services::session_store::{Flash, Session, SessionId};

/// Configure list routes
pub fn config(cfg: &mut web::ServiceConfig) {
    // "/lists/new" must be registered ahead of "/lists/{id}"
    cfg.service(index)
        .service(get_lists)
        .service(new_list_form)
        .service(create_list)
        .service(get_list)
        .service(edit_list_form)
        .service(update_list)
        .service(destroy_list);
}

/// Resolve a list position from the URL, leaving an error flash when it
/// does not name a list.
fn resolve_list(session: &mut Session, raw: &str) -> Option<usize> {
    let id = parse_index(raw, "List")
        .ok()
        .filter(|id| *id < session.lists.len());
    if id.is_none() {
        session.flash = Some(Flash::error(LIST_NOT_FOUND));
    }
    id
}

/// GET / - Redirect to the lists page
#[get("/")]
pub async fn index() -> HttpResponse {
    see_other("/lists")
}

/// GET /lists - All lists, unfinished first
#[get("/lists")]
pub async fn get_lists(
    app_state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    let page = app_state
        .sessions
        .with_session(&session, |s| {
            let flash = s.take_flash();
            ListsPageDTO::new(&s.lists.lists, flash)
        })
        .await;
    debug!("Rendering {} lists", page.lists.len());

    Ok(HttpResponse::Ok().json(page))
}

/// GET /lists/new - Empty new-list form
#[get("/lists/new")]
pub async fn new_list_form() -> HttpResponse {
    HttpResponse::Ok().json(ListFormDTO {
        id: None,
        list_name: String::new(),
    })
}

/// POST /lists - Create a list
#[post("/lists")]
pub async fn create_list(
    app_state: web::Data<AppState>,
    session: SessionId,
    form: web::Form<ListNameForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let id = app_state
        .sessions
        .with_session(&session, |s| {
            let id = s.lists.create_list(&form.list_name)?;
            s.flash = Some(Flash::success("The list has been created."));
            Ok::<_, ListStoreError>(id)
        })
        .await
        .map_err(|e| AppError::from(e).with_input("list_name", &form.list_name))?;
    info!("Created list {}", id);

    Ok(see_other("/lists"))
}

/// GET /lists/{id} - One list with its todos, unfinished first
#[get("/lists/{id}")]
pub async fn get_list(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let page = app_state
        .sessions
        .with_session(&session, |s| {
            let id = resolve_list(s, &raw)?;
            let flash = s.take_flash();
            Some(ListPageDTO::new(id, &s.lists.lists[id], flash))
        })
        .await;

    match page {
        Some(page) => Ok(HttpResponse::Ok().json(page)),
        None => {
            warn!("List {} not found, redirecting", raw);
            Ok(see_other("/lists"))
        }
    }
}

/// GET /lists/{id}/edit - Edit form for a list name
#[get("/lists/{id}/edit")]
pub async fn edit_list_form(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let form = app_state
        .sessions
        .with_session(&session, |s| {
            let id = resolve_list(s, &raw)?;
            Some(ListFormDTO {
                id: Some(id),
                list_name: s.lists.lists[id].name.clone(),
            })
        })
        .await;

    match form {
        Some(form) => Ok(HttpResponse::Ok().json(form)),
        None => {
            warn!("List {} not found, redirecting", raw);
            Ok(see_other("/lists"))
        }
    }
}

/// POST /lists/{id} - Rename a list
#[post("/lists/{id}")]
pub async fn update_list(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<String>,
    form: web::Form<ListNameForm>,
) -> Result<HttpResponse, AppError> {
    let id = parse_index(&path.into_inner(), "List")?;
    let form = form.into_inner();
    app_state
        .sessions
        .with_session(&session, |s| {
            s.lists.rename_list(id, &form.list_name)?;
            s.flash = Some(Flash::success("The list name has been updated."));
            Ok::<_, ListStoreError>(())
        })
        .await
        .map_err(|e| AppError::from(e).with_input("list_name", &form.list_name))?;
    info!("Renamed list {}", id);

    Ok(see_other(format!("/lists/{}", id)))
}

/// POST /lists/{id}/destroy - Delete a list
#[post("/lists/{id}/destroy")]
pub async fn destroy_list(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_index(&path.into_inner(), "List")?;
    let deleted = app_state
        .sessions
        .with_session(&session, |s| {
            let deleted = s.lists.delete_list(id)?;
            s.flash = Some(Flash::success(format!(
                "The \"{}\" list has been deleted.",
                deleted.name
            )));
            Ok::<_, ListStoreError>(deleted)
        })
        .await?;
    info!("Deleted list {} ({} todos)", id, deleted.item_count());

    Ok(see_other("/lists"))
}
