use actix_web::{post, web, HttpResponse};
use list_store::ListStoreError;
use log::info;

use super::{parse_index, see_other, CompletedForm, TodoForm};
use crate::error::AppError;
use crate::server::AppState;
use crate::services::session_store::{Flash, SessionId};

/// Configure todo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_todo)
        .service(complete_all)
        .service(destroy_todo)
        .service(update_todo);
}

/// POST /lists/{id}/todos - Add a todo to a list
#[post("/lists/{id}/todos")]
pub async fn add_todo(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<String>,
    form: web::Form<TodoForm>,
) -> Result<HttpResponse, AppError> {
    let list_id = parse_index(&path.into_inner(), "List")?;
    let form = form.into_inner();
    let todo_id = app_state
        .sessions
        .with_session(&session, |s| {
            let todo_id = s.lists.list_mut(list_id)?.add_item(&form.todo)?;
            s.flash = Some(Flash::success("The todo was added."));
            Ok::<_, ListStoreError>(todo_id)
        })
        .await
        .map_err(|e| AppError::from(e).with_input("todo", &form.todo))?;
    info!("Added todo {} to list {}", todo_id, list_id);

    Ok(see_other(format!("/lists/{}", list_id)))
}

/// POST /lists/{id}/todos/{todo_id}/destroy - Delete a todo
#[post("/lists/{id}/todos/{todo_id}/destroy")]
pub async fn destroy_todo(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (raw_list, raw_todo) = path.into_inner();
    let list_id = parse_index(&raw_list, "List")?;
    let todo_id = parse_index(&raw_todo, "Todo")?;
    app_state
        .sessions
        .with_session(&session, |s| {
            s.lists.list_mut(list_id)?.delete_item(todo_id)?;
            s.flash = Some(Flash::success("The todo has been deleted."));
            Ok::<_, ListStoreError>(())
        })
        .await?;
    info!("Deleted todo {} from list {}", todo_id, list_id);

    Ok(see_other(format!("/lists/{}", list_id)))
}

/// POST /lists/{id}/todos/{todo_id} - Mark a todo completed or not
#[post("/lists/{id}/todos/{todo_id}")]
pub async fn update_todo(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<(String, String)>,
    form: web::Form<CompletedForm>,
) -> Result<HttpResponse, AppError> {
    let (raw_list, raw_todo) = path.into_inner();
    let list_id = parse_index(&raw_list, "List")?;
    let todo_id = parse_index(&raw_todo, "Todo")?;
    let completed = form.is_completed();
    app_state
        .sessions
        .with_session(&session, |s| {
            s.lists
                .list_mut(list_id)?
                .set_item_completed(todo_id, completed)?;
            s.flash = Some(Flash::success("The todo has been updated."));
            Ok::<_, ListStoreError>(())
        })
        .await?;
    info!(
        "Set todo {} in list {} completed={}",
        todo_id, list_id, completed
    );

    Ok(see_other(format!("/lists/{}", list_id)))
}

/// POST /lists/{id}/complete_all - Mark every todo in a list completed
#[post("/lists/{id}/complete_all")]
pub async fn complete_all(
    app_state: web::Data<AppState>,
    session: SessionId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let list_id = parse_index(&path.into_inner(), "List")?;
    app_state
        .sessions
        .with_session(&session, |s| {
            s.lists.list_mut(list_id)?.complete_all();
            s.flash = Some(Flash::success("All todos have been completed."));
            Ok::<_, ListStoreError>(())
        })
        .await?;
    info!("Completed all todos in list {}", list_id);

    Ok(see_other(format!("/lists/{}", list_id)))
}
