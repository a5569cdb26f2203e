use axum::{
    body::HttpBody,
    BoxError,
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde_json::{json, Value};
use crate::catalog::command::check_availability_cmd::{CheckAvailabilityCommand, CheckAvailabilityCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest, SearchBooksCommandResponse};
use crate::catalog::command::update_availability_cmd::{UpdateAvailabilityCommand, UpdateAvailabilityCommandRequest};
use crate::catalog::command::update_category_cmd::{UpdateCategoryCommand, UpdateCategoryCommandRequest, UpdateCategoryCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::core::library::Role;
use crate::core::security::{Principal, READ_ROLES, WRITE_ROLES};

// generic over the body so the same router serves hyper and lambda_http requests
pub(crate) fn routes<B>(state: AppState) -> Router<(), B>
    where
        B: HttpBody + Send + 'static,
        B::Data: Send,
        B::Error: Into<BoxError> {
    Router::new()
        .route("/libros/public/status", get(status))
        .route("/libros/public/info", get(info))
        .route("/libros/buscar", get(search_books))
        .route("/libros/:id", get(find_book_by_id))
        .route("/libros/:id/disponible", get(check_availability))
        .route("/libros/:id/disponibilidad", put(update_availability))
        .route("/libros/:id/categoria", put(update_category))
        .with_state(state)
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    principal: Principal,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    principal.require_any_role(READ_ROLES)?;
    let req = GetBookCommandRequest { book_id };
    let res = GetBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn check_availability(
    State(state): State<AppState>,
    principal: Principal,
    Path(book_id): Path<String>) -> Result<Json<bool>, ServerError> {
    principal.require_any_role(READ_ROLES)?;
    let req = CheckAvailabilityCommandRequest { book_id };
    let res = CheckAvailabilityCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res.available))
}

pub(crate) async fn update_availability(
    State(state): State<AppState>,
    principal: Principal,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<String, ServerError> {
    principal.require_any_role(WRITE_ROLES)?;
    let available: bool = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let req = UpdateAvailabilityCommandRequest { book_id, available };
    let res = UpdateAvailabilityCommand::new(state.catalog).execute(req).await?;
    tracing::info!(user_id = ?principal.user_id, book_id = res.book_id.as_str(), available, "availability updated");
    Ok(format!("Disponibilidad del libro {} actualizada a {}", res.book_id, res.available))
}

pub(crate) async fn update_category(
    State(state): State<AppState>,
    principal: Principal,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateCategoryCommandResponse>, ServerError> {
    principal.require_any_role(WRITE_ROLES)?;
    let mut req: UpdateCategoryCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.book_id = book_id;
    let res = UpdateCategoryCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn search_books(
    State(state): State<AppState>,
    principal: Principal,
    Query(req): Query<SearchBooksCommandRequest>) -> Result<Json<SearchBooksCommandResponse>, ServerError> {
    principal.require_any_role(READ_ROLES)?;
    let res = SearchBooksCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) const STATUS_MESSAGE: &str = "El servicio de catálogo está funcionando correctamente";

pub(crate) async fn status() -> &'static str {
    STATUS_MESSAGE
}

pub(crate) async fn info(State(state): State<AppState>) -> Json<Value> {
    let roles = vec![
        format!("{} - Acceso completo a catálogo y actualizaciones", Role::Librarian),
        format!("{} - Acceso solo a consultas del catálogo", Role::User),
    ];
    Json(json!({
        "service": state.config.service_name,
        "version": state.config.version,
        "description": state.config.description,
        "status": "ACTIVE",
        "endpoints": [
            "GET /libros/{id} - Obtener libro por ID (ROLE_LIBRARIAN/ROLE_USER)",
            "GET /libros/{id}/disponible - Verificar disponibilidad (ROLE_LIBRARIAN/ROLE_USER)",
            "PUT /libros/{id}/disponibilidad - Actualizar disponibilidad (ROLE_LIBRARIAN)",
            "PUT /libros/{id}/categoria - Actualizar categoría (ROLE_LIBRARIAN)",
            "GET /libros/buscar?criterio= - Buscar libros (ROLE_LIBRARIAN/ROLE_USER)",
            "GET /libros/public/status - Estado del servicio (PÚBLICO)",
            "GET /libros/public/info - Información del servicio (PÚBLICO)",
        ],
        "roles": roles,
    }))
}
