use crate::application::PlanLookupUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::plan::PlanQuery;
use crate::infrastructure::config::AppConfig;
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder, ResponseError};
use serde::Serialize;
use serde_json::{Map, Value};

pub const LIVENESS_MESSAGE: &str = "Exercise API (CSV lookup) running!";
pub const NOT_FOUND_MESSAGE: &str = "No exercises found for given inputs";
pub const MISSING_FIELDS_MESSAGE: &str = "Provide workout_type, fitness_level, and day_index";
pub const DAY_INDEX_MESSAGE: &str = "day_index must be an integer";
pub const BODY_NOT_OBJECT_MESSAGE: &str = "Request body must be a JSON object";

pub struct HttpState {
    pub plan_lookup: PlanLookupUseCase,
}

impl HttpState {
    pub fn new(plan_lookup: PlanLookupUseCase) -> Self {
        Self { plan_lookup }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::DatasetUnavailable(_)
            | AppError::ConfigError(_)
            | AppError::ParseError(_)
            | AppError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}

#[post("/get_day_exercises")]
async fn get_day_exercises(
    data: web::Data<HttpState>,
    body: web::Bytes,
) -> std::result::Result<HttpResponse, AppError> {
    // Checked before the body so a missing dataset always answers 500.
    if !data.plan_lookup.is_available() {
        tracing::warn!("Rejecting lookup: dataset not loaded");
        return Err(AppError::DatasetUnavailable(
            "exercise table is empty".to_string(),
        ));
    }

    let query = parse_day_request(&body).map_err(|err| {
        tracing::debug!(error = %err, "Rejected day exercises request");
        err
    })?;

    tracing::info!(
        workout_type = %query.workout_type,
        fitness_level = %query.fitness_level,
        day_index = query.day_index,
        "Looking up day exercises"
    );

    match data.plan_lookup.execute(&query)? {
        Some(plan) => Ok(HttpResponse::Ok().json(plan)),
        None => Ok(HttpResponse::NotFound().json(MessageBody {
            message: NOT_FOUND_MESSAGE,
        })),
    }
}

/// Validate a `/get_day_exercises` body into a query.
///
/// The body is parsed as JSON whatever the `Content-Type`. `day_index` may be
/// a JSON number (floats truncate) or a string holding a base-10 integer.
pub fn parse_day_request(body: &[u8]) -> Result<PlanQuery> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|_| AppError::InvalidInput(BODY_NOT_OBJECT_MESSAGE.to_string()))?;

    let object = match &payload {
        Value::Object(object) => object,
        Value::Null | Value::Bool(false) => {
            return Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()))
        }
        _ => return Err(AppError::InvalidInput(BODY_NOT_OBJECT_MESSAGE.to_string())),
    };

    let (Some(workout_type), Some(fitness_level), Some(day_index)) = (
        non_empty_string(object, "workout_type"),
        non_empty_string(object, "fitness_level"),
        object.get("day_index").filter(|value| !value.is_null()),
    ) else {
        return Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
    };

    let day_index = coerce_day_index(day_index)
        .ok_or_else(|| AppError::InvalidInput(DAY_INDEX_MESSAGE.to_string()))?;

    Ok(PlanQuery::new(workout_type, fitness_level, day_index))
}

fn non_empty_string<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn coerce_day_index(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home).service(get_day_exercises);
}

pub fn start_server(state: web::Data<HttpState>, config: &AppConfig) -> std::io::Result<Server> {
    let mut server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    Ok(server.bind((config.host.as_str(), config.port))?.run())
}
