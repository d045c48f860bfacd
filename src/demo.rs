//! Demo application served by the binary.
//!
//! A plain-text root route plus a small "people" resource mounted once per
//! wire format.

use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::exchange::{Conclusion, Exchange, ExchangeHandler, ExchangeResult};
use crate::materializer::{ContentMaterializer, Json, Yaml};

pub const HELLO: &str = "It went well!";

/// Id assigned to every created person.
pub const CREATED_ID: i64 = 542857589043;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonIn {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonOut {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

pub async fn hello() -> &'static str {
    HELLO
}

pub async fn get_person<M: ContentMaterializer>(_xc: Exchange<M>) -> ExchangeResult<PersonOut> {
    let person = PersonOut {
        id: 4573098657423896,
        first_name: "Lilly".into(),
        last_name: "Wachowski".into(),
        birth_date: "1967-12-29".into(),
    };
    Ok(Conclusion::ok(person).into())
}

pub async fn create_person<M: ContentMaterializer>(mut xc: Exchange<M>) -> ExchangeResult<PersonOut> {
    let input: PersonIn = xc.bind().await?;
    tracing::info!(first_name = %input.first_name, "Creating person");
    let person = PersonOut {
        id: CREATED_ID,
        first_name: input.first_name,
        last_name: input.last_name,
        birth_date: input.birth_date,
    };
    Ok(Conclusion::created(person).into())
}

/// `GET /` and `POST /` for people, in the formats of `materializer`.
pub fn people_routes<M: ContentMaterializer>(materializer: M) -> Router {
    Router::new().route(
        "/",
        get(materializer.handler(get_person::<M>)).post(materializer.handler(create_person::<M>)),
    )
}

/// The full demo application.
pub fn app() -> Router {
    Router::new()
        .route("/", get(hello))
        .nest("/people", people_routes(Json::new()))
        .nest("/people.yaml", people_routes(Yaml::new()))
        .nest("/people.any", people_routes(Json::new().or(Yaml::new())))
}
