//! Helpers shared by HTTP handler tests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test as actix_test, web};
use serde_json::json;

use crate::domain::UserId;
use crate::domain::ports::FixtureFundsGateway;
use crate::inbound::http::state::HttpState;
use crate::outbound::InMemoryLedgerStore;

/// Session middleware with a fixed key and lax cookie settings for tests.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&[0u8; 64]))
        .cookie_name("session".into())
        .cookie_secure(false)
        .build()
}

/// Real services over an empty in-memory store with `owner` privileged.
pub(crate) fn test_state(owner: UserId) -> web::Data<HttpState> {
    web::Data::new(HttpState::assemble(
        Arc::new(InMemoryLedgerStore::new(owner)),
        Arc::new(FixtureFundsGateway),
        Arc::new(mockable::DefaultClock),
    ))
}

/// Log `principal` in and return the resulting session cookie.
pub(crate) async fn login_as<S, B>(app: &S, principal: &UserId) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "principal": principal.to_string() }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login must succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}
