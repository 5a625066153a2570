mod alert;
mod resource;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use axum::{
  Json, Router,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  timeout::TimeoutLayer,
  trace::TraceLayer,
};
use uuid::Uuid;

pub use self::{
  alert::Alert,
  resource::{Id, Resource},
};
use crate::{
  entity::intent,
  prelude::*,
  state::AppState,
  sv::{self, Repository, Services},
};

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let config = &app.config;
    let alert = Alert::new(&config.app_name).context("Invalid APP_NAME")?;

    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .period(config.rate_limit_period)
        .burst_size(config.rate_limit_burst)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let governor_limiter = governor_conf.limiter().clone();

    tokio::spawn(async move {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        governor_limiter.retain_recent();
      }
    });

    let router = router(app.sv(), alert)
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
          ))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any)
              .expose_headers(Any),
          ),
      )
      .into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP Server listening on {addr}");

    tokio::spawn(async move {
      if let Err(err) = axum::serve(listener, router).await {
        error!("HTTP Server stopped: {err}");
      }
    });

    Ok(())
  }
}

/// Every REST route of the service, without transport layers.
pub fn router(sv: Services, alert: Alert) -> Router {
  let intents =
    Resource::new(sv.intent.clone(), alert.clone(), "/api/intents");
  let user_intents = UserIntents { users: sv.user, intents: intents.clone() };

  let router = Router::new().route("/health", get(health));
  let router = mount(router, "/api/articles", sv.article, &alert);
  let router = mount(router, "/api/coupons", sv.coupon, &alert);
  let router = mount(router, "/api/stores", sv.store, &alert);
  let router = mount(router, "/api/store-managers", sv.store_manager, &alert);
  let router = mount(router, "/api/rd-checkouts", sv.rd_checkout, &alert);

  router
    .nest(
      "/api/intents",
      Resource::<sv::Intent>::routes()
        .route("/{id}/details", get(intent_details))
        .with_state(intents),
    )
    .route(
      "/api/users/{login}/intents",
      get(intents_of_user).with_state(user_intents),
    )
}

fn mount<R: Repository>(
  router: Router,
  path: &'static str,
  repo: R,
  alert: &Alert,
) -> Router {
  let resource = Resource::new(repo, alert.clone(), path);
  router.nest(path, Resource::<R>::routes().with_state(resource))
}

async fn health() -> &'static str {
  "OK"
}

#[derive(Clone)]
struct UserIntents {
  users: sv::User,
  intents: Resource<sv::Intent>,
}

async fn intent_details(
  State(ctl): State<Resource<sv::Intent>>,
  Id(id): Id<Uuid>,
) -> Response {
  debug!("REST request to get intent details : {}", id);
  ctl.respond(load_details(ctl.repo(), id).await)
}

async fn load_details(intents: &sv::Intent, id: Uuid) -> Result<Response> {
  let details: intent::Details = intents
    .details(&id)
    .await?
    .ok_or(Error::NotFound(sv::Intent::ENTITY))?;
  Ok(Json(details).into_response())
}

async fn intents_of_user(
  State(state): State<UserIntents>,
  Path(login): Path<String>,
) -> Response {
  debug!("REST request to get intents of user : {}", login);
  state.intents.respond(load_user_intents(&state, &login).await)
}

async fn load_user_intents(
  state: &UserIntents,
  login: &str,
) -> Result<Response> {
  if state.users.by_login(login).await?.is_none() {
    return Err(Error::NotFound("user"));
  }
  let intents = state.intents.repo().by_user_login(login).await?;
  Ok(Json(intents).into_response())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
  };
  use json::{Value, json};
  use rust_decimal::Decimal;
  use tower::ServiceExt;

  use super::*;
  use crate::sv::test_utils::test_db;

  const JSON: &str = "application/json";
  const MERGE_PATCH: &str = "application/merge-patch+json";
  const PROBLEM: &str = "application/problem+json";

  struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
  }

  async fn app() -> (Router, Services) {
    let db = test_db::setup().await;
    let sv = Services::new(&db);
    (router(sv.clone(), Alert::new("intentApp").unwrap()), sv)
  }

  async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<(&str, Value)>,
  ) -> Reply {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
      Some((content_type, body)) => request
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string())),
      None => request.body(Body::empty()),
    }
    .unwrap();

    dispatch(app, request).await
  }

  /// Non-JSON bodies are kept as a string value.
  async fn dispatch(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes =
      axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let is_json = headers
      .get(header::CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .is_some_and(|value| value.contains("json"));
    let body = if bytes.is_empty() {
      Value::Null
    } else if is_json {
      json::from_slice(&bytes).unwrap()
    } else {
      Value::String(String::from_utf8_lossy(&bytes).into_owned())
    };

    Reply { status, headers, body }
  }

  fn decimal(value: &Value) -> Decimal {
    match value {
      Value::String(raw) => raw.parse().unwrap(),
      other => other.to_string().parse().unwrap(),
    }
  }

  #[tokio::test]
  async fn test_coupon_lifecycle() {
    let (app, _) = app().await;

    let created = send(
      &app,
      Method::POST,
      "/api/coupons",
      Some((
        JSON,
        json!({"text": "AAAAAAAAAA", "type": "PERCENT", "value": 1}),
      )),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_str().unwrap().to_owned();
    assert_eq!(
      created.headers[header::LOCATION],
      format!("/api/coupons/{id}").as_str()
    );
    assert_eq!(
      created.headers["x-intentapp-alert"],
      "intentApp.coupon.created"
    );
    assert_eq!(created.headers["x-intentapp-params"], id.as_str());

    let fetched =
      send(&app, Method::GET, &format!("/api/coupons/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["text"], "AAAAAAAAAA");
    assert_eq!(fetched.body["type"], "PERCENT");
    assert_eq!(decimal(&fetched.body["value"]), Decimal::from(1));

    let patched = send(
      &app,
      Method::PATCH,
      &format!("/api/coupons/{id}"),
      Some((MERGE_PATCH, json!({"id": id, "type": "FIXED"}))),
    )
    .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(
      patched.headers["x-intentapp-alert"],
      "intentApp.coupon.updated"
    );

    let fetched =
      send(&app, Method::GET, &format!("/api/coupons/{id}"), None).await;
    assert_eq!(fetched.body["text"], "AAAAAAAAAA");
    assert_eq!(fetched.body["type"], "FIXED");
    assert_eq!(decimal(&fetched.body["value"]), Decimal::from(1));

    let deleted =
      send(&app, Method::DELETE, &format!("/api/coupons/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(
      deleted.headers["x-intentapp-alert"],
      "intentApp.coupon.deleted"
    );

    let fetched =
      send(&app, Method::GET, &format!("/api/coupons/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_create_with_id_is_rejected() {
    let (app, sv) = app().await;

    let coupon = sv.coupon.save(Default::default()).await.unwrap();

    for id in [coupon.id.as_str(), "never-stored"] {
      let reply = send(
        &app,
        Method::POST,
        "/api/coupons",
        Some((JSON, json!({"id": id, "text": "AAAAAAAAAA"}))),
      )
      .await;

      assert_eq!(reply.status, StatusCode::BAD_REQUEST);
      assert_eq!(reply.body["errorKey"], "idexists");
      assert_eq!(reply.body["entityName"], "coupon");
      assert_eq!(reply.headers["x-intentapp-error"], "error.idexists");
    }

    assert_eq!(sv.coupon.all().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_put_identity_checks() {
    let (app, sv) = app().await;

    let first = sv.store.save(Default::default()).await.unwrap();
    let second = sv.store.save(Default::default()).await.unwrap();
    let uri = format!("/api/stores/{}", first.id);

    let reply = send(
      &app,
      Method::PUT,
      &uri,
      Some((JSON, json!({"name": "BBBBBBBBBB"}))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errorKey"], "idnull");

    let reply = send(
      &app,
      Method::PUT,
      &uri,
      Some((JSON, json!({"id": second.id, "name": "BBBBBBBBBB"}))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errorKey"], "idinvalid");

    let missing = Uuid::new_v4();
    let reply = send(
      &app,
      Method::PUT,
      &format!("/api/stores/{missing}"),
      Some((JSON, json!({"id": missing, "name": "BBBBBBBBBB"}))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errorKey"], "idnotfound");

    let reply = send(
      &app,
      Method::PUT,
      &uri,
      Some((JSON, json!({"id": first.id, "name": "BBBBBBBBBB"}))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["name"], "BBBBBBBBBB");
    assert_eq!(reply.headers["x-intentapp-alert"], "intentApp.store.updated");

    let unchanged = sv.store.by_id(&second.id).await.unwrap();
    assert_eq!(unchanged, Some(second));
  }

  #[tokio::test]
  async fn test_patch_identity_checks() {
    let (app, sv) = app().await;

    let manager = sv.store_manager.save(Default::default()).await.unwrap();
    let uri = format!("/api/store-managers/{}", manager.id);

    let reply = send(
      &app,
      Method::PATCH,
      &uri,
      Some((MERGE_PATCH, json!({"name": "BBBBBBBBBB"}))),
    )
    .await;
    assert_eq!(reply.body["errorKey"], "idnull");

    let reply = send(
      &app,
      Method::PATCH,
      &uri,
      Some((MERGE_PATCH, json!({"id": Uuid::new_v4(), "name": "B"}))),
    )
    .await;
    assert_eq!(reply.body["errorKey"], "idinvalid");

    let missing = Uuid::new_v4();
    let reply = send(
      &app,
      Method::PATCH,
      &format!("/api/store-managers/{missing}"),
      Some((MERGE_PATCH, json!({"id": missing, "name": "B"}))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errorKey"], "idnotfound");
  }

  #[tokio::test]
  async fn test_patch_accepts_plain_json() {
    let (app, sv) = app().await;

    let checkout = sv.rd_checkout.save(Default::default()).await.unwrap();
    let reply = send(
      &app,
      Method::PATCH,
      &format!("/api/rd-checkouts/{}", checkout.id),
      Some((JSON, json!({"id": checkout.id, "paymentStatus": "PAID"}))),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["paymentStatus"], "PAID");
    assert_eq!(reply.body["status"], Value::Null);
  }

  #[tokio::test]
  async fn test_delete_unknown_id_succeeds() {
    let (app, _) = app().await;

    let reply = send(
      &app,
      Method::DELETE,
      &format!("/api/articles/{}", Uuid::new_v4()),
      None,
    )
    .await;

    assert_eq!(reply.status, StatusCode::NO_CONTENT);
  }

  #[tokio::test]
  async fn test_malformed_uuid_is_bad_request() {
    let (app, _) = app().await;

    for method in [Method::GET, Method::DELETE] {
      let reply =
        send(&app, method, "/api/articles/not-a-uuid", None).await;

      assert_eq!(reply.status, StatusCode::BAD_REQUEST);
      assert_eq!(reply.headers[header::CONTENT_TYPE], PROBLEM);
      assert_eq!(reply.body["errorKey"], "badrequest");
      assert_eq!(reply.headers["x-intentapp-error"], "error.badrequest");
    }

    let reply = send(
      &app,
      Method::GET,
      "/api/intents/not-a-uuid/details",
      None,
    )
    .await;
    assert_eq!(reply.body["errorKey"], "badrequest");
    assert_eq!(reply.body["entityName"], "intent");
  }

  #[tokio::test]
  async fn test_unreadable_body_is_bad_request() {
    let (app, sv) = app().await;

    let reply = send(
      &app,
      Method::POST,
      "/api/coupons",
      Some((JSON, json!({"text": "AAAAAAAAAA", "type": "BOGUS"}))),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.headers[header::CONTENT_TYPE], PROBLEM);
    assert_eq!(reply.body["errorKey"], "badrequest");
    assert_eq!(reply.body["entityName"], "coupon");

    let request = Request::builder()
      .method(Method::POST)
      .uri("/api/coupons")
      .body(Body::from(r#"{"text": "AAAAAAAAAA"}"#))
      .unwrap();
    let reply = dispatch(&app, request).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errorKey"], "badrequest");

    let request = Request::builder()
      .method(Method::POST)
      .uri("/api/coupons")
      .header(header::CONTENT_TYPE, JSON)
      .body(Body::from("{not json"))
      .unwrap();
    let reply = dispatch(&app, request).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.headers["x-intentapp-error"], "error.badrequest");

    assert!(sv.coupon.all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_money_keeps_two_places() {
    let (app, _) = app().await;

    let created = send(
      &app,
      Method::POST,
      "/api/coupons",
      Some((JSON, json!({"type": "FIXED", "value": "1.10"}))),
    )
    .await;
    let id = created.body["id"].as_str().unwrap().to_owned();
    assert_eq!(created.body["value"], "1.10");

    let fetched =
      send(&app, Method::GET, &format!("/api/coupons/{id}"), None).await;
    assert_eq!(fetched.body["value"], "1.10");

    let created = send(
      &app,
      Method::POST,
      "/api/articles",
      Some((JSON, json!({"price": 3}))),
    )
    .await;
    assert_eq!(created.body["price"], "3.00");
  }

  #[tokio::test]
  async fn test_list_articles() {
    let (app, sv) = app().await;

    for price in [1, 2, 3] {
      sv.article
        .save(crate::entity::article::Form {
          id: None,
          price: Some(Decimal::from(price)),
        })
        .await
        .unwrap();
    }

    let reply = send(&app, Method::GET, "/api/articles", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body.as_array().unwrap().len(), 3);
  }

  #[tokio::test]
  async fn test_intent_requires_created_time() {
    let (app, sv) = app().await;

    let reply = send(
      &app,
      Method::POST,
      "/api/intents",
      Some((JSON, json!({"commission": 1, "createdBy": "AAAAAAAAAA"}))),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["errorKey"], "validation");
    assert_eq!(reply.body["fieldErrors"][0]["field"], "createdTime");
    assert!(sv.intent.all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_intent_details_and_user_listing() {
    let (app, sv) = app().await;

    let user = sv.user.create("alice").await.unwrap();
    let created = send(
      &app,
      Method::POST,
      "/api/intents",
      Some((
        JSON,
        json!({
          "commission": "2.50",
          "createdTime": "1970-01-01T00:00:00Z",
          "createdBy": "AAAAAAAAAA",
          "userId": user.id,
        }),
      )),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_str().unwrap().to_owned();

    let details =
      send(&app, Method::GET, &format!("/api/intents/{id}/details"), None)
        .await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.body["id"], id.as_str());
    assert_eq!(details.body["user"]["login"], "alice");
    assert_eq!(details.body["store"], Value::Null);

    let listed =
      send(&app, Method::GET, "/api/users/alice/intents", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body[0]["id"], id.as_str());

    let unknown =
      send(&app, Method::GET, "/api/users/carol/intents", None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let missing = send(
      &app,
      Method::GET,
      &format!("/api/intents/{}/details", Uuid::new_v4()),
      None,
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_health() {
    let (app, _) = app().await;

    let reply = send(&app, Method::GET, "/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "OK");
  }
}
