use std::sync::Arc;

use axum::{
  Json,
  http::{
    HeaderMap, HeaderName, HeaderValue, StatusCode,
    header::{CONTENT_TYPE, InvalidHeaderName},
  },
  response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::prelude::*;

const PROBLEM_TYPE: &str =
  "https://www.jhipster.tech/problem/problem-with-message";

/// Builds the `X-{app}-alert` / `X-{app}-params` notification headers and
/// the problem responses of failed requests.
#[derive(Clone)]
pub struct Alert {
  app: Arc<str>,
  alert: HeaderName,
  error: HeaderName,
  params: HeaderName,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem<'a> {
  #[serde(rename = "type")]
  kind: &'a str,
  title: String,
  status: u16,
  #[serde(skip_serializing_if = "Option::is_none")]
  entity_name: Option<&'a str>,
  error_key: &'a str,
  message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  params: Option<&'a str>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  field_errors: Vec<FieldError<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldError<'a> {
  object_name: &'a str,
  field: &'a str,
  message: &'a str,
}

impl Alert {
  pub fn new(app: &str) -> Result<Self, InvalidHeaderName> {
    let header =
      |suffix: &str| HeaderName::try_from(format!("x-{app}-{suffix}"));

    Ok(Self {
      app: app.into(),
      alert: header("alert")?,
      error: header("error")?,
      params: header("params")?,
    })
  }

  pub fn created(&self, entity: &str, id: &str) -> HeaderMap {
    self.notify(entity, "created", id)
  }

  pub fn updated(&self, entity: &str, id: &str) -> HeaderMap {
    self.notify(entity, "updated", id)
  }

  pub fn deleted(&self, entity: &str, id: &str) -> HeaderMap {
    self.notify(entity, "deleted", id)
  }

  fn notify(&self, entity: &str, action: &str, id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let message = format!("{}.{entity}.{action}", self.app);

    if let Ok(value) = HeaderValue::try_from(message) {
      headers.insert(self.alert.clone(), value);
    }
    if let Ok(value) = HeaderValue::try_from(id) {
      headers.insert(self.params.clone(), value);
    }
    headers
  }

  pub fn failure(&self, err: Error) -> Response {
    let status = err.status();
    let entity = err.entity();
    let message = format!("error.{}", err.key());

    let title = if status.is_server_error() {
      error!("request failed: {err}");
      status.canonical_reason().unwrap_or("Internal Server Error").to_owned()
    } else {
      debug!("request rejected: {err}");
      err.to_string()
    };

    let field_errors = match &err {
      Error::Validation { entity, field, reason } => {
        vec![FieldError { object_name: entity, field, message: reason }]
      }
      _ => Vec::new(),
    };

    let problem = Problem {
      kind: PROBLEM_TYPE,
      title,
      status: status.as_u16(),
      entity_name: entity,
      error_key: err.key(),
      message: message.clone(),
      params: entity,
      field_errors,
    };

    let mut response = Json(problem).into_response();
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
      CONTENT_TYPE,
      HeaderValue::from_static("application/problem+json"),
    );
    if let Ok(value) = HeaderValue::try_from(message) {
      headers.insert(self.error.clone(), value);
    }
    if let Some(entity) = entity {
      headers.insert(self.params.clone(), HeaderValue::from_static(entity));
    }

    response
  }
}
