//! Generic REST controller shared by every entity.
//!
//! `POST /` creates, `GET /` lists, and `/{id}` supports `GET`, `PUT`,
//! `PATCH` (merge-patch) and `DELETE`.

use axum::{
  Json, Router,
  extract::{FromRequest, FromRequestParts, Path, Request, State},
  http::{StatusCode, header::LOCATION, request::Parts},
  response::{IntoResponse, Response},
  routing::get,
};
use serde::de::DeserializeOwned;

use super::Alert;
use crate::{entity::Identified, prelude::*, sv::Repository};

#[derive(Clone)]
pub struct Resource<R> {
  repo: R,
  alert: Alert,
  path: &'static str,
}

impl<R: Repository> Resource<R> {
  pub fn new(repo: R, alert: Alert, path: &'static str) -> Self {
    Self { repo, alert, path }
  }

  pub fn repo(&self) -> &R {
    &self.repo
  }

  /// Routes relative to the resource path, without state attached so that
  /// entity specific routes can be added before `with_state`.
  pub fn routes() -> Router<Self> {
    Router::new().route("/", get(list::<R>).post(create::<R>)).route(
      "/{id}",
      get(fetch::<R>).put(replace::<R>).patch(patch::<R>).delete(remove::<R>),
    )
  }

  pub fn respond(&self, result: Result<Response>) -> Response {
    result.unwrap_or_else(|err| self.alert.failure(err))
  }

  fn reject(&self, reason: String) -> Response {
    self.alert.failure(Error::BadRequest(R::ENTITY, reason))
  }

  async fn create(&self, form: R::Form) -> Result<Response> {
    debug!("REST request to save {} : {:?}", R::ENTITY, form);

    if form.identity().is_some() {
      return Err(Error::IdExists(R::ENTITY));
    }

    let model = self.repo.save(form).await?;
    let id = identity_of(&model);

    Ok(
      (
        StatusCode::CREATED,
        [(LOCATION, format!("{}/{id}", self.path))],
        self.alert.created(R::ENTITY, &id),
        Json(model),
      )
        .into_response(),
    )
  }

  async fn replace(&self, id: R::Id, form: R::Form) -> Result<Response> {
    debug!("REST request to update {} : {}, {:?}", R::ENTITY, id, form);

    self.check_identity(&id, form.identity()).await?;
    let model = self.repo.save(form).await?;

    let headers = self.alert.updated(R::ENTITY, &id.to_string());
    Ok((headers, Json(model)).into_response())
  }

  async fn patch(&self, id: R::Id, changes: R::Changes) -> Result<Response> {
    debug!(
      "REST request to partial update {} : {}, {:?}",
      R::ENTITY,
      id,
      changes
    );

    self.check_identity(&id, changes.identity()).await?;
    let model = self
      .repo
      .merge(&id, changes)
      .await?
      .ok_or(Error::NotFound(R::ENTITY))?;

    let headers = self.alert.updated(R::ENTITY, &id.to_string());
    Ok((headers, Json(model)).into_response())
  }

  async fn list(&self) -> Result<Response> {
    debug!("REST request to get all {}", R::ENTITY);

    Ok(Json(self.repo.all().await?).into_response())
  }

  async fn fetch(&self, id: R::Id) -> Result<Response> {
    debug!("REST request to get {} : {}", R::ENTITY, id);

    let model =
      self.repo.by_id(&id).await?.ok_or(Error::NotFound(R::ENTITY))?;
    Ok(Json(model).into_response())
  }

  async fn remove(&self, id: R::Id) -> Result<Response> {
    debug!("REST request to delete {} : {}", R::ENTITY, id);

    self.repo.delete(&id).await?;
    Ok(
      (StatusCode::NO_CONTENT, self.alert.deleted(R::ENTITY, &id.to_string()))
        .into_response(),
    )
  }

  /// Body must carry an id equal to the path id, and that id must be stored.
  async fn check_identity(
    &self,
    path: &R::Id,
    body: Option<&R::Id>,
  ) -> Result<()> {
    let Some(body) = body else {
      return Err(Error::IdNull(R::ENTITY));
    };
    if body != path {
      return Err(Error::IdInvalid(R::ENTITY));
    }
    if !self.repo.exists(path).await? {
      return Err(Error::IdNotFound(R::ENTITY));
    }
    Ok(())
  }
}

fn identity_of<M: Identified>(model: &M) -> String
where
  M::Id: ToString,
{
  model.identity().map(ToString::to_string).unwrap_or_default()
}

/// JSON request body. Malformed bodies become `badrequest` problems.
pub struct Body<T>(pub T);

impl<R, T> FromRequest<Resource<R>> for Body<T>
where
  R: Repository,
  T: DeserializeOwned + Send,
{
  type Rejection = Response;

  async fn from_request(
    req: Request,
    ctl: &Resource<R>,
  ) -> Result<Self, Response> {
    match Json::<T>::from_request(req, ctl).await {
      Ok(Json(value)) => Ok(Self(value)),
      Err(rejection) => Err(ctl.reject(rejection.body_text())),
    }
  }
}

/// Path identity. Unparsable ids become `badrequest` problems.
pub struct Id<T>(pub T);

impl<R, T> FromRequestParts<Resource<R>> for Id<T>
where
  R: Repository,
  T: DeserializeOwned + Send,
{
  type Rejection = Response;

  async fn from_request_parts(
    parts: &mut Parts,
    ctl: &Resource<R>,
  ) -> Result<Self, Response> {
    match Path::<T>::from_request_parts(parts, ctl).await {
      Ok(Path(value)) => Ok(Self(value)),
      Err(rejection) => Err(ctl.reject(rejection.body_text())),
    }
  }
}

async fn create<R: Repository>(
  State(ctl): State<Resource<R>>,
  Body(form): Body<R::Form>,
) -> Response {
  ctl.respond(ctl.create(form).await)
}

async fn replace<R: Repository>(
  State(ctl): State<Resource<R>>,
  Id(id): Id<R::Id>,
  Body(form): Body<R::Form>,
) -> Response {
  ctl.respond(ctl.replace(id, form).await)
}

async fn patch<R: Repository>(
  State(ctl): State<Resource<R>>,
  Id(id): Id<R::Id>,
  Body(changes): Body<R::Changes>,
) -> Response {
  ctl.respond(ctl.patch(id, changes).await)
}

async fn list<R: Repository>(State(ctl): State<Resource<R>>) -> Response {
  ctl.respond(ctl.list().await)
}

async fn fetch<R: Repository>(
  State(ctl): State<Resource<R>>,
  Id(id): Id<R::Id>,
) -> Response {
  ctl.respond(ctl.fetch(id).await)
}

async fn remove<R: Repository>(
  State(ctl): State<Resource<R>>,
  Id(id): Id<R::Id>,
) -> Response {
  ctl.respond(ctl.remove(id).await)
}
