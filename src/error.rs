use axum::http::StatusCode;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("A new {0} cannot already have an ID")]
  IdExists(&'static str),
  #[error("Invalid id")]
  IdNull(&'static str),
  #[error("Invalid ID")]
  IdInvalid(&'static str),
  #[error("Entity not found")]
  IdNotFound(&'static str),
  #[error("{0} not found")]
  NotFound(&'static str),
  #[error("{entity}.{field}: {reason}")]
  Validation {
    entity: &'static str,
    field: &'static str,
    reason: &'static str,
  },
  #[error("{1}")]
  BadRequest(&'static str, String),
  #[error("Database error: {0}")]
  Db(#[from] DbErr),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  pub fn required(entity: &'static str, field: &'static str) -> Self {
    Self::Validation { entity, field, reason: "NotNull" }
  }

  pub fn dangling(entity: &'static str, field: &'static str) -> Self {
    Self::Validation { entity, field, reason: "refnotfound" }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::IdExists(_)
      | Self::IdNull(_)
      | Self::IdInvalid(_)
      | Self::IdNotFound(_)
      | Self::Validation { .. }
      | Self::BadRequest(..) => StatusCode::BAD_REQUEST,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Machine readable key, rendered as `error.{key}` to clients.
  pub fn key(&self) -> &'static str {
    match self {
      Self::IdExists(_) => "idexists",
      Self::IdNull(_) => "idnull",
      Self::IdInvalid(_) => "idinvalid",
      Self::IdNotFound(_) => "idnotfound",
      Self::NotFound(_) => "notfound",
      Self::Validation { .. } => "validation",
      Self::BadRequest(..) => "badrequest",
      Self::Db(_) => "internal",
    }
  }

  pub fn entity(&self) -> Option<&'static str> {
    match self {
      Self::IdExists(entity)
      | Self::IdNull(entity)
      | Self::IdInvalid(entity)
      | Self::IdNotFound(entity)
      | Self::NotFound(entity)
      | Self::Validation { entity, .. }
      | Self::BadRequest(entity, _) => Some(*entity),
      Self::Db(_) => None,
    }
  }
}
