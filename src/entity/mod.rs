macro_rules! identified {
  ($id:ty => $($ty:ty),+ $(,)?) => {
    $(
      impl $crate::entity::Identified for $ty {
        type Id = $id;

        fn identity(&self) -> Option<&$id> {
          self.id.as_ref()
        }
      }
    )+
  };
}

macro_rules! identified_model {
  ($id:ty => $ty:ty) => {
    impl $crate::entity::Identified for $ty {
      type Id = $id;

      fn identity(&self) -> Option<&$id> {
        Some(&self.id)
      }
    }
  };
}

pub mod article;
pub mod coupon;
pub mod intent;
mod money;
pub mod patch;
pub mod rd_checkout;
pub mod store;
pub mod store_manager;
pub mod user;

pub use coupon::CouponType;
pub use patch::Patch;

/// Anything that may carry the identity of a stored record.
///
/// Request bodies return `None` when the client left the id out, stored
/// models always return `Some`.
pub trait Identified {
  type Id;

  fn identity(&self) -> Option<&Self::Id>;
}
