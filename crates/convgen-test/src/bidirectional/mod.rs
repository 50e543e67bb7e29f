#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/bidirectional.rs"));
}

pub use generated::*;

/// Shape used on the wire.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserApi {
  pub id: String,
  pub full_name: String,
  pub email: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserDomain {
  pub id: String,
  pub full_name: String,
  pub email: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrderApi {
  pub order_id: String,
  pub items: Vec<ItemApi>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ItemApi {
  pub name: String,
  pub quantity: i32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrderDomain {
  pub order_id: String,
  pub items: Vec<ItemDomain>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ItemDomain {
  pub name: String,
  pub quantity: i32,
}
