#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/nested.rs"));
}

pub use generated::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserRequest {
  pub name: String,
  pub address: AddressRequest,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AddressRequest {
  pub city: String,
  pub zip_code: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
  pub name: String,
  pub address: Address,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
  pub city: String,
  pub zip_code: String,
}
