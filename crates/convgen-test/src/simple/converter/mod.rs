use crate::simple::{domain, handler};

#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/simple_converter.rs"));
}

pub use generated::*;

/// `UserRequest::full_name` -> `User::name`
pub fn convert_user_request_name_to_user_name(src: &handler::UserRequest, dst: &mut domain::User) {
  dst.name = src.full_name.clone();
}

/// `AddressRequest::req_city` -> `Address::city`
pub fn convert_address_request_city_to_address_city(
  src: &handler::AddressRequest,
  dst: &mut domain::Address,
) {
  dst.city = src.req_city.clone();
}
