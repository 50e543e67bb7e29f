#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/pointer.rs"));
}

pub use generated::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserRequest {
  pub name: String,
  pub profile: Option<Box<ProfileRequest>>,
  pub settings: Option<SettingsRequest>,
  pub contact: ContactRequest,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProfileRequest {
  pub bio: String,
  pub age: u32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SettingsRequest {
  pub theme: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContactRequest {
  pub email: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
  pub name: String,
  pub profile: Option<Box<Profile>>,
  pub settings: Settings,
  pub contact: Option<Contact>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Profile {
  pub bio: String,
  pub age: u32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
  pub theme: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Contact {
  pub email: String,
}
