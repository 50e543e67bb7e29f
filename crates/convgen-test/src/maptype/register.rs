#![cfg(convgen)]

use super::{Config, ConfigRequest};

fn register() {
  convgen::register::<ConfigRequest, Config>();
}
