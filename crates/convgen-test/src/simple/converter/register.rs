#![cfg(convgen)]

use crate::simple::{domain, handler};

const _: convgen::Registration = convgen::register::<&handler::UserRequest, &domain::User>();
