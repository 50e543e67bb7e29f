#![cfg(convgen)]

use super::{User, UserRequest};

const _: convgen::Registration = convgen::register::<&UserRequest, &User>();
