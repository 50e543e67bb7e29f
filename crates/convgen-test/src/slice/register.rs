#![cfg(convgen)]

use convgen::register;

use super::*;

const _: convgen::Registration = register::<TeamRequest, Team>();
