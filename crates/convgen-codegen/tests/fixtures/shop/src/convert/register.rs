#![cfg(convgen)]

use crate::{api, model};

const _: convgen::Registration = convgen::register::<&model::Order, &api::OrderView>();
