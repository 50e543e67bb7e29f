use crate::{api, model};

#[cfg(convgen)]
mod register;

mod generated;

pub use generated::*;

pub fn convert_customer_to_customer_view(src: &model::Customer, dst: &mut api::CustomerView) {
  dst.display = format!("{} <{}>", src.name, src.email);
}
