#![cfg(convgen)]

const _: convgen::Registration = convgen::register::<super::UserRequest, super::User>();
