use convgen::Registration;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct A {
  pub x: i32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct B {
  pub x: i32,
}

pub const REGISTRATION: Registration = convgen::register::<A, B>();
