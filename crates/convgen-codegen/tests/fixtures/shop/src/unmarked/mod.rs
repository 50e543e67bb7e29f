pub struct A {
  pub x: i32,
}

pub struct B {
  pub x: i32,
}

const _: convgen::Registration = convgen::register::<A, B>();
