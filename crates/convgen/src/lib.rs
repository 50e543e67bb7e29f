//! # convgen
//!
//! Registration markers for generated conversion functions.
//!
//! A package asks for a conversion by calling [`register`] or
//! [`register_bidirectional`] in a file compiled only under `cfg(convgen)`.
//! The calls do nothing; `convgen-codegen` reads them from source and writes
//! the conversion functions into the package's generated module.
//!
//! # Example
//! ```
//!   pub struct UserRequest {
//!     pub name: String,
//!   }
//!
//!   pub struct User {
//!     pub name: String,
//!   }
//!
//!   const _: convgen::Registration = convgen::register::<UserRequest, User>();
//!   const _: convgen::Registration = convgen::register_bidirectional::<&UserRequest, &User>();
//! ```

/// Returned by the registration markers so they can sit in a `const` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration;

/// Requests `convert_<from>_to_<to>(src: &From, dst: &mut To)`.
pub const fn register<From: ?Sized, To: ?Sized>() -> Registration {
  Registration
}

/// Requests the conversion in both directions.
pub const fn register_bidirectional<From: ?Sized, To: ?Sized>() -> Registration {
  Registration
}

#[cfg(test)]
mod tests {
  use super::*;

  struct A;
  struct B;

  const FORWARD: Registration = register::<A, B>();
  const BOTH: Registration = register_bidirectional::<&A, Box<B>>();

  #[test]
  fn test_registration_is_zero_sized() {
    assert_eq!(FORWARD, BOTH);
    assert_eq!(std::mem::size_of::<Registration>(), 0);
  }
}
