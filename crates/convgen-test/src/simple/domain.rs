#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
  pub name: String,
  pub email: String,
  pub age: u8,
  pub address: Address,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
  pub city: String,
  pub zip_code: String,
}
