#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserRequest {
  pub full_name: String,
  pub email: String,
  pub age: u8,
  pub address: AddressRequest,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AddressRequest {
  pub req_city: String,
  pub zip_code: String,
}
