#[derive(Debug, Default, Clone)]
pub struct OrderView {
  pub id: u64,
  pub customer: CustomerView,
  pub lines: Vec<LineView>,
  pub notes: Option<String>,
  pub total: String,
  cache: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct CustomerView {
  pub display: String,
}

#[derive(Debug, Default, Clone)]
pub struct LineView {
  pub sku: String,
  pub quantity: u32,
}
