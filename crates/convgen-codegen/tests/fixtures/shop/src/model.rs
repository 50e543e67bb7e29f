#[derive(Debug, Default, Clone)]
pub struct Order {
  pub id: u64,
  pub customer: Customer,
  pub lines: Vec<Line>,
  pub notes: Option<String>,
  pub total_cents: i64,
}

#[derive(Debug, Default, Clone)]
pub struct Customer {
  pub name: String,
  pub email: String,
}

#[derive(Debug, Default, Clone)]
pub struct Line {
  pub sku: String,
  pub quantity: u32,
}
