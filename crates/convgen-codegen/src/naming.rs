//! Function naming convention shared by generated functions and overrides.

use crate::descriptor::QualifiedName;

pub const CONVERT_PREFIX: &str = "convert_";

/// `UserRequest` -> `user_request`, `HTTPServer` -> `http_server`.
pub fn snake_case(name: &str) -> String {
  let name = name.strip_prefix("r#").unwrap_or(name);
  let chars: Vec<char> = name.chars().collect();
  let mut out = String::with_capacity(name.len() + 4);
  for (i, &c) in chars.iter().enumerate() {
    if c.is_uppercase() {
      if i > 0 && !out.ends_with('_') {
        let prev = chars[i - 1];
        let next_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
        if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
          out.push('_');
        }
      }
      out.extend(c.to_lowercase());
    } else {
      out.push(c);
    }
  }
  out
}

/// Name of the function converting `from` into `to`.
pub fn pair_function_name(from: &QualifiedName, to: &QualifiedName) -> String {
  format!(
    "{}{}_to_{}",
    CONVERT_PREFIX,
    snake_case(&from.name),
    snake_case(&to.name)
  )
}

/// Name of the override mapping `from.from_field` into `to.to_field`.
pub fn field_function_name(
  from: &QualifiedName,
  from_field: &str,
  to: &QualifiedName,
  to_field: &str,
) -> String {
  format!(
    "{}{}_{}_to_{}_{}",
    CONVERT_PREFIX,
    snake_case(&from.name),
    snake_case(from_field),
    snake_case(&to.name),
    snake_case(to_field)
  )
}
