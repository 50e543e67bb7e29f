use std::collections::{BTreeMap, HashMap};

#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/maptype.rs"));
}

pub use generated::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigRequest {
  pub name: String,
  pub settings: Option<HashMap<String, SettingRequest>>,
  pub limits: BTreeMap<String, LimitRequest>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SettingRequest {
  pub value: String,
  pub enabled: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LimitRequest {
  pub max: u64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
  pub name: String,
  pub settings: Option<HashMap<String, Setting>>,
  pub limits: BTreeMap<String, Limit>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Setting {
  pub value: String,
  pub enabled: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Limit {
  pub max: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn convert(src: &ConfigRequest) -> Config {
    let mut config = Config::default();
    convert_config_request_to_config(src, &mut config);
    config
  }

  #[test]
  fn test_map_values_are_converted_under_the_same_keys() {
    let mut settings = HashMap::new();
    settings.insert(
      "debug".to_string(),
      SettingRequest {
        value: "true".to_string(),
        enabled: true,
      },
    );
    settings.insert(
      "timeout".to_string(),
      SettingRequest {
        value: "30s".to_string(),
        enabled: false,
      },
    );
    let mut limits = BTreeMap::new();
    limits.insert("requests".to_string(), LimitRequest { max: 100 });

    let config = convert(&ConfigRequest {
      name: "AppConfig".to_string(),
      settings: Some(settings),
      limits,
    });

    assert_eq!(config.name, "AppConfig");
    let settings = config.settings.unwrap();
    assert_eq!(settings.len(), 2);
    assert_eq!(
      settings["debug"],
      Setting {
        value: "true".to_string(),
        enabled: true
      }
    );
    assert_eq!(settings["timeout"].value, "30s");
    assert!(!settings["timeout"].enabled);
    assert_eq!(config.limits["requests"], Limit { max: 100 });
  }

  #[test]
  fn test_nil_map_stays_nil() {
    let config = convert(&ConfigRequest::default());
    assert!(config.settings.is_none());
    assert!(config.limits.is_empty());
  }

  #[test]
  fn test_empty_map_stays_empty() {
    let config = convert(&ConfigRequest {
      settings: Some(HashMap::new()),
      ..ConfigRequest::default()
    });
    assert_eq!(config.settings, Some(HashMap::new()));
  }
}
