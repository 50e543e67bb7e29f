#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/slice.rs"));
}

pub use generated::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TeamRequest {
  pub name: String,
  pub members: Option<Vec<MemberRequest>>,
  pub leads: Vec<MemberRequest>,
  pub tags: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemberRequest {
  pub name: String,
  pub role: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Team {
  pub name: String,
  pub members: Option<Vec<Member>>,
  pub leads: Vec<Member>,
  pub tags: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Member {
  pub name: String,
  pub role: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn member(name: &str, role: &str) -> MemberRequest {
    MemberRequest {
      name: name.to_string(),
      role: role.to_string(),
    }
  }

  fn convert(src: &TeamRequest) -> Team {
    let mut team = Team::default();
    convert_team_request_to_team(src, &mut team);
    team
  }

  #[test]
  fn test_populated_slice_keeps_order() {
    let src = TeamRequest {
      name: "Engineering".to_string(),
      members: Some(vec![member("Alice", "Lead"), member("Bob", "Developer")]),
      leads: vec![member("Carol", "Manager")],
      tags: vec!["backend".to_string()],
    };
    let team = convert(&src);

    assert_eq!(team.name, "Engineering");
    let members = team.members.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name, "Alice");
    assert_eq!(members[0].role, "Lead");
    assert_eq!(members[1].name, "Bob");
    assert_eq!(team.leads[0].name, "Carol");
    assert_eq!(team.tags, vec!["backend".to_string()]);
  }

  #[test]
  fn test_nil_slice_stays_nil() {
    let team = convert(&TeamRequest::default());
    assert!(team.members.is_none());
  }

  #[test]
  fn test_empty_slice_stays_empty() {
    let src = TeamRequest {
      members: Some(Vec::new()),
      ..TeamRequest::default()
    };
    let team = convert(&src);
    assert_eq!(team.members, Some(Vec::new()));
    assert!(team.leads.is_empty());
  }
}
