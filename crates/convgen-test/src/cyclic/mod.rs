//! Mutually and self-referential structs.

#[cfg(convgen)]
mod register;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/cyclic.rs"));
}

pub use generated::*;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tree {
  pub title: String,
  pub root: Option<Box<Node>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
  pub label: String,
  pub subtree: Option<Box<Tree>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TreeDto {
  pub title: String,
  pub root: Option<Box<NodeDto>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NodeDto {
  pub label: String,
  pub subtree: Option<Box<TreeDto>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Category {
  pub name: String,
  pub children: Vec<Self>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategoryDto {
  pub name: String,
  pub children: Vec<Self>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Menu {
  pub label: String,
  pub submenu: Option<Box<Self>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MenuDto {
  pub label: String,
  pub submenu: Option<Box<Self>>,
}
