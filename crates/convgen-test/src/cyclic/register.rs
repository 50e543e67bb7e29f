#![cfg(convgen)]

use convgen::*;

use crate::cyclic::{Category, CategoryDto, Menu, MenuDto, Tree, TreeDto};

const _: Registration = register_bidirectional::<Box<Tree>, Box<TreeDto>>();
const _: Registration = register::<Category, CategoryDto>();
const _: Registration = register::<Menu, MenuDto>();
