#![cfg(convgen)]

use super::{DifferentFields, SameFields, TargetDiff, TargetSame};

const _: convgen::Registration = convgen::register::<&SameFields, &TargetSame>();
const _: convgen::Registration = convgen::register::<&DifferentFields, &TargetDiff>();
