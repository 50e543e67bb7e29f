//! Expansion of registration directives into conversion pairs.

use crate::pair::{ConversionPair, PairSide};

/// A `register::<From, To>()` or `register_bidirectional::<From, To>()` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationDirective {
  pub from: PairSide,
  pub to: PairSide,
  pub bidirectional: bool,
}

impl RegistrationDirective {
  pub fn forward(from: PairSide, to: PairSide) -> Self {
    Self {
      from,
      to,
      bidirectional: false,
    }
  }

  pub fn bidirectional(from: PairSide, to: PairSide) -> Self {
    Self {
      from,
      to,
      bidirectional: true,
    }
  }
}

/// One pair per forward directive, forward then reverse for a bidirectional
/// one. Discovery order is kept and nothing is deduplicated here.
pub fn expand(directives: &[RegistrationDirective]) -> Vec<ConversionPair> {
  let mut pairs = Vec::with_capacity(directives.len() * 2);
  for directive in directives {
    let forward = ConversionPair::new(directive.from.clone(), directive.to.clone());
    if directive.bidirectional {
      let reverse = forward.reversed();
      pairs.push(forward);
      pairs.push(reverse);
    } else {
      pairs.push(forward);
    }
  }
  pairs
}
