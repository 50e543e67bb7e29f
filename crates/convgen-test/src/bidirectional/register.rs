#![cfg(convgen)]

use convgen::{register_bidirectional, Registration};

use super::{OrderApi, OrderDomain, UserApi, UserDomain};

const _: Registration = register_bidirectional::<&UserApi, &UserDomain>();
const _: Registration = register_bidirectional::<&OrderApi, &OrderDomain>();
