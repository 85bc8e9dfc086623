use super::*;

mod percentage;
mod refund_shares;

pub use self::{percentage::*, refund_shares::*};
