use super::*;

/// Split of a returned ticket's price.
#[derive(SchemaType, Serialize, Eq, PartialEq, Debug, Clone, Copy)]
pub struct RefundShares {
    /// Paid back to the account returning the ticket.
    pub refund: Amount,
    /// Kept by the contract owner.
    pub service_fee: Amount,
}
