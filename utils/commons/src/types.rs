use super::*;

pub type ContractResult<A> = Result<A, CustomContractError>;

/// Ticket identifier. Valid tickets are numbered from `1` up to the ticket
/// count fixed at init, `0` is reserved for "no ticket".
pub type TicketId = u32;
