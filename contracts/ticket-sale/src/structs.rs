use super::*;

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Account receiving the service fees of returned tickets.
    pub owner: AccountAddress,
    /// Number of issued tickets, valid ids are `1..=num_tickets`.
    pub num_tickets: TicketId,
    /// Issue price of every ticket.
    pub ticket_price: Amount,
    /// Current holder of every sold ticket.
    pub ticket_owners: StateMap<TicketId, AccountAddress, S>,
    /// Ticket held by every holder.
    pub holders: StateMap<AccountAddress, TicketId, S>,
    /// Pending swap offers keyed by the offerer's ticket.
    pub swap_offers: StateMap<TicketId, SwapOffer, S>,
    /// Resale listings keyed by the listed ticket.
    pub resale_listings: StateMap<TicketId, ResaleListing, S>,
    /// Listed tickets in listing order.
    pub resale_order: Vec<TicketId>,
}

/// Init parameter.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Number of tickets to issue.
    pub num_tickets: TicketId,
    /// Issue price of every ticket.
    pub ticket_price: Amount,
}

/// A proposal to exchange the offerer's ticket for `target_ticket`.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct SwapOffer {
    pub offerer: AccountAddress,
    /// Holder of `target_ticket` when the offer was made.
    pub partner: AccountAddress,
    pub target_ticket: TicketId,
}

#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct ResaleListing {
    pub seller: AccountAddress,
    pub price: Amount,
}

/// Return value of the `view` function.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ViewState {
    pub owner: AccountAddress,
    pub num_tickets: TicketId,
    pub ticket_price: Amount,
    pub tickets_sold: u32,
}

/// Outcome of an accepted swap, seen from the accepting side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapSettlement {
    pub partner: AccountAddress,
    /// Ticket the accepter gave away.
    pub my_ticket: TicketId,
    /// Ticket the accepter received.
    pub partner_ticket: TicketId,
}
