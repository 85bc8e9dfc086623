use super::*;

/// An untagged event of a ticket bought at the issue price.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct TicketPurchasedEvent {
    pub buyer: AccountAddress,
    pub ticket_id: TicketId,
}

/// An untagged event of a swap offer.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct SwapOfferedEvent {
    pub offerer: AccountAddress,
    /// Holder of the wanted ticket.
    pub partner: AccountAddress,
    /// The wanted ticket.
    pub ticket_id: TicketId,
}

/// An untagged event of an accepted swap. Ticket ids are the holdings
/// before the swap.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct SwapAcceptedEvent {
    pub accepter: AccountAddress,
    pub partner: AccountAddress,
    pub my_ticket_id: TicketId,
    pub partner_ticket_id: TicketId,
}

/// An untagged event of a withdrawn swap offer or resale listing.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct TicketEvent {
    pub owner: AccountAddress,
    pub ticket_id: TicketId,
}

/// An untagged event of a ticket listed for resale.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct TicketResaledEvent {
    pub owner: AccountAddress,
    pub ticket_id: TicketId,
    pub price: Amount,
}

/// An untagged event of a settled resale.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ResaleAcceptedEvent {
    pub buyer: AccountAddress,
    pub seller: AccountAddress,
    pub ticket_id: TicketId,
    pub price: Amount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum CustomEvent {
    /// Buying a ticket
    TicketPurchased(TicketPurchasedEvent),
    /// Offering a swap
    SwapOffered(SwapOfferedEvent),
    /// Accepting a swap
    SwapAccepted(SwapAcceptedEvent),
    /// Withdrawing a swap offer
    SwapCancelled(TicketEvent),
    /// Listing a ticket for resale
    TicketResaled(TicketResaledEvent),
    /// Buying a resold ticket
    ResaleAccepted(ResaleAcceptedEvent),
    /// Removing a resale listing
    ResaleCancelled(TicketEvent),
    /// Returning a ticket
    TicketReturned(TicketEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::TicketPurchased(event) => {
                out.write_u8(TICKET_PURCHASED_TAG)?;
                event.serial(out)
            }
            CustomEvent::SwapOffered(event) => {
                out.write_u8(SWAP_OFFERED_TAG)?;
                event.serial(out)
            }
            CustomEvent::SwapAccepted(event) => {
                out.write_u8(SWAP_ACCEPTED_TAG)?;
                event.serial(out)
            }
            CustomEvent::SwapCancelled(event) => {
                out.write_u8(SWAP_CANCELLED_TAG)?;
                event.serial(out)
            }
            CustomEvent::TicketResaled(event) => {
                out.write_u8(TICKET_RESALED_TAG)?;
                event.serial(out)
            }
            CustomEvent::ResaleAccepted(event) => {
                out.write_u8(RESALE_ACCEPTED_TAG)?;
                event.serial(out)
            }
            CustomEvent::ResaleCancelled(event) => {
                out.write_u8(RESALE_CANCELLED_TAG)?;
                event.serial(out)
            }
            CustomEvent::TicketReturned(event) => {
                out.write_u8(TICKET_RETURNED_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            TICKET_PURCHASED_TAG => {
                TicketPurchasedEvent::deserial(source).map(CustomEvent::TicketPurchased)
            }
            SWAP_OFFERED_TAG => SwapOfferedEvent::deserial(source).map(CustomEvent::SwapOffered),
            SWAP_ACCEPTED_TAG => {
                SwapAcceptedEvent::deserial(source).map(CustomEvent::SwapAccepted)
            }
            SWAP_CANCELLED_TAG => TicketEvent::deserial(source).map(CustomEvent::SwapCancelled),
            TICKET_RESALED_TAG => {
                TicketResaledEvent::deserial(source).map(CustomEvent::TicketResaled)
            }
            RESALE_ACCEPTED_TAG => {
                ResaleAcceptedEvent::deserial(source).map(CustomEvent::ResaleAccepted)
            }
            RESALE_CANCELLED_TAG => TicketEvent::deserial(source).map(CustomEvent::ResaleCancelled),
            TICKET_RETURNED_TAG => TicketEvent::deserial(source).map(CustomEvent::TicketReturned),
            _ => Err(ParseError::default()),
        }
    }
}
