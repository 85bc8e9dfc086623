use crate::{Percentage, TicketId};

/// Tag for the TicketPurchased event.
pub const TICKET_PURCHASED_TAG: u8 = u8::MAX;

/// Tag for the SwapOffered event.
pub const SWAP_OFFERED_TAG: u8 = u8::MAX - 1;

/// Tag for the SwapAccepted event.
pub const SWAP_ACCEPTED_TAG: u8 = u8::MAX - 2;

/// Tag for the SwapCancelled event.
pub const SWAP_CANCELLED_TAG: u8 = u8::MAX - 3;

/// Tag for the TicketResaled event.
pub const TICKET_RESALED_TAG: u8 = u8::MAX - 4;

/// Tag for the ResaleAccepted event.
pub const RESALE_ACCEPTED_TAG: u8 = u8::MAX - 5;

/// Tag for the ResaleCancelled event.
pub const RESALE_CANCELLED_TAG: u8 = u8::MAX - 6;

/// Tag for the TicketReturned event.
pub const TICKET_RETURNED_TAG: u8 = u8::MAX - 7;

/// Ticket id reported for accounts holding no ticket.
pub const NO_TICKET: TicketId = 0;

/// Share of the ticket price kept on return.
pub const SERVICE_FEE: Percentage = Percentage::from_percent(10);
