//! A ticket sale smart contract.
//!
//! # Description
//! The contract issues a fixed number of tickets, numbered from `1`, all at
//! the same price. Every account can hold at most one ticket at a time.
//!
//! Tickets change hands in four ways:
//! - `buyTicket` sells an unowned ticket at the issue price and keeps the
//!   payment.
//! - `offerSwap`/`acceptSwap` exchange two tickets between their holders.
//! - `resaleTicket`/`acceptResale` let a holder sell their ticket on, the
//!   buyer's payment goes straight to the seller.
//! - `returnTicket` gives the ticket back to the contract, the holder is
//!   refunded the issue price minus the service fee, which goes to the
//!   contract owner.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, helper::*, structs::*};
use commons::*;
use concordium_std::*;

mod contract;
mod events;
mod helper;
mod impls;
mod structs;
