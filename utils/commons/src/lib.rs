//! It exposes all common structs, errors and types shared by the ticket
//! contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{calculations::*, constants::*, errors::*, structs::*, types::*};
use concordium_std::*;

mod calculations;
mod constants;
mod errors;
mod structs;
mod types;
