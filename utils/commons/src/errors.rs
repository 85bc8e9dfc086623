use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Failed to invoke a transfer (Error code: -4).
    InvokeTransferError,
    /// Only account addresses can hold tickets (Error code: -5).
    OnlyAccountAddress,
    /// Ticket count must be positive (Error code: -6).
    InvalidTicketCount,
    /// Ticket id outside of the issued range (Error code: -7).
    InvalidTicketId,
    /// You already own a ticket (Error code: -8).
    AlreadyOwnsTicket,
    /// You do not own a ticket (Error code: -9).
    NoTicketOwned,
    /// Ticket has already been sold (Error code: -10).
    TicketAlreadySold,
    /// Attached amount differs from the asked price (Error code: -11).
    IncorrectPayment,
    /// Swap target is not owned by anyone (Error code: -12).
    TargetTicketUnowned,
    /// A ticket cannot be swapped with itself (Error code: -13).
    SelfSwap,
    /// No swap offer exists for this ticket (Error code: -14).
    NoSwapOffer,
    /// The swap offer targets another ticket (Error code: -15).
    SwapTargetMismatch,
    /// Ownership changed since the swap offer was made (Error code: -16).
    StaleSwapOffer,
    /// A swap offer is pending for this ticket (Error code: -17).
    SwapOfferPending,
    /// Ticket is not listed for resale (Error code: -18).
    TicketNotListedForResale,
    /// Ticket is listed for resale (Error code: -19).
    TicketListedForResale,
    /// Resale price must be positive (Error code: -20).
    ZeroResalePrice,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to transfers to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}
