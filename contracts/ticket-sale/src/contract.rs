use super::*;

/// Initialize the contract with all tickets unowned.
///
/// The instantiating account becomes the contract owner receiving service
/// fees.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The ticket count is zero.
#[init(contract = "TicketSale", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;

    // Construct the initial contract state.
    let state = State::new(state_builder, ctx.init_origin(), params)?;

    Ok(state)
}

/// Buy an unowned ticket at the issue price.
/// Takes the ticket id as a parameter.
///
/// It rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - The ticket id is not issued by this contract.
/// - Sender already owns a ticket.
/// - The ticket is already sold.
/// - The amount differs from the ticket price.
/// - It fails to log `TicketPurchased` event.
#[receive(
    contract = "TicketSale",
    name = "buyTicket",
    parameter = "TicketId",
    mutable,
    enable_logger,
    payable
)]
fn buy_ticket<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let buyer = get_account_address(ctx.sender())?;
    let ticket_id: TicketId = ctx.parameter_cursor().get()?;

    host.state_mut().buy(buyer, ticket_id, amount)?;

    // Event for buying a ticket.
    logger.log(&CustomEvent::TicketPurchased(TicketPurchasedEvent {
        buyer,
        ticket_id,
    }))?;

    Ok(())
}

/// Offer to swap the sender's ticket for another sold ticket.
/// Takes the wanted ticket id as a parameter.
///
/// A previous offer made with the same ticket is replaced.
///
/// It rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - Sender owns no ticket.
/// - The wanted ticket is not issued, unowned or the sender's own.
/// - Sender's ticket is listed for resale.
/// - It fails to log `SwapOffered` event.
#[receive(
    contract = "TicketSale",
    name = "offerSwap",
    parameter = "TicketId",
    mutable,
    enable_logger
)]
fn offer_swap<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let offerer = get_account_address(ctx.sender())?;
    let ticket_id: TicketId = ctx.parameter_cursor().get()?;

    let offer = host.state_mut().offer_swap(offerer, ticket_id)?;

    // Event for offering a swap.
    logger.log(&CustomEvent::SwapOffered(SwapOfferedEvent {
        offerer,
        partner: offer.partner,
        ticket_id,
    }))?;

    Ok(())
}

/// Accept a swap offer made for the sender's ticket.
/// Takes the offerer's ticket id as a parameter.
///
/// It rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - No offer was made with the given ticket.
/// - Sender owns no ticket or not the one the offer asks for.
/// - The wanted ticket changed hands since the offer was made.
/// - Sender's ticket is listed for resale.
/// - It fails to log `SwapAccepted` event.
#[receive(
    contract = "TicketSale",
    name = "acceptSwap",
    parameter = "TicketId",
    mutable,
    enable_logger
)]
fn accept_swap<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let accepter = get_account_address(ctx.sender())?;
    let offerer_ticket: TicketId = ctx.parameter_cursor().get()?;

    let settlement = host.state_mut().accept_swap(accepter, offerer_ticket)?;

    // Event for accepting a swap.
    logger.log(&CustomEvent::SwapAccepted(SwapAcceptedEvent {
        accepter,
        partner: settlement.partner,
        my_ticket_id: settlement.my_ticket,
        partner_ticket_id: settlement.partner_ticket,
    }))?;

    Ok(())
}

/// Withdraw the swap offer made with the sender's ticket.
///
/// It rejects if:
/// - Sender is a contract address.
/// - Sender owns no ticket or made no offer with it.
/// - It fails to log `SwapCancelled` event.
#[receive(contract = "TicketSale", name = "cancelSwap", mutable, enable_logger)]
fn cancel_swap<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = get_account_address(ctx.sender())?;

    let ticket_id = host.state_mut().cancel_swap(owner)?;

    logger.log(&CustomEvent::SwapCancelled(TicketEvent { owner, ticket_id }))?;

    Ok(())
}

/// List the sender's ticket for resale or update the price of its listing.
/// Takes the resale price as a parameter.
///
/// It rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - Sender owns no ticket.
/// - The price is zero.
/// - A swap offer is pending for the sender's ticket.
/// - It fails to log `TicketResaled` event.
#[receive(
    contract = "TicketSale",
    name = "resaleTicket",
    parameter = "Amount",
    mutable,
    enable_logger
)]
fn resale_ticket<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = get_account_address(ctx.sender())?;
    let price: Amount = ctx.parameter_cursor().get()?;

    let ticket_id = host.state_mut().list_for_resale(owner, price)?;

    // Event for listing a ticket.
    logger.log(&CustomEvent::TicketResaled(TicketResaledEvent {
        owner,
        ticket_id,
        price,
    }))?;

    Ok(())
}

/// Buy a ticket listed for resale.
/// Takes the ticket id as a parameter.
///
/// The whole amount is forwarded to the seller.
///
/// It rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - The ticket is not listed.
/// - Sender already owns a ticket.
/// - The amount differs from the listed price.
/// - The transfer to the seller fails.
/// - It fails to log `ResaleAccepted` event.
#[receive(
    contract = "TicketSale",
    name = "acceptResale",
    parameter = "TicketId",
    mutable,
    enable_logger,
    payable
)]
fn accept_resale<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let buyer = get_account_address(ctx.sender())?;
    let ticket_id: TicketId = ctx.parameter_cursor().get()?;

    let listing = host.state_mut().take_resale(buyer, ticket_id, amount)?;

    pay_out(host, &listing.seller, amount)?;

    // Event for buying a resold ticket.
    logger.log(&CustomEvent::ResaleAccepted(ResaleAcceptedEvent {
        buyer,
        seller: listing.seller,
        ticket_id,
        price: listing.price,
    }))?;

    Ok(())
}

/// Remove the resale listing of the sender's ticket.
///
/// It rejects if:
/// - Sender is a contract address.
/// - Sender owns no ticket or it is not listed.
/// - It fails to log `ResaleCancelled` event.
#[receive(contract = "TicketSale", name = "cancelResale", mutable, enable_logger)]
fn cancel_resale<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = get_account_address(ctx.sender())?;

    let ticket_id = host.state_mut().cancel_resale(owner)?;

    logger.log(&CustomEvent::ResaleCancelled(TicketEvent { owner, ticket_id }))?;

    Ok(())
}

/// Give the sender's ticket back to the contract.
///
/// The sender is refunded the ticket price minus the service fee, the fee
/// goes to the contract owner. Pending listing and swap offer of the ticket
/// are dropped.
///
/// It rejects if:
/// - Sender is a contract address.
/// - Sender owns no ticket.
/// - It fails to log `TicketReturned` event.
/// - Either transfer fails.
#[receive(contract = "TicketSale", name = "returnTicket", mutable, enable_logger)]
fn return_ticket<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = get_account_address(ctx.sender())?;

    let ticket_id = host.state_mut().release(owner)?;
    let shares = host.state().refund_shares();
    let contract_owner = host.state().owner;

    // Event for returning a ticket.
    logger.log(&CustomEvent::TicketReturned(TicketEvent { owner, ticket_id }))?;

    pay_out(host, &owner, shares.refund)?;
    pay_out(host, &contract_owner, shares.service_fee)?;

    Ok(())
}

/// View function that returns the ticket held by the given account, `0` if
/// it holds none.
#[receive(
    contract = "TicketSale",
    name = "getTicketOf",
    parameter = "AccountAddress",
    return_value = "TicketId"
)]
fn get_ticket_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TicketId> {
    let account: AccountAddress = ctx.parameter_cursor().get()?;

    Ok(host.state().ticket_of(&account).unwrap_or(NO_TICKET))
}

/// View function that returns the holder of the given ticket.
#[receive(
    contract = "TicketSale",
    name = "ticketOwner",
    parameter = "TicketId",
    return_value = "Option<AccountAddress>"
)]
fn ticket_owner<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<AccountAddress>> {
    let ticket_id: TicketId = ctx.parameter_cursor().get()?;
    let state = host.state();

    state.ensure_issued(ticket_id)?;

    Ok(state.owner_of(ticket_id))
}

/// View function that returns the tickets listed for resale in listing
/// order.
#[receive(
    contract = "TicketSale",
    name = "checkResale",
    return_value = "Vec<TicketId>"
)]
fn check_resale<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<TicketId>> {
    Ok(host.state().listed_tickets())
}

/// View function that returns the resale listing of the given ticket.
#[receive(
    contract = "TicketSale",
    name = "resaleListing",
    parameter = "TicketId",
    return_value = "ResaleListing"
)]
fn resale_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ResaleListing> {
    let ticket_id: TicketId = ctx.parameter_cursor().get()?;

    host.state()
        .resale_listings
        .get(&ticket_id)
        .map(|listing| *listing)
        .ok_or(CustomContractError::TicketNotListedForResale)
}

/// View function that returns the contract configuration and the number of
/// sold tickets.
#[receive(contract = "TicketSale", name = "view", return_value = "ViewState")]
fn view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ViewState> {
    Ok(host.state().view())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const OWNER: AccountAddress = AccountAddress([0u8; 32]);
    const ALICE: AccountAddress = AccountAddress([1u8; 32]);
    const BOB: AccountAddress = AccountAddress([2u8; 32]);
    const CLAIRE: AccountAddress = AccountAddress([3u8; 32]);
    const DAVE: AccountAddress = AccountAddress([4u8; 32]);

    const NUM_TICKETS: TicketId = 5;
    /// 0.01 CCD
    const PRICE: Amount = Amount::from_micro_ccd(10_000);
    const RESALE_PRICE: Amount = Amount::from_micro_ccd(5_000);

    type Host = TestHost<State<TestStateApi>>;
    type CallResult = (ContractResult<()>, TestLogger);

    fn default_params() -> InitParams {
        InitParams {
            num_tickets: NUM_TICKETS,
            ticket_price: PRICE,
        }
    }

    fn default_host() -> Host {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&default_params());
        ctx.set_init_origin(OWNER).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_TicketSale");

        TestHost::new(state, state_builder)
    }

    fn call_buy(
        host: &mut Host,
        buyer: AccountAddress,
        ticket: TicketId,
        amount: Amount,
    ) -> CallResult {
        let bytes = to_bytes(&ticket);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(buyer)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_ticket(&ctx, host, amount, &mut logger);
        (result, logger)
    }

    fn call_offer_swap(
        host: &mut Host,
        offerer: AccountAddress,
        target: TicketId,
    ) -> CallResult {
        let bytes = to_bytes(&target);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(offerer)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = offer_swap(&ctx, host, &mut logger);
        (result, logger)
    }

    fn call_accept_swap(
        host: &mut Host,
        accepter: AccountAddress,
        offerer_ticket: TicketId,
    ) -> CallResult {
        let bytes = to_bytes(&offerer_ticket);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(accepter)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = accept_swap(&ctx, host, &mut logger);
        (result, logger)
    }

    fn call_cancel_swap(host: &mut Host, offerer: AccountAddress) -> CallResult {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(offerer));
        let mut logger = TestLogger::init();

        let result = cancel_swap(&ctx, host, &mut logger);
        (result, logger)
    }

    fn call_resale(host: &mut Host, seller: AccountAddress, price: Amount) -> CallResult {
        let bytes = to_bytes(&price);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(seller)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = resale_ticket(&ctx, host, &mut logger);
        (result, logger)
    }

    fn call_accept_resale(
        host: &mut Host,
        buyer: AccountAddress,
        ticket: TicketId,
        amount: Amount,
    ) -> CallResult {
        let bytes = to_bytes(&ticket);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(buyer)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = accept_resale(&ctx, host, amount, &mut logger);
        (result, logger)
    }

    fn call_cancel_resale(host: &mut Host, seller: AccountAddress) -> CallResult {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(seller));
        let mut logger = TestLogger::init();

        let result = cancel_resale(&ctx, host, &mut logger);
        (result, logger)
    }

    fn call_return(host: &mut Host, holder: AccountAddress) -> CallResult {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(holder));
        let mut logger = TestLogger::init();

        let result = return_ticket(&ctx, host, &mut logger);
        (result, logger)
    }

    /// Calls a payable function the way the chain does, crediting the
    /// attached amount to the contract before the call.
    fn with_deposit(
        host: &mut Host,
        amount: Amount,
        call: impl FnOnce(&mut Host) -> CallResult,
    ) -> CallResult {
        let balance = host.self_balance();
        host.set_self_balance(balance + amount);
        call(host)
    }

    fn ticket_of(host: &Host, account: AccountAddress) -> TicketId {
        let bytes = to_bytes(&account);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        get_ticket_of(&ctx, host).expect_report("Failed to call getTicketOf")
    }

    fn owner_of(host: &Host, ticket: TicketId) -> Option<AccountAddress> {
        let bytes = to_bytes(&ticket);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        ticket_owner(&ctx, host).expect_report("Failed to call ticketOwner")
    }

    fn listed(host: &Host) -> Vec<TicketId> {
        let ctx = TestReceiveContext::empty();
        check_resale(&ctx, host).expect_report("Failed to call checkResale")
    }

    fn claim_logged(logger: &TestLogger, event: CustomEvent) {
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(logger.logs[0], to_bytes(&event), "Unexpected event");
    }

    /// Every holder maps back to its ticket and every sold ticket to its
    /// holder.
    fn claim_registry_consistent(host: &Host, accounts: &[AccountAddress]) {
        for account in accounts {
            let ticket = ticket_of(host, *account);
            if ticket != NO_TICKET {
                claim_eq!(owner_of(host, ticket), Some(*account));
            }
        }
        for ticket in 1..=NUM_TICKETS {
            if let Some(owner) = owner_of(host, ticket) {
                claim_eq!(ticket_of(host, owner), ticket);
            }
        }
    }

    /// Alice holds ticket 1 and Bob ticket 2.
    fn host_with_two_holders() -> Host {
        let mut host = default_host();
        claim_eq!(call_buy(&mut host, ALICE, 1, PRICE).0, Ok(()));
        claim_eq!(call_buy(&mut host, BOB, 2, PRICE).0, Ok(()));
        host
    }

    /// Test initialization succeeds.
    #[concordium_test]
    fn test_init() {
        let host = default_host();
        let ctx = TestReceiveContext::empty();

        let result = view(&ctx, &host).expect_report("Failed to call view");

        claim_eq!(
            result,
            ViewState {
                owner: OWNER,
                num_tickets: NUM_TICKETS,
                ticket_price: PRICE,
                tickets_sold: 0,
            }
        );
        claim!(listed(&host).is_empty(), "No listings should be initialized");
        for ticket in 1..=NUM_TICKETS {
            claim_eq!(owner_of(&host, ticket), None);
        }
    }

    #[concordium_test]
    fn test_init_rejects_zero_tickets() {
        let mut state_builder = TestStateBuilder::new();
        let params = InitParams {
            num_tickets: 0,
            ..default_params()
        };

        let result = State::new(&mut state_builder, OWNER, params);

        claim_eq!(result.err(), Some(CustomContractError::InvalidTicketCount));
    }

    /// The init parameter is the ticket count followed by the ticket price,
    /// the service fee is not configurable.
    #[concordium_test]
    fn test_init_takes_count_and_price() {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&(NUM_TICKETS, PRICE));
        ctx.set_init_origin(OWNER).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_TicketSale");

        claim_eq!(state.num_tickets, NUM_TICKETS);
        claim_eq!(state.ticket_price, PRICE);
        claim_eq!(
            state.refund_shares(),
            RefundShares {
                refund: Amount::from_micro_ccd(9_000),
                service_fee: Amount::from_micro_ccd(1_000),
            }
        );
    }

    #[concordium_test]
    fn test_buy_ticket() {
        let mut host = default_host();

        let (result, logger) = call_buy(&mut host, ALICE, 1, PRICE);

        claim_eq!(result, Ok(()));
        claim_eq!(ticket_of(&host, ALICE), 1, "Alice should own ticket #1");
        claim_eq!(owner_of(&host, 1), Some(ALICE));
        claim_logged(
            &logger,
            CustomEvent::TicketPurchased(TicketPurchasedEvent {
                buyer: ALICE,
                ticket_id: 1,
            }),
        );

        let event = CustomEvent::deserial(&mut Cursor::new(&logger.logs[0]))
            .expect_report("Failed to parse the logged event");
        claim_eq!(
            event,
            CustomEvent::TicketPurchased(TicketPurchasedEvent {
                buyer: ALICE,
                ticket_id: 1,
            })
        );
    }

    #[concordium_test]
    fn test_buy_second_ticket_rejected() {
        let mut host = default_host();
        claim_eq!(call_buy(&mut host, ALICE, 1, PRICE).0, Ok(()));

        let (result, logger) = call_buy(&mut host, ALICE, 2, PRICE);

        claim_eq!(result, Err(CustomContractError::AlreadyOwnsTicket));
        claim!(logger.logs.is_empty(), "No event should be logged");
        claim_eq!(ticket_of(&host, ALICE), 1);
        claim_eq!(owner_of(&host, 2), None);
    }

    #[concordium_test]
    fn test_buy_sold_ticket_rejected() {
        let mut host = default_host();
        claim_eq!(call_buy(&mut host, ALICE, 1, PRICE).0, Ok(()));

        let (result, _) = call_buy(&mut host, BOB, 1, PRICE);

        claim_eq!(result, Err(CustomContractError::TicketAlreadySold));
        claim_eq!(owner_of(&host, 1), Some(ALICE));
        claim_eq!(ticket_of(&host, BOB), NO_TICKET);
    }

    #[concordium_test]
    fn test_buy_with_wrong_payment_rejected() {
        let mut host = default_host();

        let (result, _) = call_buy(&mut host, ALICE, 1, Amount::from_micro_ccd(9_999));
        claim_eq!(result, Err(CustomContractError::IncorrectPayment));

        let (result, _) = call_buy(&mut host, ALICE, 1, Amount::from_micro_ccd(10_001));
        claim_eq!(result, Err(CustomContractError::IncorrectPayment));

        claim_eq!(ticket_of(&host, ALICE), NO_TICKET);
        claim_eq!(owner_of(&host, 1), None);
    }

    #[concordium_test]
    fn test_buy_unissued_ticket_rejected() {
        let mut host = default_host();

        claim_eq!(
            call_buy(&mut host, ALICE, 0, PRICE).0,
            Err(CustomContractError::InvalidTicketId)
        );
        claim_eq!(
            call_buy(&mut host, ALICE, NUM_TICKETS + 1, PRICE).0,
            Err(CustomContractError::InvalidTicketId)
        );
    }

    #[concordium_test]
    fn test_buy_from_contract_rejected() {
        let mut host = default_host();
        let bytes = to_bytes(&1u32);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(ContractAddress {
            index: 1,
            subindex: 0,
        }))
        .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = buy_ticket(&ctx, &mut host, PRICE, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
        claim_eq!(owner_of(&host, 1), None);
    }

    #[concordium_test]
    fn test_swap() {
        let mut host = host_with_two_holders();

        let (result, logger) = call_offer_swap(&mut host, ALICE, 2);
        claim_eq!(result, Ok(()));
        claim_logged(
            &logger,
            CustomEvent::SwapOffered(SwapOfferedEvent {
                offerer: ALICE,
                partner: BOB,
                ticket_id: 2,
            }),
        );

        let (result, logger) = call_accept_swap(&mut host, BOB, 1);
        claim_eq!(result, Ok(()));
        claim_logged(
            &logger,
            CustomEvent::SwapAccepted(SwapAcceptedEvent {
                accepter: BOB,
                partner: ALICE,
                my_ticket_id: 2,
                partner_ticket_id: 1,
            }),
        );

        claim_eq!(ticket_of(&host, ALICE), 2, "After swap, Alice should have #2");
        claim_eq!(ticket_of(&host, BOB), 1, "After swap, Bob should have #1");
        claim!(!host.state().has_swap_offer(1), "Offer should be consumed");
        claim_registry_consistent(&host, &[ALICE, BOB]);

        // A consumed offer cannot be accepted twice.
        claim_eq!(
            call_accept_swap(&mut host, ALICE, 1).0,
            Err(CustomContractError::NoSwapOffer)
        );
    }

    #[concordium_test]
    fn test_offer_swap_rejections() {
        let mut host = host_with_two_holders();

        claim_eq!(
            call_offer_swap(&mut host, CLAIRE, 1).0,
            Err(CustomContractError::NoTicketOwned)
        );
        claim_eq!(
            call_offer_swap(&mut host, ALICE, 1).0,
            Err(CustomContractError::SelfSwap)
        );
        claim_eq!(
            call_offer_swap(&mut host, ALICE, 3).0,
            Err(CustomContractError::TargetTicketUnowned)
        );
        claim_eq!(
            call_offer_swap(&mut host, ALICE, NUM_TICKETS + 1).0,
            Err(CustomContractError::InvalidTicketId)
        );
        claim!(!host.state().has_swap_offer(1), "No offer should be recorded");
    }

    #[concordium_test]
    fn test_accept_swap_rejections() {
        let mut host = host_with_two_holders();
        claim_eq!(call_buy(&mut host, CLAIRE, 3, PRICE).0, Ok(()));

        claim_eq!(
            call_accept_swap(&mut host, BOB, 1).0,
            Err(CustomContractError::NoSwapOffer)
        );

        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));

        claim_eq!(
            call_accept_swap(&mut host, CLAIRE, 1).0,
            Err(CustomContractError::SwapTargetMismatch)
        );
        claim_eq!(
            call_accept_swap(&mut host, DAVE, 1).0,
            Err(CustomContractError::NoTicketOwned)
        );

        claim_eq!(ticket_of(&host, ALICE), 1);
        claim_eq!(ticket_of(&host, BOB), 2);
        claim_eq!(ticket_of(&host, CLAIRE), 3);
        claim!(host.state().has_swap_offer(1), "Offer should still be pending");
    }

    #[concordium_test]
    fn test_new_offer_replaces_previous() {
        let mut host = host_with_two_holders();
        claim_eq!(call_buy(&mut host, CLAIRE, 3, PRICE).0, Ok(()));

        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));
        claim_eq!(call_offer_swap(&mut host, ALICE, 3).0, Ok(()));

        claim_eq!(
            call_accept_swap(&mut host, BOB, 1).0,
            Err(CustomContractError::SwapTargetMismatch)
        );
        claim_eq!(call_accept_swap(&mut host, CLAIRE, 1).0, Ok(()));
        claim_eq!(ticket_of(&host, ALICE), 3);
        claim_eq!(ticket_of(&host, CLAIRE), 1);
        claim_eq!(ticket_of(&host, BOB), 2);
    }

    #[concordium_test]
    fn test_stale_swap_offer_rejected() {
        let mut host = host_with_two_holders();
        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));

        // Bob sells the wanted ticket on before accepting.
        claim_eq!(call_resale(&mut host, BOB, RESALE_PRICE).0, Ok(()));
        let (result, _) = with_deposit(&mut host, RESALE_PRICE, |host| {
            call_accept_resale(host, CLAIRE, 2, RESALE_PRICE)
        });
        claim_eq!(result, Ok(()));

        let (result, logger) = call_accept_swap(&mut host, CLAIRE, 1);

        claim_eq!(result, Err(CustomContractError::StaleSwapOffer));
        claim!(logger.logs.is_empty(), "No event should be logged");
        claim_eq!(ticket_of(&host, ALICE), 1);
        claim_eq!(ticket_of(&host, CLAIRE), 2);
    }

    #[concordium_test]
    fn test_swap_offer_stale_after_return() {
        let mut host = host_with_two_holders();
        host.set_self_balance(PRICE * 2);
        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));

        // Bob returns the wanted ticket and Claire buys it from the contract.
        claim_eq!(call_return(&mut host, BOB).0, Ok(()));
        claim_eq!(call_buy(&mut host, CLAIRE, 2, PRICE).0, Ok(()));

        let (result, logger) = call_accept_swap(&mut host, CLAIRE, 1);

        claim_eq!(result, Err(CustomContractError::StaleSwapOffer));
        claim!(logger.logs.is_empty(), "No event should be logged");
        claim_eq!(ticket_of(&host, ALICE), 1);
        claim_eq!(ticket_of(&host, CLAIRE), 2);
        claim!(host.state().has_swap_offer(1), "Offer should stay pending");
    }

    #[concordium_test]
    fn test_swap_drops_offer_of_accepter() {
        let mut host = host_with_two_holders();
        claim_eq!(call_buy(&mut host, CLAIRE, 3, PRICE).0, Ok(()));

        // Bob wants Claire's ticket but swaps with Alice first.
        claim_eq!(call_offer_swap(&mut host, BOB, 3).0, Ok(()));
        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));
        claim_eq!(call_accept_swap(&mut host, BOB, 1).0, Ok(()));

        claim!(!host.state().has_swap_offer(2), "Bob's offer should be void");
        claim_eq!(
            call_accept_swap(&mut host, CLAIRE, 2).0,
            Err(CustomContractError::NoSwapOffer)
        );
    }

    #[concordium_test]
    fn test_cancel_swap() {
        let mut host = host_with_two_holders();
        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));

        let (result, logger) = call_cancel_swap(&mut host, ALICE);

        claim_eq!(result, Ok(()));
        claim_logged(
            &logger,
            CustomEvent::SwapCancelled(TicketEvent {
                owner: ALICE,
                ticket_id: 1,
            }),
        );
        claim_eq!(
            call_accept_swap(&mut host, BOB, 1).0,
            Err(CustomContractError::NoSwapOffer)
        );
        claim_eq!(
            call_cancel_swap(&mut host, ALICE).0,
            Err(CustomContractError::NoSwapOffer)
        );
        claim_eq!(
            call_cancel_swap(&mut host, CLAIRE).0,
            Err(CustomContractError::NoTicketOwned)
        );
    }

    #[concordium_test]
    fn test_resale() {
        let mut host = host_with_two_holders();

        let (result, logger) = call_resale(&mut host, ALICE, RESALE_PRICE);
        claim_eq!(result, Ok(()));
        claim_logged(
            &logger,
            CustomEvent::TicketResaled(TicketResaledEvent {
                owner: ALICE,
                ticket_id: 1,
                price: RESALE_PRICE,
            }),
        );
        claim_eq!(listed(&host), vec![1]);

        let (result, logger) = with_deposit(&mut host, RESALE_PRICE, |host| {
            call_accept_resale(host, CLAIRE, 1, RESALE_PRICE)
        });
        claim_eq!(result, Ok(()));
        claim_logged(
            &logger,
            CustomEvent::ResaleAccepted(ResaleAcceptedEvent {
                buyer: CLAIRE,
                seller: ALICE,
                ticket_id: 1,
                price: RESALE_PRICE,
            }),
        );

        claim_eq!(ticket_of(&host, CLAIRE), 1, "Claire should now own ticket #1");
        claim_eq!(ticket_of(&host, ALICE), NO_TICKET);
        claim!(host.transfer_occurred(&ALICE, RESALE_PRICE));
        claim_eq!(host.self_balance(), Amount::zero());
        claim!(listed(&host).is_empty(), "No tickets should be on resale");
        claim_registry_consistent(&host, &[ALICE, BOB, CLAIRE]);
    }

    #[concordium_test]
    fn test_resale_ticket_rejections() {
        let mut host = host_with_two_holders();

        claim_eq!(
            call_resale(&mut host, CLAIRE, RESALE_PRICE).0,
            Err(CustomContractError::NoTicketOwned)
        );
        claim_eq!(
            call_resale(&mut host, ALICE, Amount::zero()).0,
            Err(CustomContractError::ZeroResalePrice)
        );

        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));
        claim_eq!(
            call_resale(&mut host, ALICE, RESALE_PRICE).0,
            Err(CustomContractError::SwapOfferPending)
        );
        claim!(listed(&host).is_empty(), "Nothing should be listed");
    }

    #[concordium_test]
    fn test_listed_ticket_cannot_be_swapped() {
        let mut host = host_with_two_holders();
        claim_eq!(call_resale(&mut host, ALICE, RESALE_PRICE).0, Ok(()));

        claim_eq!(
            call_offer_swap(&mut host, ALICE, 2).0,
            Err(CustomContractError::TicketListedForResale)
        );

        // The listed ticket may still be wanted, but not handed over while
        // listed.
        claim_eq!(call_offer_swap(&mut host, BOB, 1).0, Ok(()));
        claim_eq!(
            call_accept_swap(&mut host, ALICE, 2).0,
            Err(CustomContractError::TicketListedForResale)
        );

        claim_eq!(call_cancel_resale(&mut host, ALICE).0, Ok(()));
        claim_eq!(call_accept_swap(&mut host, ALICE, 2).0, Ok(()));
        claim_eq!(ticket_of(&host, ALICE), 2);
        claim_eq!(ticket_of(&host, BOB), 1);
    }

    #[concordium_test]
    fn test_accept_resale_rejections() {
        let mut host = host_with_two_holders();

        claim_eq!(
            call_accept_resale(&mut host, CLAIRE, 1, RESALE_PRICE).0,
            Err(CustomContractError::TicketNotListedForResale)
        );

        claim_eq!(call_resale(&mut host, ALICE, RESALE_PRICE).0, Ok(()));

        claim_eq!(
            call_accept_resale(&mut host, BOB, 1, RESALE_PRICE).0,
            Err(CustomContractError::AlreadyOwnsTicket)
        );
        claim_eq!(
            call_accept_resale(&mut host, ALICE, 1, RESALE_PRICE).0,
            Err(CustomContractError::AlreadyOwnsTicket)
        );
        claim_eq!(
            call_accept_resale(&mut host, CLAIRE, 1, PRICE).0,
            Err(CustomContractError::IncorrectPayment)
        );

        claim_eq!(ticket_of(&host, ALICE), 1);
        claim_eq!(listed(&host), vec![1]);
        claim!(!host.transfer_occurred(&ALICE, RESALE_PRICE));
    }

    #[concordium_test]
    fn test_check_resale_keeps_listing_order() {
        let mut host = default_host();
        claim_eq!(call_buy(&mut host, ALICE, 3, PRICE).0, Ok(()));
        claim_eq!(call_buy(&mut host, BOB, 1, PRICE).0, Ok(()));
        claim_eq!(call_buy(&mut host, CLAIRE, 2, PRICE).0, Ok(()));

        claim_eq!(call_resale(&mut host, ALICE, RESALE_PRICE).0, Ok(()));
        claim_eq!(call_resale(&mut host, BOB, PRICE).0, Ok(()));
        claim_eq!(call_resale(&mut host, CLAIRE, RESALE_PRICE).0, Ok(()));
        claim_eq!(listed(&host), vec![3, 1, 2]);

        // Relisting updates the price in place.
        claim_eq!(call_resale(&mut host, ALICE, PRICE).0, Ok(()));
        claim_eq!(listed(&host), vec![3, 1, 2]);
        claim_eq!(
            host.state().resale_listings.get(&3).map(|listing| *listing),
            Some(ResaleListing {
                seller: ALICE,
                price: PRICE,
            })
        );

        let (result, logger) = call_cancel_resale(&mut host, BOB);
        claim_eq!(result, Ok(()));
        claim_logged(
            &logger,
            CustomEvent::ResaleCancelled(TicketEvent {
                owner: BOB,
                ticket_id: 1,
            }),
        );
        claim_eq!(listed(&host), vec![3, 2]);
        claim_eq!(
            call_cancel_resale(&mut host, BOB).0,
            Err(CustomContractError::TicketNotListedForResale)
        );
    }

    #[concordium_test]
    fn test_resale_listing_view() {
        let mut host = host_with_two_holders();
        claim_eq!(call_resale(&mut host, BOB, RESALE_PRICE).0, Ok(()));

        let bytes = to_bytes(&2u32);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(
            resale_listing(&ctx, &host),
            Ok(ResaleListing {
                seller: BOB,
                price: RESALE_PRICE,
            })
        );

        let bytes = to_bytes(&1u32);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        claim_eq!(
            resale_listing(&ctx, &host),
            Err(CustomContractError::TicketNotListedForResale)
        );
    }

    #[concordium_test]
    fn test_return_ticket() {
        let mut host = default_host();
        let (result, _) =
            with_deposit(&mut host, PRICE, |host| call_buy(host, ALICE, 3, PRICE));
        claim_eq!(result, Ok(()));
        claim_eq!(ticket_of(&host, ALICE), 3, "Alice should own ticket #3");

        let (result, logger) = call_return(&mut host, ALICE);

        claim_eq!(result, Ok(()));
        claim_logged(
            &logger,
            CustomEvent::TicketReturned(TicketEvent {
                owner: ALICE,
                ticket_id: 3,
            }),
        );
        // 0.009 CCD refund and 0.001 CCD service fee.
        claim!(host.transfer_occurred(&ALICE, Amount::from_micro_ccd(9_000)));
        claim!(host.transfer_occurred(&OWNER, Amount::from_micro_ccd(1_000)));
        claim_eq!(host.self_balance(), Amount::zero());

        claim_eq!(owner_of(&host, 3), None, "Ticket #3 should now be unowned");
        claim_eq!(ticket_of(&host, ALICE), NO_TICKET);

        // The returned ticket is on sale again.
        claim_eq!(call_buy(&mut host, BOB, 3, PRICE).0, Ok(()));
    }

    #[concordium_test]
    fn test_return_without_ticket_rejected() {
        let mut host = default_host();

        let (result, logger) = call_return(&mut host, ALICE);

        claim_eq!(result, Err(CustomContractError::NoTicketOwned));
        claim!(logger.logs.is_empty(), "No event should be logged");
    }

    #[concordium_test]
    fn test_return_drops_listing_and_offer() {
        let mut host = host_with_two_holders();
        host.set_self_balance(PRICE * 2);

        claim_eq!(call_resale(&mut host, BOB, RESALE_PRICE).0, Ok(()));
        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));

        claim_eq!(call_return(&mut host, BOB).0, Ok(()));
        claim!(listed(&host).is_empty(), "Listing should be dropped");

        claim_eq!(call_return(&mut host, ALICE).0, Ok(()));
        claim!(!host.state().has_swap_offer(1), "Offer should be dropped");

        // A new holder of ticket #2 finds no offer for it.
        claim_eq!(call_buy(&mut host, CLAIRE, 2, PRICE).0, Ok(()));
        claim_eq!(
            call_accept_swap(&mut host, CLAIRE, 1).0,
            Err(CustomContractError::NoSwapOffer)
        );
    }

    #[concordium_test]
    fn test_ticket_owner_rejects_unissued_ticket() {
        let host = default_host();
        let bytes = to_bytes(&0u32);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);

        claim_eq!(
            ticket_owner(&ctx, &host),
            Err(CustomContractError::InvalidTicketId)
        );
    }

    #[concordium_test]
    fn test_balance_conservation() {
        let mut host = default_host();

        // Purchases keep the payment.
        let (result, _) =
            with_deposit(&mut host, PRICE, |host| call_buy(host, ALICE, 1, PRICE));
        claim_eq!(result, Ok(()));
        let (result, _) =
            with_deposit(&mut host, PRICE, |host| call_buy(host, BOB, 2, PRICE));
        claim_eq!(result, Ok(()));
        claim_eq!(host.self_balance(), PRICE * 2);

        // Swaps move no funds.
        claim_eq!(call_offer_swap(&mut host, ALICE, 2).0, Ok(()));
        claim_eq!(call_accept_swap(&mut host, BOB, 1).0, Ok(()));
        claim_eq!(host.self_balance(), PRICE * 2);

        // Resales pass the payment through.
        claim_eq!(call_resale(&mut host, ALICE, RESALE_PRICE).0, Ok(()));
        let (result, _) = with_deposit(&mut host, RESALE_PRICE, |host| {
            call_accept_resale(host, CLAIRE, 2, RESALE_PRICE)
        });
        claim_eq!(result, Ok(()));
        claim_eq!(host.self_balance(), PRICE * 2);

        // Returns pay out the whole price.
        claim_eq!(call_return(&mut host, CLAIRE).0, Ok(()));
        claim_eq!(host.self_balance(), PRICE);

        claim_registry_consistent(&host, &[ALICE, BOB, CLAIRE, DAVE]);
        let ctx = TestReceiveContext::empty();
        let state = view(&ctx, &host).expect_report("Failed to call view");
        claim_eq!(state.tickets_sold, 1);
    }
}
