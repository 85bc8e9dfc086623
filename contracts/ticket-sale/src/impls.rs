use super::*;

// Functions for creating and updating the contract state.
//
// Every mutating function checks all of its preconditions before touching
// the state, so a rejection never leaves a partial update behind.
impl<S: HasStateApi> State<S> {
    /// Creates a new state with all tickets unowned and no offers or
    /// listings.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        owner: AccountAddress,
        params: InitParams,
    ) -> ContractResult<Self> {
        ensure!(
            params.num_tickets > 0,
            CustomContractError::InvalidTicketCount
        );

        Ok(Self {
            owner,
            num_tickets: params.num_tickets,
            ticket_price: params.ticket_price,
            ticket_owners: state_builder.new_map(),
            holders: state_builder.new_map(),
            swap_offers: state_builder.new_map(),
            resale_listings: state_builder.new_map(),
            resale_order: Vec::new(),
        })
    }

    /// Ticket held by `account`, if any.
    pub fn ticket_of(&self, account: &AccountAddress) -> Option<TicketId> {
        self.holders.get(account).map(|ticket| *ticket)
    }

    /// Holder of `ticket`, if it is sold.
    pub fn owner_of(&self, ticket: TicketId) -> Option<AccountAddress> {
        self.ticket_owners.get(&ticket).map(|owner| *owner)
    }

    pub fn is_listed(&self, ticket: TicketId) -> bool {
        self.resale_listings.get(&ticket).is_some()
    }

    pub fn has_swap_offer(&self, ticket: TicketId) -> bool {
        self.swap_offers.get(&ticket).is_some()
    }

    /// Rejects ids outside of `1..=num_tickets`.
    pub fn ensure_issued(&self, ticket: TicketId) -> ContractResult<()> {
        ensure!(
            ticket != NO_TICKET && ticket <= self.num_tickets,
            CustomContractError::InvalidTicketId
        );
        Ok(())
    }

    fn held_ticket(&self, account: &AccountAddress) -> ContractResult<TicketId> {
        self.ticket_of(account).ok_or(CustomContractError::NoTicketOwned)
    }

    fn ensure_holds_nothing(&self, account: &AccountAddress) -> ContractResult<()> {
        ensure!(
            self.ticket_of(account).is_none(),
            CustomContractError::AlreadyOwnsTicket
        );
        Ok(())
    }

    fn assign(&mut self, ticket: TicketId, holder: AccountAddress) {
        self.ticket_owners.insert(ticket, holder);
        self.holders.insert(holder, ticket);
    }

    fn delist(&mut self, ticket: TicketId) {
        if self.resale_listings.remove_and_get(&ticket).is_some() {
            self.resale_order.retain(|listed| *listed != ticket);
        }
    }

    /// Sells an unowned ticket at the issue price.
    pub fn buy(
        &mut self,
        buyer: AccountAddress,
        ticket: TicketId,
        payment: Amount,
    ) -> ContractResult<()> {
        self.ensure_issued(ticket)?;
        self.ensure_holds_nothing(&buyer)?;
        ensure!(
            self.owner_of(ticket).is_none(),
            CustomContractError::TicketAlreadySold
        );
        ensure!(
            payment == self.ticket_price,
            CustomContractError::IncorrectPayment
        );

        self.assign(ticket, buyer);

        Ok(())
    }

    /// Records an offer to swap the offerer's ticket for `target_ticket`,
    /// replacing the previous offer made with the same ticket.
    pub fn offer_swap(
        &mut self,
        offerer: AccountAddress,
        target_ticket: TicketId,
    ) -> ContractResult<SwapOffer> {
        let own_ticket = self.held_ticket(&offerer)?;
        self.ensure_issued(target_ticket)?;
        ensure!(own_ticket != target_ticket, CustomContractError::SelfSwap);
        let partner = self
            .owner_of(target_ticket)
            .ok_or(CustomContractError::TargetTicketUnowned)?;
        ensure!(
            !self.is_listed(own_ticket),
            CustomContractError::TicketListedForResale
        );

        let offer = SwapOffer {
            offerer,
            partner,
            target_ticket,
        };
        self.swap_offers.insert(own_ticket, offer);

        Ok(offer)
    }

    /// Accepts the offer made with `offerer_ticket`.
    ///
    /// The accepter must still be the holder recorded in the offer, an
    /// offer whose wanted ticket changed hands since is rejected as stale.
    /// The offerer side needs no check: offers keyed by a ticket are removed
    /// whenever it changes hands.
    pub fn accept_swap(
        &mut self,
        accepter: AccountAddress,
        offerer_ticket: TicketId,
    ) -> ContractResult<SwapSettlement> {
        let offer = self
            .swap_offers
            .get(&offerer_ticket)
            .map(|offer| *offer)
            .ok_or(CustomContractError::NoSwapOffer)?;
        let my_ticket = self.held_ticket(&accepter)?;
        ensure!(
            offer.target_ticket == my_ticket,
            CustomContractError::SwapTargetMismatch
        );
        ensure!(offer.partner == accepter, CustomContractError::StaleSwapOffer);
        ensure!(
            !self.is_listed(my_ticket),
            CustomContractError::TicketListedForResale
        );

        // Offers made with either ticket are void once it changes hands.
        self.swap_offers.remove(&offerer_ticket);
        self.swap_offers.remove(&my_ticket);
        self.assign(my_ticket, offer.offerer);
        self.assign(offerer_ticket, accepter);

        Ok(SwapSettlement {
            partner: offer.offerer,
            my_ticket,
            partner_ticket: offerer_ticket,
        })
    }

    /// Withdraws the offer made with the offerer's ticket.
    pub fn cancel_swap(&mut self, offerer: AccountAddress) -> ContractResult<TicketId> {
        let ticket = self.held_ticket(&offerer)?;
        self.swap_offers
            .remove_and_get(&ticket)
            .ok_or(CustomContractError::NoSwapOffer)?;

        Ok(ticket)
    }

    /// Lists the seller's ticket for resale or updates the price of its
    /// listing. A relisted ticket keeps its place in the listing order.
    pub fn list_for_resale(
        &mut self,
        seller: AccountAddress,
        price: Amount,
    ) -> ContractResult<TicketId> {
        let ticket = self.held_ticket(&seller)?;
        ensure!(price.micro_ccd > 0, CustomContractError::ZeroResalePrice);
        ensure!(
            !self.has_swap_offer(ticket),
            CustomContractError::SwapOfferPending
        );

        let previous = self
            .resale_listings
            .insert(ticket, ResaleListing { seller, price });
        if previous.is_none() {
            self.resale_order.push(ticket);
        }

        Ok(ticket)
    }

    /// Removes the listing of the seller's ticket.
    pub fn cancel_resale(&mut self, seller: AccountAddress) -> ContractResult<TicketId> {
        let ticket = self.held_ticket(&seller)?;
        ensure!(
            self.is_listed(ticket),
            CustomContractError::TicketNotListedForResale
        );

        self.delist(ticket);

        Ok(ticket)
    }

    /// Moves a listed ticket to `buyer`. Returns the settled listing, the
    /// caller forwards the payment to its seller.
    pub fn take_resale(
        &mut self,
        buyer: AccountAddress,
        ticket: TicketId,
        payment: Amount,
    ) -> ContractResult<ResaleListing> {
        let listing = self
            .resale_listings
            .get(&ticket)
            .map(|listing| *listing)
            .ok_or(CustomContractError::TicketNotListedForResale)?;
        self.ensure_holds_nothing(&buyer)?;
        ensure!(
            payment == listing.price,
            CustomContractError::IncorrectPayment
        );

        self.delist(ticket);
        self.holders.remove(&listing.seller);
        self.assign(ticket, buyer);

        Ok(listing)
    }

    /// Gives the holder's ticket back to the contract, voiding its listing
    /// and swap offer.
    pub fn release(&mut self, holder: AccountAddress) -> ContractResult<TicketId> {
        let ticket = self.held_ticket(&holder)?;

        self.holders.remove(&holder);
        self.ticket_owners.remove(&ticket);
        self.swap_offers.remove(&ticket);
        self.delist(ticket);

        Ok(ticket)
    }

    /// Refund and service fee paid out for a returned ticket.
    pub fn refund_shares(&self) -> RefundShares {
        calc_refund_shares(self.ticket_price, SERVICE_FEE)
    }

    /// Listed tickets in listing order.
    pub fn listed_tickets(&self) -> Vec<TicketId> {
        self.resale_order.clone()
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            owner: self.owner,
            num_tickets: self.num_tickets,
            ticket_price: self.ticket_price,
            tickets_sold: self.holders.iter().count() as u32,
        }
    }
}
