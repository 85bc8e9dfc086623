use super::*;

pub fn get_account_address(address: Address) -> ContractResult<AccountAddress> {
    match address {
        Address::Account(addr) => Ok(addr),
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
    }
}

/// Transfers `amount` out of the contract balance. A zero amount is skipped
/// thereby avoiding unnecessary gas fees.
pub fn pay_out<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    receiver: &AccountAddress,
    amount: Amount,
) -> ContractResult<()> {
    if amount.micro_ccd != 0 {
        host.invoke_transfer(receiver, amount)?;
    }

    Ok(())
}
