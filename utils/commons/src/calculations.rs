use super::*;

/// Splits `price` into the refund and the service fee charged at `fee_rate`.
///
/// The fee is rounded down, so `refund + service_fee == price` holds for
/// every rate not exceeding `100%`.
pub fn calc_refund_shares(price: Amount, fee_rate: Percentage) -> RefundShares {
    let service_fee = fee_rate * price;
    RefundShares {
        refund: price - service_fee,
        service_fee,
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_refund_shares() {
        let shares =
            calc_refund_shares(Amount::from_micro_ccd(10_000), Percentage::from_percent(10));

        claim_eq!(
            shares,
            RefundShares {
                refund: Amount::from_micro_ccd(9_000),
                service_fee: Amount::from_micro_ccd(1_000),
            }
        );
    }

    #[concordium_test]
    fn test_refund_shares_round_fee_down() {
        let price = Amount::from_micro_ccd(999);
        let shares = calc_refund_shares(price, Percentage::from_percent(10));

        claim_eq!(shares.service_fee, Amount::from_micro_ccd(99));
        claim_eq!(shares.refund + shares.service_fee, price);
    }

    #[concordium_test]
    fn test_refund_shares_edge_rates() {
        let price = Amount::from_ccd(3);

        let free = calc_refund_shares(price, Percentage::from_percent(0));
        claim_eq!(free.refund, price);
        claim_eq!(free.service_fee, Amount::zero());

        let full = calc_refund_shares(price, Percentage::from_percent(100));
        claim_eq!(full.refund, Amount::zero());
        claim_eq!(full.service_fee, price);
    }

    #[concordium_test]
    fn test_service_fee_shares() {
        let shares = calc_refund_shares(Amount::from_ccd(2), SERVICE_FEE);

        claim_eq!(shares.refund, Amount::from_micro_ccd(1_800_000));
        claim_eq!(shares.service_fee, Amount::from_micro_ccd(200_000));
    }
}
