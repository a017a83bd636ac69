use rust_decimal::Decimal;

use crate::model::{PaymentCondition, SaleRecord};

use super::OrderedSums;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTotal {
    pub condition: PaymentCondition,
    pub amount: Decimal,
}

/// Revenue per payment condition in first-seen order. Sales without a
/// condition are counted as cash.
pub fn sales_by_payment(sales: &[SaleRecord]) -> Vec<PaymentTotal> {
    let mut sums = OrderedSums::default();
    for sale in sales {
        sums.add(sale.payment_condition.unwrap_or_default(), sale.amount());
    }
    sums.into_entries()
        .into_iter()
        .map(|(condition, amount)| PaymentTotal { condition, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{line, sale};

    #[test]
    fn missing_condition_counts_as_cash() {
        let mut credit = sale("a", (2024, 1, 1), None, vec![line("x", 1, 100)]);
        credit.payment_condition = Some(PaymentCondition::Credito);
        let cash = sale("b", (2024, 1, 2), None, vec![line("x", 3, 10)]);
        let mut explicit_cash = sale("c", (2024, 1, 3), None, vec![line("x", 1, 1)]);
        explicit_cash.payment_condition = Some(PaymentCondition::Contado);

        let totals = sales_by_payment(&[credit, cash, explicit_cash]);
        assert_eq!(
            totals,
            vec![
                PaymentTotal {
                    condition: PaymentCondition::Credito,
                    amount: Decimal::from(100),
                },
                PaymentTotal {
                    condition: PaymentCondition::Contado,
                    amount: Decimal::from(31),
                },
            ]
        );
    }
}
