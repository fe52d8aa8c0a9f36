// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::common::error::AppError;

/// Maior valor que cabe em NUMERIC(14,2).
pub const MAX_MONEY: Decimal = Decimal::from_parts(0x107A_3FFF, 0x5AF3, 0, false, 2);

/// Arredonda aos centavos como o Postgres faz ao gravar em NUMERIC(14,2).
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Valor monetário de entrada: nem negativo, nem maior que a coluna aguenta.
pub fn check_amount(field: &str, value: Decimal) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::InvalidInput(format!("{} não pode ser negativo", field)));
    }
    check_magnitude(field, value)
}

/// Só o limite de tamanho (totais de orçamento podem ser negativos).
pub fn check_magnitude(field: &str, value: Decimal) -> Result<(), AppError> {
    if value.abs() > MAX_MONEY {
        return Err(AppError::InvalidInput(format!("{} acima do limite de {}", field, MAX_MONEY)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::str::FromStr;

    #[test]
    fn max_money_is_fourteen_digits_with_cents() {
        assert_eq!(MAX_MONEY, Decimal::from_str("999999999999.99").unwrap());
    }

    #[test]
    fn half_cent_rounds_away_from_zero() {
        assert_eq!(round_cents(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
        assert_eq!(round_cents(Decimal::from_str("-10.005").unwrap()), Decimal::from_str("-10.01").unwrap());
    }

    #[test]
    fn amounts_outside_column_are_rejected() {
        assert!(check_amount("amount", MAX_MONEY).is_ok());
        assert_matches!(
            check_amount("amount", MAX_MONEY + Decimal::new(1, 2)),
            Err(AppError::InvalidInput(_))
        );
        assert_matches!(check_amount("amount", Decimal::NEGATIVE_ONE), Err(AppError::InvalidInput(_)));
        assert_matches!(
            check_magnitude("total", -(MAX_MONEY + Decimal::ONE)),
            Err(AppError::InvalidInput(_))
        );
    }
}
