//! Market prices from the ERP price table

use rust_decimal::prelude::*;
use serde_json::Value;
use shared::models::Price;

use crate::context::EngineContext;
use crate::core::error::EngineResult;
use crate::store::{PRICE_TEMPLATE, Row};

/// Prices below this are not shown
const MIN_PRICE: Decimal = Decimal::ONE;

/// Column prefix of a market: `MARKET-005` reads `MARKET_005_PRICE`
fn column_prefix(market: &str) -> String {
    market.replace('-', "_").to_uppercase()
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => n.as_f64().and_then(Decimal::from_f64),
        },
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

/// `1234567.891` -> `1.234.567,89`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{rounded:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped},{frac_part}")
}

/// Price of a row for `market`; unusable values are on demand
pub fn price_from_row(row: &Row, market: &str) -> Price {
    let prefix = column_prefix(market);
    let amount = row
        .get(&format!("{prefix}_PRICE"))
        .and_then(to_decimal)
        .filter(|p| *p >= MIN_PRICE);
    let Some(amount) = amount else {
        return Price::on_demand();
    };
    let currency = row
        .get(&format!("{prefix}_CURRENCY"))
        .and_then(crate::attributes::value_text)
        .filter(|c| !c.is_empty());

    let formatted = format_amount(amount);
    Price {
        ondemand: false,
        string: match &currency {
            Some(c) => format!("{formatted} {c}"),
            None => formatted,
        },
        amount: amount.to_f64(),
        currency,
    }
}

/// Latest price of `product_nr` in `market`
pub async fn market_price(
    ctx: &EngineContext,
    product_nr: Option<&str>,
    market: &str,
) -> EngineResult<Price> {
    let Some(product_nr) = product_nr.filter(|p| !p.is_empty()) else {
        return Ok(Price::on_demand());
    };
    let rows = ctx
        .sql
        .execute(PRICE_TEMPLATE, &[("productnr", Value::from(product_nr))])
        .await?;
    Ok(match rows.first() {
        Some(row) => price_from_row(row, market),
        None => {
            tracing::debug!(product_nr, "No price row");
            Price::on_demand()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryDocumentStore, MemoryRelationalStore};
    use serde_json::json;
    use shared::models::ON_DEMAND;
    use std::sync::Arc;

    fn row(price: Value) -> Row {
        Row::from(json!({"id": 1, "MARKET_005_PRICE": price, "MARKET_005_CURRENCY": "EUR"}))
    }

    #[test]
    fn amounts_use_swapped_separators() {
        assert_eq!(format_amount(Decimal::new(150000, 2)), "1.500,00");
        assert_eq!(format_amount(Decimal::new(1234567891, 3)), "1.234.567,89");
        assert_eq!(format_amount(Decimal::from(12)), "12,00");
        assert_eq!(format_amount(Decimal::new(999995, 3)), "1.000,00");
    }

    #[test]
    fn fifteen_hundred_euro() {
        let price = price_from_row(&row(json!(1500.00)), "MARKET-005");
        assert!(!price.ondemand);
        assert_eq!(price.string, "1.500,00 EUR");
        assert_eq!(price.amount, Some(1500.0));
        assert_eq!(price.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn unusable_values_are_on_demand() {
        for raw in [json!(0.99), json!(-4), json!("n/a"), Value::Null] {
            let price = price_from_row(&row(raw), "MARKET-005");
            assert_eq!(price, Price::on_demand());
            assert_eq!(price.string, ON_DEMAND);
            assert_eq!(price.amount, None);
        }
        assert!(!price_from_row(&row(json!("1")), "MARKET-005").ondemand);
    }

    #[tokio::test]
    async fn latest_row_is_used() {
        let sql = MemoryRelationalStore::new().with_table(
            "vmps_erp_prices",
            vec![
                json!({"id": 1, "product_number": "200100", "MARKET_005_PRICE": 10, "MARKET_005_CURRENCY": "EUR"}),
                json!({"id": 2, "product_number": "200100", "MARKET_005_PRICE": 20, "MARKET_005_CURRENCY": "EUR"}),
            ],
        );
        let ctx = EngineContext::new(Arc::new(MemoryDocumentStore::new()), Arc::new(sql));
        let price = market_price(&ctx, Some("200100"), "MARKET-005").await.unwrap();
        assert_eq!(price.string, "20,00 EUR");

        let missing = market_price(&ctx, Some("999"), "MARKET-005").await.unwrap();
        assert!(missing.ondemand);
        assert!(market_price(&ctx, None, "MARKET-005").await.unwrap().ondemand);
    }

    #[tokio::test]
    async fn offline_database_is_an_error() {
        let ctx = EngineContext::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryRelationalStore::new().offline()),
        );
        assert!(market_price(&ctx, Some("1"), "MARKET-005").await.is_err());
    }
}
