use super::*;
use rust_decimal_macros::dec;

#[test]
fn test_money_new() {
    let amount = dec!(100.00);
    let money = Money::new(amount, Currency::Usd);
    assert_eq!(money.amount, amount);
    assert_eq!(money.currency, Currency::Usd);
}

#[test]
fn test_money_display() {
    assert_eq!(Money::new(dec!(3840), Currency::Eur).to_string(), "3840.00 €");
    assert_eq!(Money::new(dec!(-0.5), Currency::Usd).to_string(), "-0.50 $");
    assert_eq!(Money::new(dec!(10), Currency::Gbp).to_string(), "10.00 £");
}

#[test]
fn test_currency_display() {
    assert_eq!(Currency::Eur.to_string(), "EUR");
    assert_eq!(Currency::Usd.to_string(), "USD");
    assert_eq!(Currency::Gbp.to_string(), "GBP");
    assert_eq!(Currency::default(), Currency::Eur);
}

#[test]
fn test_locale_passthrough() {
    let locale = Locale::from("pt-PT");
    assert_eq!(locale.as_str(), "pt-PT");
    assert_eq!(Locale::default().to_string(), "en-US");
}
