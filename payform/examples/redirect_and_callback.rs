//! End-to-end example: redirect a payer to the hosted form and verify the callback.
//!
//! The private key is read from `PAYFORM_PRIVATE_KEY` when set, otherwise the
//! provider's public test key is used.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=payform=debug cargo run --example redirect_and_callback
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::io;

use chrono::{TimeZone, Utc};
use payform::{
    FormError,
    config::FormConfig,
    model::{Language, Order, PaymentMethod},
    signing::SecurityKey,
};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const TEST_KEY: &str = "3844908d-4c2a-42e1-9be0-91bb5d068d22";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();

    println!("Payform: Redirect and Callback Example\n");

    let key_source = if std::env::var("PAYFORM_PRIVATE_KEY").is_ok() {
        "private_key_env = \"PAYFORM_PRIVATE_KEY\"".to_owned()
    } else {
        format!("private_key = \"{TEST_KEY}\"")
    };
    let config = FormConfig::from_toml(&format!(
        r#"
        merchant_id = 12345
        processing_url = "https://secure.payonlinesystem.com"
        {key_source}

        [redirect]
        return_url = "https://shop.example.com/paid"
        fail_url = "https://shop.example.com/failed"
        "#
    ))?;
    let merchant = config.merchant_account()?;

    // 1. Redirect
    let valid_until = Utc.with_ymd_and_hms(2030, 1, 29, 16, 10, 0).single().ok_or("bad date")?;
    let order = Order::new("56789", Decimal::new(999, 2), "USD")?
        .with_description("Buying phone")
        .with_valid_until(valid_until);

    for (language, method) in [
        (Language::Russian, PaymentMethod::Card),
        (Language::English, PaymentMethod::Select),
        (Language::English, PaymentMethod::Qiwi),
    ] {
        let url = config
            .payment_url(&merchant, &order)?
            .language(language)
            .payment_method(method)
            .custom_param("email", "payer@example.com")
            .build()?;
        println!("{language}/{method}:\n  {url}\n");
    }

    // 2. Callback, as the provider would post it after payment
    let verifier = config.callback_verifier()?;
    let callback_order = Order::new("56789", Decimal::new(999, 2), "USD")?;
    let time = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).single().ok_or("bad date")?;
    let security_key = SecurityKey::for_callback(&merchant, &callback_order, 987_654_321, time);
    let body = format!(
        "DateTime=2030-01-01+12%3A00%3A00&TransactionID=987654321&OrderId=56789&Amount=9.99\
         &Currency=USD&PaymentAmount=9.99&PaymentCurrency=USD&CardNumber=411111******1111\
         &ECI=5&ThreedsEnrollment=1&IpAddress=203.0.113.7&SecurityKey={security_key}"
    );

    let result = verifier.verify_query(&body)?;
    println!("Verified callback:\n{}\n", serde_json::to_string_pretty(&result)?);

    // 3. A forged callback
    let forged = body.replace("Amount=9.99", "Amount=0.01");
    match verifier.verify_query(&forged) {
        Err(FormError::SecurityViolation(msg)) => println!("Forged callback rejected: {msg}"),
        other => eprintln!("Unexpected outcome: {other:?}"),
    }

    Ok(())
}
