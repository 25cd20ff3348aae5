//! SKU generation for product variations.
//!
//! A SKU is built from three hyphen-joined parts: a 3-letter product code, a
//! 4-letter variation code, and a zero-padded 4-digit counter. Known products
//! and variation values resolve through fixed abbreviation tables; everything
//! else falls back to a truncated uppercase prefix. The result is capped at
//! 13 characters.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maximum length of a generated SKU.
pub const MAX_SKU_LEN: usize = 13;

/// Placeholder variation code used when a variation has no recognized
/// color/size attribute.
const VARIATION_PLACEHOLDER: &str = "GEN0";

static PRODUCT_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Sunscreen", "SUN"),
        ("Moisturizer", "MST"),
        ("Facial Wash", "FCW"),
        ("Toner", "TNR"),
        ("Serum", "SRM"),
        ("Body Lotion", "BLT"),
        ("Lip Balm", "LPB"),
    ])
});

static VARIATION_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Sizes
        ("30mL", "30ML"),
        ("50mL", "50ML"),
        ("60mL", "60ML"),
        ("100mL", "10ML"),
        ("Small", "SMLL"),
        ("Medium", "MEDM"),
        ("Large", "LRGE"),
        // Colors
        ("Black", "BLCK"),
        ("White", "WHTE"),
        ("Beige", "BEIG"),
        ("Rose", "ROSE"),
    ])
});

/// Generates a SKU from a product name, variation attributes, and a sequence
/// counter. Pure and deterministic: identical inputs always yield identical
/// output.
pub fn generate(
    product_name: &str,
    variation_type: Option<&str>,
    variation_value: Option<&str>,
    counter: u32,
) -> String {
    let product_code = product_code(product_name);
    let variation_code = variation_code(variation_type, variation_value);
    let sku = format!("{}-{}-{:04}", product_code, variation_code, counter);

    // 3 + 4 + 4 parts plus hyphens fit exactly; oversized counters push past
    // the cap and get cut. Truncation can reintroduce collisions.
    if sku.chars().count() > MAX_SKU_LEN {
        sku.chars().take(MAX_SKU_LEN).collect()
    } else {
        sku
    }
}

fn product_code(product_name: &str) -> String {
    match PRODUCT_CODES.get(product_name) {
        Some(code) => (*code).to_string(),
        None => uppercase_prefix(product_name, 3),
    }
}

fn variation_code(variation_type: Option<&str>, variation_value: Option<&str>) -> String {
    let value = match (variation_type, variation_value) {
        (Some("Color") | Some("Size"), Some(value)) if !value.is_empty() => value,
        _ => return VARIATION_PLACEHOLDER.to_string(),
    };

    match VARIATION_CODES.get(value) {
        Some(code) => (*code).to_string(),
        None => uppercase_prefix(value, 4),
    }
}

fn uppercase_prefix(text: &str, len: usize) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .take(len)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("Sunscreen", Some("Size"), Some("30mL"), 1, "SUN-30ML-0001"; "known product and size")]
    #[test_case("Toner", Some("Color"), Some("Black"), 42, "TNR-BLCK-0042"; "known product and color")]
    #[test_case("Cleanser", Some("Size"), Some("30mL"), 7, "CLE-30ML-0007"; "unknown product falls back to prefix")]
    #[test_case("Sunscreen", Some("Size"), Some("75mL"), 3, "SUN-75ML-0003"; "unknown size falls back to prefix")]
    #[test_case("Serum", None, None, 12, "SRM-GEN0-0012"; "missing variation uses placeholder")]
    #[test_case("Serum", Some("Scent"), Some("Lavender"), 5, "SRM-GEN0-0005"; "unrecognized variation type uses placeholder")]
    fn generates_expected_sku(
        name: &str,
        vtype: Option<&str>,
        value: Option<&str>,
        counter: u32,
        expected: &str,
    ) {
        assert_eq!(generate(name, vtype, value, counter), expected);
    }

    #[test]
    fn counter_is_zero_padded() {
        assert_eq!(generate("Toner", None, None, 9), "TNR-GEN0-0009");
        assert_eq!(generate("Toner", None, None, 999), "TNR-GEN0-0999");
    }

    #[test]
    fn oversized_counter_is_truncated_to_max_len() {
        let sku = generate("Sunscreen", Some("Size"), Some("30mL"), 123_456);
        assert_eq!(sku.len(), MAX_SKU_LEN);
        assert_eq!(sku, "SUN-30ML-1234");
    }

    #[test]
    fn short_product_name_yields_short_code() {
        assert_eq!(generate("Za", None, None, 1), "ZA-GEN0-0001");
    }

    proptest! {
        #[test]
        fn generation_is_deterministic(
            name in "[A-Za-z ]{1,24}",
            value in proptest::option::of("[A-Za-z0-9]{1,12}"),
            counter in 0u32..1_000_000,
        ) {
            let vtype = value.as_ref().map(|_| "Size");
            let first = generate(&name, vtype, value.as_deref(), counter);
            let second = generate(&name, vtype, value.as_deref(), counter);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.chars().count() <= MAX_SKU_LEN);
        }
    }
}
