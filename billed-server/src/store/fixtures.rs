use billed_core::Bill;

const BILLS_JSON: &str = include_str!("../../fixtures/bills.json");

/// The four sample bills the in-memory store starts with.
pub fn bills() -> Vec<Bill> {
    serde_json::from_str(BILLS_JSON).expect("fixture bills must be valid JSON")
}
