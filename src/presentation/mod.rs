/// Regions, countries, exchanges and indices
pub mod dictionary;
/// Orders, transactions and order checks
pub mod order;
/// Positions, cash balances and totals
pub mod portfolio;
/// Price series and ISO-8601 spans
pub mod price;
/// Products and product types
pub mod product;
