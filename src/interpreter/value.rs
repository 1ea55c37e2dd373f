/// Runtime values.
///
/// Defines the `Value` enum produced when a captured subexpression is
/// materialized into a literal, together with its display rules.
pub mod core;
