/// The reducer: holds the completed tokens of one expression and applies
/// the reduction rules after every push.
pub mod core;
/// Invocation of a callable followed by its argument tuple.
pub mod invoke;
/// Folding of dotted member accesses.
pub mod member;
/// Resolution of unevaluated tokens into literals and references.
pub mod resolve;
