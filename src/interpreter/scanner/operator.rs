use crate::interpreter::token::Operator;

/// Valid two character operators, as (first, second character, result).
///
/// No first operator may pair with the same second character twice, so one
/// character of lookahead always decides.
pub const DOUBLE_OPERATORS: &[(Operator, char, Operator)] =
    &[(Operator::Bang, '=', Operator::BangEqual),
      (Operator::Assign, '=', Operator::EqualEqual),
      (Operator::Greater, '=', Operator::GreaterEqual),
      (Operator::Less, '=', Operator::LessEqual),
      (Operator::Bang, '!', Operator::BangBang),
      (Operator::Ampersand, '&', Operator::And),
      (Operator::Pipe, '|', Operator::Or)];

/// The outcome of looking one character past an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguation {
    /// The two characters form this operator; the second one is consumed.
    Double(Operator),
    /// The first character stands alone; the next character still has to be
    /// scanned.
    Single(Operator),
}

/// Decides whether `first` followed by `next` is a two character operator.
///
/// # Example
/// ```
/// use shellexpr::interpreter::{
///     scanner::operator::{Disambiguation, disambiguate},
///     token::Operator,
/// };
///
/// assert_eq!(disambiguate(Operator::Assign, '='), Disambiguation::Double(Operator::EqualEqual));
/// assert_eq!(disambiguate(Operator::Assign, 'b'), Disambiguation::Single(Operator::Assign));
/// ```
#[must_use]
pub fn disambiguate(first: Operator, next: char) -> Disambiguation {
    DOUBLE_OPERATORS.iter()
                    .find(|&&(op, second, _)| op == first && second == next)
                    .map_or(Disambiguation::Single(first), |&(_, _, double)| {
                        Disambiguation::Double(double)
                    })
}
