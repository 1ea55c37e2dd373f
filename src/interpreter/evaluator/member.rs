use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::{EvalResult, Member},
        evaluator::core::Reducer,
        token::{Binding, EvalHint, Operator, Token},
    },
};

impl Reducer<'_> {
    /// Folds `receiver . member` at the end of the buffer into one token.
    ///
    /// For a reference, the member is looked up in the receiver's
    /// `references`: a nested entry folds into a member reference, a callable
    /// into a function. Failing that, a key of an object `source` folds into
    /// a literal. An object literal receiver folds the same way. The folded
    /// token keeps the receiver's position.
    ///
    /// # Errors
    /// - `UnknownReference` if the receiver is a name that is not bound.
    /// - `MemberNotFound` if the receiver exposes no such member.
    pub(super) fn fold_member(&mut self) -> EvalResult<()> {
        let [.., (receiver, receiver_position), (Token::BinaryOperator(Operator::Dot), _), (member, member_position)] =
            self.buffer.as_slice()
        else {
            return Ok(());
        };

        let Some(name) = member.as_name() else {
            return Err(RuntimeError::MemberNotFound { member:   member.to_string(),
                                                      position: *member_position, });
        };

        let missing = || RuntimeError::MemberNotFound { member:   name.to_string(),
                                                        position: *member_position, };

        let folded = match receiver {
            Token::Reference { entry, .. } => match entry.member(name) {
                Some(Member::Entry(nested)) => Token::Reference { name:    name.to_string(),
                                                                  entry:   Rc::clone(nested),
                                                                  binding: Binding::Member, },
                Some(Member::Callable(callable)) => Token::Function(*callable),
                None => entry.source
                             .as_ref()
                             .and_then(|source| source.member(name))
                             .map(|value| Token::Literal(value.clone()))
                             .ok_or_else(missing)?,
            },
            Token::Literal(value) => {
                value.member(name).map(|value| Token::Literal(value.clone())).ok_or_else(missing)?
            },
            Token::Unevaluated { text,
                                 hint: EvalHint::Reference, } => {
                return Err(RuntimeError::UnknownReference { name:     text.trim().to_string(),
                                                            position: *receiver_position, });
            },
            _ => return Err(missing()),
        };

        let position = *receiver_position;
        tracing::debug!(%folded, position, "fold member");
        self.buffer.truncate(self.buffer.len() - 3);
        self.buffer.push((folded, position));

        Ok(())
    }
}
