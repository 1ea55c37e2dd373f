use crate::interpreter::{
    environment::EvalResult,
    evaluator::core::Reducer,
    literal::materialize,
    token::{Binding, EvalHint, Token},
};

impl Reducer<'_> {
    /// Resolves the last buffered token if it is unevaluated.
    ///
    /// Plain text that reads as a number becomes a literal; otherwise a
    /// bound name becomes a reference. Unbound names stay unevaluated, since
    /// they may still be used as a member or as an assignment target. A
    /// captured subexpression is materialized into a literal.
    ///
    /// # Errors
    /// Returns `MalformedLiteral` if materialization fails.
    pub(super) fn resolve_last(&mut self) -> EvalResult<()> {
        let Some((Token::Unevaluated { text, hint }, position)) = self.buffer.last() else {
            return Ok(());
        };

        let resolved = match *hint {
            EvalHint::Reference => {
                let name = text.trim();
                match self.dictionary.number(name) {
                    Some(number) => Some(Token::Literal(number)),
                    None => self.env.resolve(name).map(|entry| Token::Reference { name: name.to_string(),
                                                                                  entry,
                                                                                  binding: Binding::Environment }),
                }
            },
            EvalHint::Subexpression { materializer, .. } => {
                Some(Token::Literal(materialize(materializer, text, self.env, *position)?))
            },
        };

        if let Some(token) = resolved
           && let Some(last) = self.buffer.last_mut()
        {
            tracing::debug!(%token, position = last.1, "resolved");
            last.0 = token;
        }

        Ok(())
    }
}
