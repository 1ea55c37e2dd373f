use crate::interpreter::{
    environment::EvalResult,
    evaluator::core::Reducer,
    token::Token,
    value::core::Value,
};

impl Reducer<'_> {
    /// Calls the function before the last token if the last token is a tuple
    /// literal.
    ///
    /// # Returns
    /// The callable's result, or `None` if the buffer does not end in an
    /// invocation.
    ///
    /// # Errors
    /// Propagates the callable's error.
    pub(super) fn invoke_last(&mut self) -> EvalResult<Option<Value>> {
        let [.., (Token::Function(callable), _), (Token::Literal(value), position)] =
            self.buffer.as_slice()
        else {
            return Ok(None);
        };
        let Some(args) = value.as_tuple() else {
            return Ok(None);
        };

        tracing::debug!(callable = callable.name, arguments = args.len(), "invoke");
        callable.call(args, &mut *self.sink, *position).map(Some)
    }
}
