use std::fmt::Debug;

pub mod email;
pub mod env_args;
#[cfg(test)]
pub mod test;

pub fn log_error_and_return<E: Debug, T>(value_to_return: T) -> impl FnOnce(E) -> T {
    |error| {
        error!("{error:#?}");
        value_to_return
    }
}

pub fn log_message_and_return<E: Debug, T>(
    message: &str,
    value_to_return: T,
) -> impl FnOnce(E) -> T {
    move |error| {
        error!("{message}\n{error:#?}");
        value_to_return
    }
}

/// Run an operation, replaying it once when it fails in a retryable way.
/// Meant for transient infrastructure failures: business rejections should
/// never match the predicate, retrying them can't change the outcome.
pub fn retry_once_if<T, E, F, P>(is_retryable: P, mut operation: F) -> Result<T, E>
where
    E: Debug,
    F: FnMut() -> Result<T, E>,
    P: Fn(&E) -> bool,
{
    match operation() {
        Err(error) if is_retryable(&error) => {
            warn!("Retrying once after transient failure\n{error:#?}");
            operation()
        }
        result => result,
    }
}
