use std::fmt;

/// Result of one authenticated call, as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// No credential was available, or the server rejected it (HTTP 401).
    /// The caller is expected to send the user through sign-in.
    Unauthenticated,
    /// A user-presentable error message.
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Outcome::Unauthenticated)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Unauthenticated => Outcome::Unauthenticated,
            Outcome::Failure(message) => Outcome::Failure(message),
        }
    }

    pub fn and_then<U, F: FnOnce(T) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Unauthenticated => Outcome::Unauthenticated,
            Outcome::Failure(message) => Outcome::Failure(message),
        }
    }

    /// Converts into a `Result` so callers can propagate with `?`.
    /// Use `anyhow::Error::downcast_ref::<RequestError>()` to detect sign-in.
    pub fn into_result(self) -> Result<T, RequestError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Unauthenticated => Err(RequestError::Unauthenticated),
            Outcome::Failure(message) => Err(RequestError::Failure(message)),
        }
    }
}

/// Error form of the non-success outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    Unauthenticated,
    Failure(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthenticated => {
                write!(f, "Not signed in or your session has expired")
            }
            RequestError::Failure(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RequestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_and_predicates() {
        let outcome = Outcome::Success(2).map(|n| n * 21);
        assert!(outcome.is_success());
        assert_eq!(outcome.success(), Some(42));

        let outcome: Outcome<i32> = Outcome::Unauthenticated;
        assert!(outcome.clone().map(|n| n + 1).is_unauthenticated());

        let outcome: Outcome<i32> = Outcome::failure("boom");
        assert_eq!(outcome.map(|n| n + 1), Outcome::Failure("boom".to_string()));
    }

    #[test]
    fn test_and_then_short_circuits() {
        let outcome = Outcome::Success("5").and_then(|s| match s.parse::<i32>() {
            Ok(n) => Outcome::Success(n),
            Err(_) => Outcome::failure("not a number"),
        });
        assert_eq!(outcome, Outcome::Success(5));

        let outcome = Outcome::Success("x").and_then(|s| match s.parse::<i32>() {
            Ok(n) => Outcome::Success(n),
            Err(_) => Outcome::failure("not a number"),
        });
        assert!(outcome.is_failure());

        let outcome: Outcome<&str> = Outcome::Unauthenticated;
        let chained: Outcome<i32> = outcome.and_then(|_| panic!("must not run"));
        assert!(chained.is_unauthenticated());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Outcome::Success(1).into_result(), Ok(1));
        assert_eq!(
            Outcome::<i32>::Unauthenticated.into_result(),
            Err(RequestError::Unauthenticated)
        );

        let err = Outcome::<i32>::failure("server down").into_result().unwrap_err();
        assert_eq!(err.to_string(), "server down");
    }

    #[test]
    fn test_request_error_downcast_through_anyhow() {
        let err = anyhow::Error::from(RequestError::Unauthenticated);
        assert_eq!(
            err.downcast_ref::<RequestError>(),
            Some(&RequestError::Unauthenticated)
        );
        assert_eq!(err.to_string(), "Not signed in or your session has expired");
    }
}
