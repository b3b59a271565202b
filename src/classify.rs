//! Outcome classification.
//!
//! Backends signal failure in different ways: a returned error, an absent
//! result, a status code in the error range, or an error field carried inside
//! an otherwise successful response. [`Policy`] names each of these shapes and
//! is chosen once per backend kind; the wrapper's invoke path only ever asks
//! the policy for a verdict.
//!
//! Call results expose the facts a policy looks at through [`Observe`].
//! `Result<T, E>` implements it for every payload type `T` that implements
//! [`Payload`].

use bytes::Bytes;

/// Success or failure of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        self == Outcome::Failure
    }

    fn from_failed(failed: bool) -> Self {
        if failed {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }
}

/// Responses at or above this status are failures.
pub const ERROR_STATUS_THRESHOLD: u16 = 400;

/// How a backend kind decides whether a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Failed iff the call returned an error.
    ErrorReturned,
    /// Failed iff the call returned an error, or returned no result at all.
    NullableResult,
    /// Failed iff the result carries a status code of 400 or more, whether
    /// or not an error was returned alongside it.
    StatusCode,
    /// Failed iff the call returned an error, or the result embeds one.
    EmbeddedError,
    /// Failed iff any of the listed policies reports a failure.
    Any(&'static [Policy]),
}

impl Policy {
    /// Classify one call result.
    ///
    /// Each call yields a single verdict, so a result that fails on several
    /// counts is still one failure.
    pub fn classify<R: Observe + ?Sized>(&self, result: &R) -> Outcome {
        Outcome::from_failed(self.failed(result))
    }

    fn failed<R: Observe + ?Sized>(&self, result: &R) -> bool {
        match self {
            Policy::ErrorReturned => result.is_error(),
            Policy::NullableResult => result.is_error() || result.is_absent(),
            Policy::StatusCode => result
                .status_code()
                .is_some_and(|code| code >= ERROR_STATUS_THRESHOLD),
            Policy::EmbeddedError => result.is_error() || result.has_embedded_error(),
            Policy::Any(policies) => policies.iter().any(|p| p.failed(result)),
        }
    }
}

/// Facts about a call result that classification can use.
pub trait Observe {
    /// The call returned an error value.
    fn is_error(&self) -> bool;

    /// The call returned no result.
    fn is_absent(&self) -> bool;

    /// Status or response code carried by the result.
    fn status_code(&self) -> Option<u16>;

    /// The result carries its own error field.
    fn has_embedded_error(&self) -> bool;
}

impl<T: Payload, E> Observe for Result<T, E> {
    fn is_error(&self) -> bool {
        self.is_err()
    }

    fn is_absent(&self) -> bool {
        self.as_ref().is_ok_and(Payload::is_absent)
    }

    fn status_code(&self) -> Option<u16> {
        self.as_ref().ok().and_then(Payload::status_code)
    }

    fn has_embedded_error(&self) -> bool {
        self.as_ref().is_ok_and(Payload::embedded_error)
    }
}

/// A successful call's value, as seen by classification.
///
/// All methods default to "nothing to report"; payload types override the
/// ones that apply to them.
pub trait Payload {
    fn is_absent(&self) -> bool {
        false
    }

    fn status_code(&self) -> Option<u16> {
        None
    }

    fn embedded_error(&self) -> bool {
        false
    }
}

impl<T: Payload> Payload for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn status_code(&self) -> Option<u16> {
        self.as_ref().and_then(Payload::status_code)
    }

    fn embedded_error(&self) -> bool {
        self.as_ref().is_some_and(Payload::embedded_error)
    }
}

impl<B> Payload for http::Response<B> {
    fn status_code(&self) -> Option<u16> {
        Some(self.status().as_u16())
    }
}

impl Payload for () {}
impl Payload for Bytes {}
impl Payload for String {}
impl<T> Payload for Vec<T> {}
