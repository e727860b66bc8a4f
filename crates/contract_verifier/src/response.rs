//! Shared checks applied to raw service responses.

use api_client::ApiResponse;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{Error, Operation};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Requires the response status to equal `expected`.
pub(crate) fn expect_status(
    operation: Operation,
    response: &ApiResponse,
    expected: u16,
) -> Result<(), Error> {
    let actual = response.status_code();
    if actual == expected {
        return Ok(());
    }

    Err(Error::UnexpectedStatus {
        operation,
        expected,
        actual,
        body: response.body.clone(),
    })
}

/// Parses the body as a JSON object.
pub(crate) fn expect_object(
    operation: Operation,
    response: &ApiResponse,
) -> Result<Map<String, Value>, Error> {
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(Error::MalformedBody {
            operation,
            expected: "a JSON object",
            body: response.body.clone(),
        }),
    }
}

/// Requires the body to deep-equal `expected`, with no extra or missing keys.
pub(crate) fn expect_exact_body<T: Serialize>(
    operation: Operation,
    response: &ApiResponse,
    expected: &T,
) -> Result<(), Error> {
    let expected = serde_json::to_value(expected).map_err(api_client::Error::from)?;
    let actual =
        serde_json::from_str::<Value>(&response.body).map_err(|_| Error::MalformedBody {
            operation,
            expected: "a JSON acknowledgement",
            body: response.body.clone(),
        })?;

    if actual == expected {
        Ok(())
    } else {
        Err(Error::UnexpectedBody {
            operation,
            expected,
            actual,
        })
    }
}
