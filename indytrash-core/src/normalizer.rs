//! Stage 1: turn a free-text fragment into a canonical address.

use std::borrow::Cow;

use tracing::{error, warn};

use crate::failure::NormalizeFailure;
use crate::model::CanonicalAddress;
use crate::ports::{GeocodePort, PortError};

/// Resolve `fragment` to a single canonical address.
///
/// When the geocoder rejects the input as unprocessable, the trailing token
/// (usually a street type such as `St` or `Ave`) is dropped and the lookup is
/// repeated. The loop runs at most once per token of the query and stops
/// once a single token has been rejected.
///
/// Several candidates are not an error: the first one in response order is
/// taken as a best guess.
///
/// # Errors
///
/// Returns a [`NormalizeFailure`] when the query is empty, nothing matches,
/// every truncation is rejected, or the geocoder cannot be reached.
pub async fn normalize(
    port: &dyn GeocodePort,
    fragment: &str,
) -> Result<CanonicalAddress, NormalizeFailure> {
    let tokens: Vec<&str> = fragment.split_whitespace().collect();
    if tokens.is_empty() {
        error!("Refusing to look up an empty address");
        return Err(NormalizeFailure::EmptyQuery);
    }

    let mut remaining = tokens.len();
    let mut attempt = Cow::Borrowed(fragment);
    loop {
        match port.search(&attempt).await {
            Ok(candidates) => return select_candidate(&attempt, candidates),
            Err(PortError::Unprocessable) if remaining > 1 => {
                warn!(
                    fragment = %attempt,
                    "Address rejected as unprocessable, retrying without the street type"
                );
                remaining -= 1;
                attempt = Cow::Owned(
                    tokens
                        .iter()
                        .take(remaining)
                        .copied()
                        .collect::<Vec<_>>()
                        .join(" "),
                );
            }
            Err(PortError::Unprocessable) => {
                let attempts = tokens.len();
                error!(fragment = %attempt, attempts, "Address rejected as unprocessable");
                return Err(NormalizeFailure::Unprocessable { attempts });
            }
            Err(err) => {
                error!(fragment = %attempt, error = %err, "Error calling geocoding service");
                return Err(NormalizeFailure::Transport(err));
            }
        }
    }
}

fn select_candidate(
    fragment: &str,
    candidates: Vec<CanonicalAddress>,
) -> Result<CanonicalAddress, NormalizeFailure> {
    let count = candidates.len();
    let Some(first) = candidates.into_iter().next() else {
        error!(fragment, "No address found");
        return Err(NormalizeFailure::NoAddressFound);
    };

    if count > 1 {
        warn!(
            fragment,
            candidates = count,
            "Ambiguous address, using the first candidate"
        );
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeGeocoder, candidate};

    #[tokio::test]
    async fn single_candidate_is_returned() {
        let geocoder =
            FakeGeocoder::new().respond("1234 Main Street", vec![candidate("1234 N MAIN ST")]);

        let address = normalize(&geocoder, "1234 Main Street")
            .await
            .expect("address resolves");

        assert_eq!(address.address1.as_deref(), Some("1234 N MAIN ST"));
        assert_eq!(geocoder.calls(), vec!["1234 Main Street"]);
    }

    #[tokio::test]
    async fn ambiguous_result_takes_first_candidate() {
        let geocoder = FakeGeocoder::new().respond(
            "100 Market",
            vec![candidate("100 E MARKET ST"), candidate("100 W MARKET ST")],
        );

        let address = normalize(&geocoder, "100 Market")
            .await
            .expect("first candidate is chosen");

        assert_eq!(address.address1.as_deref(), Some("100 E MARKET ST"));
    }

    #[tokio::test]
    async fn empty_result_fails_without_retry() {
        let geocoder = FakeGeocoder::new().respond("9999 Nowhere Road", Vec::new());

        let failure = normalize(&geocoder, "9999 Nowhere Road").await;

        assert!(matches!(failure, Err(NormalizeFailure::NoAddressFound)));
        assert_eq!(geocoder.calls().len(), 1);
    }

    #[tokio::test]
    async fn unprocessable_input_drops_trailing_tokens() {
        let geocoder = FakeGeocoder::new()
            .reject("1234 Main Street Apt")
            .reject("1234 Main Street")
            .respond("1234 Main", vec![candidate("1234 N MAIN ST")]);

        let address = normalize(&geocoder, "1234 Main Street Apt")
            .await
            .expect("truncated query resolves");

        assert_eq!(address.address1.as_deref(), Some("1234 N MAIN ST"));
        assert_eq!(
            geocoder.calls(),
            vec!["1234 Main Street Apt", "1234 Main Street", "1234 Main"]
        );
    }

    #[tokio::test]
    async fn unprocessable_single_token_is_not_retried() {
        let geocoder = FakeGeocoder::new().reject("Main");

        let failure = normalize(&geocoder, "Main").await;

        assert!(matches!(
            failure,
            Err(NormalizeFailure::Unprocessable { attempts: 1 })
        ));
        assert_eq!(geocoder.calls(), vec!["Main"]);
    }

    #[tokio::test]
    async fn truncation_stops_at_one_token() {
        let geocoder = FakeGeocoder::new().reject("Main Street").reject("Main");

        let failure = normalize(&geocoder, "Main Street").await;

        assert!(matches!(
            failure,
            Err(NormalizeFailure::Unprocessable { attempts: 2 })
        ));
        assert_eq!(geocoder.calls(), vec!["Main Street", "Main"]);
    }

    #[tokio::test]
    async fn blank_query_makes_no_request() {
        let geocoder = FakeGeocoder::new();

        let failure = normalize(&geocoder, "   ").await;

        assert!(matches!(failure, Err(NormalizeFailure::EmptyQuery)));
        assert!(geocoder.calls().is_empty());
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let geocoder = FakeGeocoder::new().fail_with_status("1234 Main Street", 500);

        let failure = normalize(&geocoder, "1234 Main Street").await;

        assert!(matches!(
            failure,
            Err(NormalizeFailure::Transport(PortError::Status(500)))
        ));
        assert_eq!(geocoder.calls().len(), 1);
    }
}
