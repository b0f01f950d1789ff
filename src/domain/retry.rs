//! Retry-counter bookkeeping inside a URL query string.
//!
//! The counter lives in the `returnUrl` the consent flow redirects back to, so
//! it survives full page navigations without any client-side storage.

use url::Url;

use crate::domain::value::RetryCount;

/// Reserved query key carrying the retry counter.
pub const DEFAULT_RETRY_PARAM: &str = "authRetryCount";

/// Decoded value of the last `key` occurrence in `url`'s query.
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .filter(|(k, _)| k == key)
        .last()
        .map(|(_, v)| v.into_owned())
}

/// Counter stored under `key`; a missing or non-numeric value reads as `None`.
///
/// Any numeric form counts: fractions round up, values past `u32::MAX` clamp
/// to it and negatives read as zero, so an over-budget counter stays over budget.
pub fn read_retry_count(url: &Url, key: &str) -> Option<RetryCount> {
    query_param(url, key).and_then(|value| parse_retry_count(&value))
}

fn parse_retry_count(value: &str) -> Option<RetryCount> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let number = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok()? as f64,
        None => value.parse::<f64>().ok()?,
    };
    if number.is_nan() {
        return None;
    }
    // `as` saturates: negatives become 0, overflow and infinity become u32::MAX.
    Some(RetryCount::new(number.ceil() as u32))
}

/// Return `url` with `key` set to `count`.
///
/// Other parameters keep their decoded key/value pairs and relative order; an
/// existing counter is updated in place, otherwise it is appended last.
pub fn with_retry_count(url: &Url, key: &str, count: RetryCount) -> Url {
    let mut updated = url.clone();
    let value = count.to_string();

    if url.query().is_none() {
        updated.query_pairs_mut().append_pair(key, &value);
        return updated;
    }

    let mut found = false;
    let pairs = url
        .query_pairs()
        .map(|(k, v)| {
            if k == key {
                found = true;
                (k.into_owned(), value.clone())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect::<Vec<_>>();

    {
        let mut serializer = updated.query_pairs_mut();
        serializer.clear().extend_pairs(pairs);
        if !found {
            serializer.append_pair(key, &value);
        }
    }
    updated
}

/// Bump the counter under `key`, starting at `1` when absent.
pub fn increment_retry_count(url: &Url, key: &str) -> Url {
    let next = read_retry_count(url, key).unwrap_or_default().next();
    with_retry_count(url, key, next)
}
