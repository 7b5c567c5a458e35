//! API audit log entries and the filter used to query them.
//!
//! The backend records every API call it serves. The console reads those records
//! back through a date-range query with optional narrowing by user, endpoint,
//! method and response status.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ConsoleError;

/// Wire format for the date-range bounds.
pub const QUERY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Default look-back window for the date-range filter.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Response statuses offered by the status filter.
pub const STATUS_CHOICES: [u16; 6] = [200, 400, 401, 403, 404, 500];

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    /// Server-local timestamp as sent (`YYYY-MM-DDTHH:MM:SS[.fff]`).
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub api_endpoint: String,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub user_identifier: Option<String>,
    #[serde(default)]
    pub response_status: Option<u16>,
    #[serde(default)]
    pub request_duration_ms: Option<u64>,
    #[serde(default)]
    pub client_ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl AuditLogEntry {
    /// Parses the timestamp, tolerating fractional seconds.
    #[must_use]
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    /// Parses the HTTP method, `None` for verbs the filter does not know.
    #[must_use]
    pub fn method(&self) -> Option<HttpMethod> {
        self.http_method.parse().ok()
    }
}

/// HTTP verbs the audit filter can narrow by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [Self; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConsoleError::Validation(format!("unsupported method: {s}")))
    }
}

/// Criteria for the audit log query.
///
/// Empty strings and `None` mean "no constraint" and are left out of the query
/// string entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFilter {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub user_identifier: String,
    pub endpoint: String,
    pub method: Option<HttpMethod>,
    pub status: Option<u16>,
}

impl AuditFilter {
    /// The last [`DEFAULT_WINDOW_DAYS`] days up to `now`, nothing else constrained.
    #[must_use]
    pub fn last_week(now: NaiveDateTime) -> Self {
        Self {
            start: now - Duration::days(DEFAULT_WINDOW_DAYS),
            end: now,
            user_identifier: String::new(),
            endpoint: String::new(),
            method: None,
            status: None,
        }
    }

    /// Filter query parameters, without paging.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("startDate", self.start.format(QUERY_TIMESTAMP_FORMAT).to_string()),
            ("endDate", self.end.format(QUERY_TIMESTAMP_FORMAT).to_string()),
        ];
        let user = self.user_identifier.trim();
        if !user.is_empty() {
            params.push(("userIdentifier", user.to_string()));
        }
        let endpoint = self.endpoint.trim();
        if !endpoint.is_empty() {
            params.push(("endpoint", endpoint.to_string()));
        }
        if let Some(method) = self.method {
            params.push(("method", method.as_str().to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

/// Parses a date-range bound given as `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
///
/// A bare date is taken at midnight.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] for any other shape.
pub fn parse_bound(raw: &str) -> Result<NaiveDateTime, ConsoleError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, QUERY_TIMESTAMP_FORMAT)
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|_| ConsoleError::Validation(format!("not a date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveDateTime {
        parse_bound("2024-03-15T12:00:00").unwrap()
    }

    #[test]
    fn default_filter_spans_a_week() {
        let filter = AuditFilter::last_week(noon());
        let params = filter.query_params();
        assert_eq!(
            params,
            vec![
                ("startDate", "2024-03-08T12:00:00".to_string()),
                ("endDate", "2024-03-15T12:00:00".to_string()),
            ]
        );
    }

    #[test]
    fn unset_filters_are_absent() {
        let mut filter = AuditFilter::last_week(noon());
        filter.user_identifier = "   ".into();
        let keys: Vec<_> = filter.query_params().into_iter().map(|(k, _)| k).collect();
        assert!(!keys.contains(&"userIdentifier"));
        assert!(!keys.contains(&"method"));
        assert!(!keys.contains(&"status"));

        filter.method = Some(HttpMethod::Delete);
        filter.status = Some(404);
        let params = filter.query_params();
        assert!(params.contains(&("method", "DELETE".to_string())));
        assert!(params.contains(&("status", "404".to_string())));
    }

    #[test]
    fn parses_methods_case_insensitively() {
        assert_eq!("put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn entry_timestamp_allows_fractions() {
        let json = r#"{"id":"a1","timestamp":"2024-03-15T09:30:01.250","apiEndpoint":"/api/tier",
            "httpMethod":"GET","responseStatus":200}"#;
        let entry: AuditLogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.recorded_at().is_some());
        assert_eq!(entry.method(), Some(HttpMethod::Get));
        assert!(entry.user_identifier.is_none());
    }

    #[test]
    fn bare_date_bound_is_midnight() {
        let bound = parse_bound("2024-01-02").unwrap();
        assert_eq!(bound.format(QUERY_TIMESTAMP_FORMAT).to_string(), "2024-01-02T00:00:00");
    }
}
