use serde::{Deserialize, Serialize};

/// Outcome for a single registration token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Canonical registration id the device should be addressed with from now on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON body of a successful (HTTP 200) GCM send call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub multicast_id: i64,
    #[serde(default)]
    pub success: u32,
    #[serde(default)]
    pub failure: u32,
    #[serde(default)]
    pub canonical_ids: u32,
    #[serde(default)]
    pub results: Vec<TokenResult>,
}

/// A send response with each result keyed by the token it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcmResponse {
    multicast_id: i64,
    success_count: u32,
    failure_count: u32,
    canonical_id_count: u32,
    results: Vec<(String, TokenResult)>,
}

impl GcmResponse {
    /// Pairs the results in `body` with `registration_ids` by position.
    ///
    /// Results without a matching token are dropped.
    #[must_use]
    pub fn from_body(registration_ids: &[String], body: ResponseBody) -> Self {
        let results = registration_ids.iter().cloned().zip(body.results).collect();

        Self {
            multicast_id: body.multicast_id,
            success_count: body.success,
            failure_count: body.failure,
            canonical_id_count: body.canonical_ids,
            results,
        }
    }

    #[must_use]
    pub const fn multicast_id(&self) -> i64 {
        self.multicast_id
    }

    #[must_use]
    pub const fn success_count(&self) -> u32 {
        self.success_count
    }

    #[must_use]
    pub const fn failure_count(&self) -> u32 {
        self.failure_count
    }

    #[must_use]
    pub const fn canonical_id_count(&self) -> u32 {
        self.canonical_id_count
    }

    /// Per-token results in request order.
    pub fn results(&self) -> impl Iterator<Item = (&str, &TokenResult)> {
        self.results.iter().map(|(token, result)| (token.as_str(), result))
    }
}
