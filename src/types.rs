//! Wire types exchanged with the Supabase backend

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============= Auth =============

/// Authenticated user as returned by GoTrue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Session issued by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: i64,
    /// Unix seconds. Older GoTrue releases omit it; see [`Session::stamped`].
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    /// Fill in `expires_at` from `expires_in` when the server left it out.
    pub fn stamped(mut self, now: i64) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now + self.expires_in);
        }
        self
    }

    /// True when the access token expires within `margin` seconds of `now`.
    /// Sessions without an expiry never count as expiring.
    pub fn expires_within(&self, now: i64, margin: i64) -> bool {
        self.expires_at
            .map(|at| at - now <= margin)
            .unwrap_or(false)
    }
}

/// Password grant body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    /// Keep the session across browser restarts
    #[serde(skip)]
    pub remember_me: bool,
}

/// Extra user metadata stored alongside the account
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignUpMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Sign-up body. GoTrue rejects a top-level phone next to an email, so the
/// phone number travels in `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub data: SignUpMetadata,
}

/// Result of a sign-up call
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Auto-confirmed account, already signed in
    SignedIn(Session),
    /// Account created; the user must confirm their email first
    ConfirmationRequired(User),
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecoverRequest {
    pub email: String,
}

// ============= Rows =============

/// Raw `service_providers` row. Nothing is trusted to be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderRow {
    pub id: Option<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub business_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub service_category: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient_i64")]
    pub review_count: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub location_address: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub hourly_rate: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_available: Option<bool>,
    #[serde(deserialize_with = "lenient_strings")]
    pub specialties: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub years_experience: Option<i64>,
    #[serde(deserialize_with = "lenient_strings")]
    pub languages: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_bool")]
    pub background_checked: Option<bool>,
    #[serde(deserialize_with = "lenient_i64")]
    pub response_time_minutes: Option<i64>,
}

/// Raw `profiles` row
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileRow {
    pub user_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// The signed-in user's profile, with blank values treated as unset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            full_name: present(row.full_name),
            email: present(row.email),
            phone: present(row.phone),
            address: present(row.address),
        }
    }
}

// PostgREST serializes `numeric` columns as strings in some configurations.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number))
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_i64().or_else(|| number(v).map(|n| n.trunc() as i64))))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Arrays keep their string items; a lone string becomes a one-item list.
fn lenient_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(vec![s]),
        _ => None,
    })
}
