use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::deck::Decision;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Backend origin, overridable at build time.
fn api_base() -> &'static str {
    option_env!("SUBLET_SWIPE_API_URL").unwrap_or(DEFAULT_API_BASE)
}

fn url(endpoint: &str) -> String {
    format!("{}{}", api_base(), endpoint)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Unauthorized,
    NotFound(String),
    Http(u16, String),
    Network(String),
    Parse(String),
}

impl ApiError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Not signed in or session expired"),
            ApiError::NotFound(what) => write!(f, "{what} was not found"),
            ApiError::Http(status, detail) => write!(f, "HTTP {status}: {detail}"),
            ApiError::Network(message) => write!(f, "Network error: {message}"),
            ApiError::Parse(message) => write!(f, "Unexpected response: {message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types. Field names mirror the backend DTOs exactly, including their
// mixed camelCase/snake_case convention.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub show_in_swipe: Option<bool>,
    #[serde(default)]
    pub email_notifications_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeekerProfile {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub bio: Option<String>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
    // Decimals arrive as strings.
    #[serde(rename = "budgetMin")]
    pub budget_min: Option<String>,
    #[serde(rename = "budgetMax")]
    pub budget_max: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "contactEmail")]
    pub contact_email: Option<String>,
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    #[serde(rename = "DRAFT")]
    Draft,
    #[serde(rename = "PUBLISHED")]
    Published,
    #[serde(rename = "UNLISTED")]
    Unlisted,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Roommate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "sleepingHabits", default)]
    pub sleeping_habits: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "studyHabits", default)]
    pub study_habits: Option<String>,
    #[serde(default)]
    pub cleanliness: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostListing {
    pub id: String,
    #[serde(rename = "hostId")]
    pub host_id: String,
    pub title: Option<String>,
    #[serde(rename = "pricePerMonth")]
    pub price_per_month: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "availableFrom")]
    pub available_from: Option<String>,
    #[serde(rename = "availableTo")]
    pub available_to: Option<String>,
    pub status: ListingStatus,
    #[serde(rename = "contactEmail", default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub roommates: Vec<Roommate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingQueueItem {
    pub id: String,
    pub title: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "pricePerMonth")]
    pub price_per_month: Option<String>,
    pub status: Option<ListingStatus>,
    #[serde(rename = "availableFrom")]
    pub available_from: Option<String>,
    #[serde(rename = "availableTo")]
    pub available_to: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub roommates: Vec<Roommate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeekerQueueItem {
    pub id: String,
    pub bio: Option<String>,
    pub term: Option<String>,
    #[serde(rename = "termYear")]
    pub term_year: Option<i32>,
    #[serde(rename = "budgetMin")]
    pub budget_min: Option<String>,
    #[serde(rename = "budgetMax")]
    pub budget_max: Option<String>,
    pub city: Option<String>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "MUTUAL")]
    Mutual,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Match {
    pub id: String,
    pub seeker_id: String,
    pub listing_id: String,
    pub status: MatchStatus,
    pub score: Option<f64>,
    pub matched_at: Option<String>,
    #[serde(default)]
    pub target_profile: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwipeOut {
    pub id: String,
    pub user_id: String,
    pub target_id: String,
    pub decision: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UndoOut {
    #[serde(default)]
    pub restored: Option<SwipeOut>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthOut {
    pub status: String,
    pub app_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeekerProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_to: Option<String>,
    #[serde(rename = "budgetMin", skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<String>,
    #[serde(rename = "budgetMax", skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(rename = "contactEmail", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "pricePerMonth", skip_serializing_if = "Option::is_none")]
    pub price_per_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "availableFrom", skip_serializing_if = "Option::is_none")]
    pub available_from: Option<String>,
    #[serde(rename = "availableTo", skip_serializing_if = "Option::is_none")]
    pub available_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "contactEmail", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_swipe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
struct SwipeIn<'a> {
    #[serde(rename = "targetId")]
    target_id: &'a str,
    decision: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct HidePayload {
    hidden: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct HiddenOut {
    hidden: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

// ---------------------------------------------------------------------------
// Request plumbing
// ---------------------------------------------------------------------------

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {token}"))
}

async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApiError> {
    match response.status() {
        401 | 403 => return Err(ApiError::Unauthorized),
        404 => return Err(ApiError::NotFound(context.to_owned())),
        _ => {}
    }

    if !response.ok() {
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("error while fetching {context}"));
        return Err(ApiError::Http(response.status(), detail));
    }

    response.json::<T>().await.map_err(ApiError::parse)
}

async fn get_json<T: DeserializeOwned>(
    endpoint: &str,
    token: &str,
    context: &str,
) -> Result<T, ApiError> {
    let response = bearer(Request::get(&url(endpoint)), token)
        .send()
        .await
        .map_err(ApiError::network)?;
    decode(response, context).await
}

async fn send_json<T: DeserializeOwned, B: Serialize>(
    builder: RequestBuilder,
    body: &B,
    context: &str,
) -> Result<T, ApiError> {
    let response = builder
        .json(body)
        .map_err(ApiError::parse)?
        .send()
        .await
        .map_err(ApiError::network)?;
    decode(response, context).await
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

pub async fn register(payload: &RegisterPayload) -> Result<AuthResponse, ApiError> {
    send_json(Request::post(&url("/auth/register")), payload, "registration").await
}

pub async fn login(payload: &LoginPayload) -> Result<AuthResponse, ApiError> {
    send_json(Request::post(&url("/auth/login")), payload, "sign-in").await
}

pub async fn logout() -> Result<(), ApiError> {
    let response = Request::post(&url("/auth/logout"))
        .send()
        .await
        .map_err(ApiError::network)?;
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Http(response.status(), "sign-out failed".into()))
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub async fn get_me(token: &str) -> Result<UserProfile, ApiError> {
    get_json("/users/me", token, "your account").await
}

pub async fn update_me(token: &str, update: &UserUpdate) -> Result<UserProfile, ApiError> {
    send_json(
        bearer(Request::patch(&url("/users/me")), token),
        update,
        "your account",
    )
    .await
}

// ---------------------------------------------------------------------------
// Seeker profiles
// ---------------------------------------------------------------------------

pub async fn my_seeker_profile(token: &str) -> Result<SeekerProfile, ApiError> {
    get_json("/seekers/me/profile", token, "your seeker profile").await
}

pub async fn update_seeker_profile(
    token: &str,
    update: &SeekerProfileUpdate,
) -> Result<SeekerProfile, ApiError> {
    send_json(
        bearer(Request::put(&url("/seekers/me/profile")), token),
        update,
        "your seeker profile",
    )
    .await
}

pub async fn hide_profile(token: &str, hidden: bool) -> Result<bool, ApiError> {
    let out: HiddenOut = send_json(
        bearer(Request::patch(&url("/profiles/hide")), token),
        &HidePayload { hidden },
        "profile visibility",
    )
    .await?;
    Ok(out.hidden)
}

// ---------------------------------------------------------------------------
// Host listings
// ---------------------------------------------------------------------------

pub async fn my_listing(token: &str) -> Result<HostListing, ApiError> {
    get_json("/hosts/me/listing", token, "your listing").await
}

pub async fn update_my_listing(
    token: &str,
    update: &ListingUpdate,
) -> Result<HostListing, ApiError> {
    send_json(
        bearer(Request::put(&url("/hosts/me/listing")), token),
        update,
        "your listing",
    )
    .await
}

pub async fn publish_listing(token: &str, listing_id: &str) -> Result<HostListing, ApiError> {
    let endpoint = format!("/listings/{listing_id}/publish");
    let response = bearer(Request::patch(&url(&endpoint)), token)
        .send()
        .await
        .map_err(ApiError::network)?;
    decode(response, "your listing").await
}

// ---------------------------------------------------------------------------
// Swipe queues and decisions
// ---------------------------------------------------------------------------

pub async fn seeker_queue(token: &str) -> Result<Vec<ListingQueueItem>, ApiError> {
    get_json("/swipe/queue/seeker", token, "the listing queue").await
}

pub async fn host_queue(token: &str) -> Result<Vec<SeekerQueueItem>, ApiError> {
    get_json("/swipe/queue/host", token, "the seeker queue").await
}

pub async fn record_swipe(
    token: &str,
    target_id: &str,
    decision: Decision,
) -> Result<SwipeOut, ApiError> {
    send_json(
        bearer(Request::post(&url("/swipe/swipes")), token),
        &SwipeIn {
            target_id,
            decision: decision.as_str(),
        },
        "swipe recording",
    )
    .await
}

pub async fn undo_swipe(token: &str) -> Result<UndoOut, ApiError> {
    let response = bearer(Request::post(&url("/swipe/swipes/undo")), token)
        .send()
        .await
        .map_err(ApiError::network)?;
    decode(response, "swipe undo").await
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

pub async fn my_matches(token: &str) -> Result<Vec<Match>, ApiError> {
    get_json("/matches", token, "your matches").await
}

pub async fn health_check() -> Result<HealthOut, ApiError> {
    let response = Request::get(&url("/healthz"))
        .send()
        .await
        .map_err(ApiError::network)?;
    decode(response, "the backend health endpoint").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_queue_item_decodes_wire_names() {
        let json = r#"{
            "id": "listing-1",
            "title": "Two bed near campus",
            "city": "Ann Arbor",
            "state": "MI",
            "pricePerMonth": "850.00",
            "status": "PUBLISHED",
            "availableFrom": "2026-05-01",
            "availableTo": "2026-08-15",
            "bio": "Quiet street.",
            "roommates": [{ "name": "Sam", "major": "CS", "photo_url": null }]
        }"#;

        let item: ListingQueueItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price_per_month.as_deref(), Some("850.00"));
        assert_eq!(item.status, Some(ListingStatus::Published));
        assert_eq!(item.available_from.as_deref(), Some("2026-05-01"));
        assert!(item.photos.is_empty());
        assert_eq!(item.roommates[0].major.as_deref(), Some("CS"));
    }

    #[test]
    fn seeker_queue_item_tolerates_missing_optionals() {
        let json = r#"{
            "id": "seeker-9",
            "bio": null,
            "term": "FALL",
            "termYear": 2026,
            "budgetMin": "500",
            "budgetMax": "700",
            "city": null,
            "available_from": null,
            "available_to": null
        }"#;

        let item: SeekerQueueItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.term_year, Some(2026));
        assert!(item.name.is_none());
        assert!(item.interests.is_empty());
    }

    #[test]
    fn auth_response_decodes() {
        let json = r#"{
            "token": "abc123",
            "user": {
                "id": "user-1",
                "email": "a@umich.edu",
                "firstName": "Ada",
                "role": "SEEKER"
            }
        }"#;

        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.token, "abc123");
        assert_eq!(auth.user.first_name.as_deref(), Some("Ada"));
        assert_eq!(auth.user.role.as_deref(), Some("SEEKER"));
    }

    #[test]
    fn match_decodes_status_variants() {
        let json = r#"[
            {"id": "m1", "seeker_id": "s", "listing_id": "l", "status": "PENDING",
             "score": 0.7, "matched_at": null},
            {"id": "m2", "seeker_id": "s", "listing_id": "l", "status": "MUTUAL",
             "score": null, "matched_at": "2026-08-01T12:00:00Z"}
        ]"#;

        let matches: Vec<Match> = serde_json::from_str(json).unwrap();
        assert_eq!(matches[0].status, MatchStatus::Pending);
        assert_eq!(matches[1].status, MatchStatus::Mutual);
        assert!(matches[1].target_profile.is_none());
    }

    #[test]
    fn swipe_payload_serializes_wire_names() {
        let payload = SwipeIn {
            target_id: "listing-1",
            decision: Decision::Like.as_str(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["targetId"], "listing-1");
        assert_eq!(json["decision"], "like");
    }

    #[test]
    fn partial_updates_skip_unset_fields() {
        let update = SeekerProfileUpdate {
            city: Some("Ann Arbor".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["city"], "Ann Arbor");
    }
}
