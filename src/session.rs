use gloo_storage::errors::StorageError;
use gloo_storage::{SessionStorage, Storage};
use log::warn;
use serde::{Deserialize, Serialize};

const SESSION_KEY: &str = "sublet_swipe_session";

/// Which side of the marketplace the signed-in user is browsing as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SEEKER")]
    Seeker,
    #[serde(rename = "HOST")]
    Host,
}

impl Role {
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "SEEKER" => Some(Role::Seeker),
            "HOST" => Some(Role::Host),
            _ => None,
        }
    }
}

/// Bearer token plus the account facts the client needs between requests.
/// Credential checking itself lives in the backend; this is only the
/// client-side record of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub role: Option<Role>,
}

pub fn load_session() -> Option<Session> {
    match SessionStorage::get::<Session>(SESSION_KEY) {
        Ok(session) => Some(session),
        Err(StorageError::KeyNotFound(_)) => None,
        Err(err) => {
            warn!("Discarding unreadable stored session: {err}");
            SessionStorage::delete(SESSION_KEY);
            None
        }
    }
}

pub fn save_session(session: &Session) {
    if let Err(err) = SessionStorage::set(SESSION_KEY, session) {
        warn!("Failed to persist session: {err}");
    }
}

pub fn clear_session() {
    SessionStorage::delete(SESSION_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_backend_labels() {
        assert_eq!(Role::from_wire("SEEKER"), Some(Role::Seeker));
        assert_eq!(Role::from_wire("HOST"), Some(Role::Host));
        assert_eq!(Role::from_wire("ADMIN"), None);
        assert_eq!(Role::from_wire(""), None);
    }

    #[test]
    fn session_round_trips_through_json() {
        let session = Session {
            token: "tok".into(),
            email: "a@umich.edu".into(),
            role: Some(Role::Host),
        };
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"HOST\""));
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
