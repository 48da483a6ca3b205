use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A classroom paired with the camera that reports its people count.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub camera_ip: String,
    pub is_active: bool,
    pub status: RoomStatus,
    pub latest_count: u32,
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Room {
    /// One-line summary: name, camera, status, latest count and when it was taken.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}) {:?}: {} people, updated {}",
            self.name,
            self.camera_ip,
            self.status,
            self.latest_count,
            self.last_updated.as_deref().unwrap_or("never")
        )
    }
}

/// The backend hands out numeric ids, older payloads used strings.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RoomId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomId::Number(id) => write!(f, "{id}"),
            RoomId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Active,
    Inactive,
    Offline,
}

/// One people-count sample reported for a room.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CameraCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    pub people_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames_processed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_time_ms: Option<f64>,
    pub timestamp: String,
}

/// Request body for registering a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewRoom {
    pub name: String,
    pub camera_ip: String,
    pub is_active: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomValidationError {
    #[error("Room name is required")]
    MissingName,
    #[error("Camera IP address is required")]
    MissingCameraIp,
    #[error("Invalid IP address format")]
    InvalidCameraIp,
}

impl NewRoom {
    /// Checks user input before any request is made. Both fields are trimmed.
    pub fn validate(name: &str, camera_ip: &str) -> Result<Self, RoomValidationError> {
        let name = name.trim();
        let camera_ip = camera_ip.trim();
        if name.is_empty() {
            return Err(RoomValidationError::MissingName);
        }
        if camera_ip.is_empty() {
            return Err(RoomValidationError::MissingCameraIp);
        }
        if !is_dotted_quad(camera_ip) {
            return Err(RoomValidationError::InvalidCameraIp);
        }
        Ok(NewRoom {
            name: name.to_string(),
            camera_ip: camera_ip.to_string(),
            is_active: true,
        })
    }
}

// Shape check only: four groups of one to three digits. Octet range is left
// to the backend.
fn is_dotted_quad(ip: &str) -> bool {
    let octets: Vec<&str> = ip.split('.').collect();
    octets.len() == 4
        && octets
            .iter()
            .all(|octet| (1..=3).contains(&octet.len()) && octet.bytes().all(|b| b.is_ascii_digit()))
}

/// Paths of the room endpoints under a base URL such as `/api`.
#[derive(Clone, Debug)]
pub struct RoomEndpoints {
    base_url: String,
}

impl RoomEndpoints {
    pub fn new(base_url: &str) -> Self {
        RoomEndpoints {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn rooms(&self) -> String {
        format!("{}/rooms/", self.base_url)
    }

    pub fn room(&self, id: &RoomId) -> String {
        format!("{}/rooms/{id}/", self.base_url)
    }

    pub fn counts(&self, id: &RoomId) -> String {
        format!("{}/rooms/{id}/counts/", self.base_url)
    }

    pub fn stop(&self, id: &RoomId) -> String {
        format!("{}/rooms/{id}/stop/", self.base_url)
    }
}

/// `Authorization` header value for an optional API token.
pub fn authorization_header(token: Option<&str>) -> Option<String> {
    token
        .filter(|token| !token.is_empty())
        .map(|token| format!("Token {token}"))
}

/// Message shown for a failed request: the body's `detail` if it has one.
pub fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(Value::as_str).map(str::to_string))
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| format!("API request failed: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_and_activates() {
        let room = NewRoom::validate("  Lab 3 ", " 192.168.1.100 ").unwrap();
        assert_eq!(
            room,
            NewRoom {
                name: "Lab 3".to_string(),
                camera_ip: "192.168.1.100".to_string(),
                is_active: true,
            }
        );
        assert_eq!(
            serde_json::to_value(&room).unwrap(),
            serde_json::json!({"name": "Lab 3", "camera_ip": "192.168.1.100", "is_active": true})
        );
    }

    #[test]
    fn test_validate_reports_first_problem() {
        assert_eq!(NewRoom::validate("  ", ""), Err(RoomValidationError::MissingName));
        assert_eq!(NewRoom::validate("Lab", "   "), Err(RoomValidationError::MissingCameraIp));
        for ip in ["192.168.1", "192.168.1.1.1", "a.b.c.d", "1234.1.1.1", "10..0.1", "camera.local"] {
            assert_eq!(
                NewRoom::validate("Lab", ip),
                Err(RoomValidationError::InvalidCameraIp),
                "{ip}"
            );
        }
        assert_eq!(
            RoomValidationError::InvalidCameraIp.to_string(),
            "Invalid IP address format"
        );
    }

    #[test]
    fn test_shape_check_does_not_range_check() {
        assert!(NewRoom::validate("Lab", "999.1.1.1").is_ok());
    }

    #[test]
    fn test_room_payload_decodes() {
        let room: Room = serde_json::from_str(
            r#"{"id": 4, "name": "Lab 3", "camera_ip": "10.0.0.7", "is_active": true,
                "status": "offline", "latest_count": 12, "last_updated": null}"#,
        )
        .unwrap();
        assert_eq!(room.id, RoomId::Number(4));
        assert_eq!(room.status, RoomStatus::Offline);
        assert_eq!(room.last_updated, None);
        assert_eq!(room.created_at, None);
        assert_eq!(room.describe(), "Lab 3 (10.0.0.7) Offline: 12 people, updated never");
    }

    #[test]
    fn test_count_payload_decodes_optional_metadata() {
        let counts: Vec<CameraCount> = serde_json::from_str(
            r#"[{"people_count": 3, "timestamp": "2025-09-01T09:00:00Z"},
                {"id": "c2", "people_count": 5, "frames_processed": 30,
                 "inference_time_ms": 41.5, "timestamp": "2025-09-01T09:00:05Z"}]"#,
        )
        .unwrap();
        assert_eq!(counts[0].frames_processed, None);
        assert_eq!(counts[1].id, Some(RoomId::Text("c2".to_string())));
        assert_eq!(counts[1].inference_time_ms, Some(41.5));
    }

    #[test]
    fn test_endpoints() {
        let endpoints = RoomEndpoints::new("http://localhost:8000/api/");
        let id = RoomId::Number(7);
        assert_eq!(endpoints.rooms(), "http://localhost:8000/api/rooms/");
        assert_eq!(endpoints.room(&id), "http://localhost:8000/api/rooms/7/");
        assert_eq!(endpoints.counts(&id), "http://localhost:8000/api/rooms/7/counts/");
        assert_eq!(endpoints.stop(&id), "http://localhost:8000/api/rooms/7/stop/");
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(authorization_header(Some("abc")), Some("Token abc".to_string()));
        assert_eq!(authorization_header(Some("")), None);
        assert_eq!(authorization_header(None), None);
    }

    #[test]
    fn test_api_error_message_prefers_detail() {
        assert_eq!(api_error_message(404, r#"{"detail": "Not found."}"#), "Not found.");
        assert_eq!(api_error_message(500, "<html>oops</html>"), "API request failed: 500");
        assert_eq!(api_error_message(400, r#"{"error": "bad"}"#), "API request failed: 400");
        assert_eq!(api_error_message(502, ""), "API request failed: 502");
    }
}
