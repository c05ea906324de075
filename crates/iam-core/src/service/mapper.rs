//! Conversions between gateway DTOs and provider users.

use chrono::{DateTime, SecondsFormat, Utc};

use iam_shared::dto::{CreateUserRequest, UserProfile, UserResponse};

use crate::domain::{
    NewProviderUser, PasswordCredential, ProviderCredentials, ProviderUser, ProviderUserProfile,
};

/// Render a provider timestamp the way the provider itself does (RFC 3339, ms, `Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Map a provider user to its public view. An absent user maps to `None`.
pub fn to_user_response(user: Option<&ProviderUser>) -> Option<UserResponse> {
    let user = user?;

    let profile = user
        .profile
        .as_ref()
        .map(|p| UserProfile {
            first_name: p.first_name.clone().unwrap_or_default(),
            last_name: p.last_name.clone().unwrap_or_default(),
            email: p.email.clone().unwrap_or_default(),
            login: p.login.clone().unwrap_or_default(),
            mobile_phone: p.mobile_phone.clone().unwrap_or_default(),
        })
        .unwrap_or_default();

    Some(UserResponse {
        id: user.id.clone(),
        status: user.status.clone(),
        created: user.created.as_ref().map(format_timestamp).unwrap_or_default(),
        activated: user.activated.as_ref().map(format_timestamp),
        profile,
    })
}

/// Build the provider create payload. Empty optional fields stay unset and
/// the email doubles as the login.
pub fn to_new_provider_user(req: &CreateUserRequest) -> NewProviderUser {
    let mut profile = ProviderUserProfile {
        first_name: non_empty(&req.first_name),
        last_name: non_empty(&req.last_name),
        mobile_phone: non_empty(&req.mobile_phone),
        ..Default::default()
    };

    if !req.email.is_empty() {
        profile.email = Some(req.email.clone());
        profile.login = Some(req.email.clone());
    }

    NewProviderUser {
        profile,
        credentials: ProviderCredentials {
            // Sent even when empty; the provider owns password policy.
            password: PasswordCredential {
                value: req.password.clone(),
            },
        },
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> ProviderUser {
        ProviderUser {
            id: "00u1".to_string(),
            status: "ACTIVE".to_string(),
            created: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
            activated: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 31, 0).unwrap()),
            profile: Some(ProviderUserProfile {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                email: Some("ada@example.com".to_string()),
                login: Some("ada@example.com".to_string()),
                mobile_phone: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_user_maps_to_none() {
        assert_eq!(to_user_response(None), None);
    }

    #[test]
    fn test_maps_user_fields() {
        let resp = to_user_response(Some(&sample_user())).unwrap();

        assert_eq!(resp.id, "00u1");
        assert_eq!(resp.status, "ACTIVE");
        assert_eq!(resp.created, "2024-03-01T12:30:00.000Z");
        assert_eq!(resp.activated.as_deref(), Some("2024-03-01T12:31:00.000Z"));
        assert_eq!(resp.profile.first_name, "Ada");
        assert_eq!(resp.profile.login, "ada@example.com");
        assert!(resp.profile.mobile_phone.is_empty());
    }

    #[test]
    fn test_user_without_profile_has_empty_profile() {
        let user = ProviderUser {
            profile: None,
            activated: None,
            ..sample_user()
        };

        let resp = to_user_response(Some(&user)).unwrap();
        assert_eq!(resp.profile, UserProfile::default());
        assert_eq!(resp.activated, None);
        assert_eq!(resp.id, "00u1");
    }

    #[test]
    fn test_email_becomes_login() {
        let req = CreateUserRequest {
            email: "a@b.com".to_string(),
            ..Default::default()
        };

        let payload = to_new_provider_user(&req);
        assert_eq!(payload.profile.email.as_deref(), Some("a@b.com"));
        assert_eq!(payload.profile.login.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let req = CreateUserRequest {
            email: "a@b.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: String::new(),
            password: String::new(),
            mobile_phone: String::new(),
        };

        let value = serde_json::to_value(to_new_provider_user(&req)).unwrap();
        let profile = value["profile"].as_object().unwrap();

        assert_eq!(profile.get("firstName").unwrap(), "Ada");
        assert!(!profile.contains_key("lastName"));
        assert!(!profile.contains_key("mobilePhone"));
        // Password credential is always attached.
        assert_eq!(value["credentials"]["password"]["value"], "");
    }
}
