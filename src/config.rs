
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

/// Flip once the signup service exists. Until then the form talks to the
/// mock boundary in `effects::signup`.
pub const SIGNUP_ENDPOINT_ENABLED: bool = false;

pub fn signup_endpoint() -> Option<String> {
    if SIGNUP_ENDPOINT_ENABLED {
        Some(format!("{}/api/signup", get_backend_url()))
    } else {
        None
    }
}

/// The tilt parallax only runs on wide screens.
pub const DESKTOP_MEDIA_QUERY: &str = "(min-width: 901px)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_endpoint_stays_mocked_by_default() {
        assert_eq!(signup_endpoint(), None);
    }
}
