use super::*;

fn settings(api_key: &str) -> ClientSettings {
    ClientSettings {
        api_host: "https://app.ticketmaster.com".to_string(),
        api_path: "/discovery/v2/events.json".to_string(),
        api_key: api_key.to_string(),
        query: QueryOptions::default(),
        timeout_secs: 30,
        user_agent: "eventscout-test".to_string(),
    }
}

#[test]
fn search_url_targets_configured_endpoint() {
    let client = DiscoveryClient::new(settings("test-key")).expect("client should build");
    let url = client.search_url(37.38, -122.08, Some("live music")).unwrap();
    assert_eq!(
        url,
        "https://app.ticketmaster.com/discovery/v2/events.json?apikey=test%2Dkey&geoPoint=9q9hwhb4&keyword=live%20music&radius=50"
    );
}

#[test]
fn base_url_slashes_are_normalised() {
    let client = DiscoveryClient::with_base_url(settings("k"), "http://127.0.0.1:8080/")
        .expect("client should build");
    let url = client.search_url(0.0, 0.0, None).unwrap();
    assert!(
        url.starts_with("http://127.0.0.1:8080/discovery/v2/events.json?apikey=k&"),
        "{url}"
    );
}

#[test]
fn blank_api_key_is_rejected() {
    let result = DiscoveryClient::new(settings("  "));
    assert!(matches!(result, Err(DiscoveryError::InvalidArgument(_))));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = DiscoveryClient::with_base_url(settings("k"), "not a url");
    assert!(matches!(result, Err(DiscoveryError::InvalidArgument(_))));
}

#[test]
fn search_url_rejects_out_of_range_coordinates() {
    let client = DiscoveryClient::new(settings("k")).unwrap();
    assert!(matches!(
        client.search_url(-91.0, 0.0, None),
        Err(DiscoveryError::InvalidArgument(_))
    ));
}

#[test]
fn settings_debug_redacts_api_key() {
    let rendered = format!("{:?}", settings("very-secret"));
    assert!(!rendered.contains("very-secret"));
}
