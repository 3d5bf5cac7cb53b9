use agent_runner_api::normalize_host_url;
use agent_runner_api::url::{run_url, session_url};

#[test]
fn bare_host_gets_http_scheme() {
    assert_eq!(normalize_host_url("meraki-llm"), "http://meraki-llm");
    assert_eq!(normalize_host_url("localhost:8000/"), "http://localhost:8000");
}

#[test]
fn explicit_scheme_is_kept() {
    assert_eq!(
        normalize_host_url("https://runner.example.com/"),
        "https://runner.example.com"
    );
}

#[test]
fn blank_host_falls_back_to_default() {
    assert_eq!(normalize_host_url("   "), "http://meraki-llm");
}

#[test]
fn session_url_follows_apps_users_sessions_template() {
    let url = session_url("meraki-llm", "agent", "chat_user", "abc-123").expect("url");
    assert_eq!(
        url.as_str(),
        "http://meraki-llm/apps/agent/users/chat_user/sessions/abc-123"
    );
}

#[test]
fn session_url_percent_encodes_segments() {
    let url = session_url("meraki-llm", "agent", "chat user", "s").expect("url");
    assert_eq!(
        url.as_str(),
        "http://meraki-llm/apps/agent/users/chat%20user/sessions/s"
    );
}

#[test]
fn run_url_appends_run_to_base_path() {
    assert_eq!(
        run_url("http://localhost:8000").expect("url").as_str(),
        "http://localhost:8000/run"
    );
    assert_eq!(
        run_url("http://gateway/llm/").expect("url").as_str(),
        "http://gateway/llm/run"
    );
}
