//! Contract tests for `WwwClient` and `FaucetClient`.
//!
//! These tests use wiremock to simulate the web server and the faucet.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/v1/user/me` | `me_*` |
//! | GET    | `/api/v1/policy` | `policy_*` |
//! | GET    | `/api/v1/user/{id}` | `user_details_*` |
//! | POST   | `/api/v1/admin/managecms` | `manage_user_*` |
//! | POST   | `/api/v1/user/new` | `new_user_*` |
//! | GET    | `/api/v1/user/verify` | `verify_new_user_*` |
//! | POST   | faucet | `faucet_*` |

use pww_client::{ApiError, ClientConfig, FaucetClient, FaucetError, WwwClient};
use pww_core::{ContractorType, Domain, ManageUser};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(mock_server: &MockServer) -> ClientConfig {
    ClientConfig::local(&mock_server.uri()).unwrap()
}

fn test_client(mock_server: &MockServer) -> WwwClient {
    WwwClient::new(&test_config(mock_server)).unwrap()
}

// ── GET /api/v1/user/me ──────────────────────────────────────────────

#[tokio::test]
async fn me_returns_admin_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isadmin": true,
            "userid": "0b4f7e2e-admin",
            "email": "admin@example.com",
            "username": "admin"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = test_client(&mock_server).me().await.unwrap();
    assert!(reply.is_admin);
    assert_eq!(reply.username, "admin");
}

#[tokio::test]
async fn me_sends_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/me"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isadmin": false})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server);
    config.session = Some(zeroize::Zeroizing::new("abc123".into()));
    let reply = WwwClient::new(&config).unwrap().me().await.unwrap();
    assert!(!reply.is_admin);
}

#[tokio::test]
async fn me_maps_structured_400_to_user_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/me"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorcode": 12,
            "errorcontext": ["not logged in"]
        })))
        .mount(&mock_server)
        .await;

    match test_client(&mock_server).me().await.unwrap_err() {
        ApiError::UserError { code, context, .. } => {
            assert_eq!(code, 12);
            assert_eq!(context, vec!["not logged in".to_string()]);
        }
        other => panic!("expected UserError, got: {other:?}"),
    }
}

// ── GET /api/v1/policy ───────────────────────────────────────────────

#[tokio::test]
async fn policy_reads_min_password_length() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/policy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "minpasswordlength": 8,
            "minusernamelength": 3,
            "maxusernamelength": 30,
            "usernamesupportedchars": ["a-z"]
        })))
        .mount(&mock_server)
        .await;

    let policy = test_client(&mock_server).policy().await.unwrap();
    assert_eq!(policy.min_password_length, 8);
}

// ── GET /api/v1/user/{id} ────────────────────────────────────────────

#[tokio::test]
async fn user_details_unwraps_user_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/u-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "id": "u-42",
                "domain": 2,
                "contractortype": 1,
                "supervisoruserids": ["a"],
                "githubname": "ignored"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = test_client(&mock_server).user_details("u-42").await.unwrap();
    assert_eq!(record.domain, Some(Domain::Marketing));
    assert_eq!(record.contractor_type, Some(ContractorType::Direct));
    assert_eq!(record.supervisor_user_ids, vec!["a".to_string()]);
}

#[tokio::test]
async fn user_details_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .user_details("missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn user_details_500_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/u-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    match test_client(&mock_server).user_details("u-1").await.unwrap_err() {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got: {other:?}"),
    }
}

// ── POST /api/v1/admin/managecms ─────────────────────────────────────

#[tokio::test]
async fn manage_user_posts_wire_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/admin/managecms"))
        .and(body_json(json!({
            "userid": "u-42",
            "domain": 5,
            "contractortype": 1,
            "supervisoruserids": ["a", "b"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ManageUser {
        user_id: "u-42".into(),
        domain: Domain::Design,
        contractor_type: ContractorType::Direct,
        supervisor_user_ids: vec!["a".into(), "b".into()],
    };
    test_client(&mock_server).manage_user(&request).await.unwrap();
}

// ── POST /api/v1/user/new ────────────────────────────────────────────

#[tokio::test]
async fn new_user_registers_generated_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/new"))
        .and(body_string_contains("\"email\":\"bob@example.com\""))
        .and(body_string_contains("\"username\":\"bob\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verificationtoken": "tok-1",
            "paywalladdress": "TsAddr",
            "paywallamount": 10000000,
            "paywalltxnotbefore": 1700000000
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = test_client(&mock_server)
        .new_user("bob@example.com", "password123")
        .await
        .unwrap();
    assert_eq!(outcome.verification_token, "tok-1");
    assert_eq!(outcome.paywall_address, "TsAddr");
    assert_eq!(outcome.paywall_amount, 10_000_000);

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["publickey"].as_str().unwrap(),
        outcome.identity.public_key().to_hex()
    );
}

// ── GET /api/v1/user/verify ──────────────────────────────────────────

#[tokio::test]
async fn verify_new_user_sends_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/verify"))
        .and(query_param("email", "bob@example.com"))
        .and(query_param("verificationtoken", "tok-1"))
        .and(query_param("signature", "abcd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    test_client(&mock_server)
        .verify_new_user("bob@example.com", "tok-1", "abcd")
        .await
        .unwrap();
}

// ── faucet ───────────────────────────────────────────────────────────

#[tokio::test]
async fn faucet_pays_and_returns_txid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("address=TsAddr"))
        .and(body_string_contains("amount=0.1"))
        .and(body_string_contains("overridetoken=let-me-in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"TxID": "tx-9"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let faucet = FaucetClient::new(&test_config(&mock_server)).unwrap();
    let txid = faucet
        .pay("TsAddr", 10_000_000, Some("let-me-in"))
        .await
        .unwrap();
    assert_eq!(txid, "tx-9");
}

#[tokio::test]
async fn faucet_error_field_is_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Error": "rate limited"})),
        )
        .mount(&mock_server)
        .await;

    let faucet = FaucetClient::new(&test_config(&mock_server)).unwrap();
    match faucet.pay("TsAddr", 1, None).await.unwrap_err() {
        FaucetError::Rejected(reason) => assert_eq!(reason, "rate limited"),
        other => panic!("expected Rejected, got: {other:?}"),
    }
}
