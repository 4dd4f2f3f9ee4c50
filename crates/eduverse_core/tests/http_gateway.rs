use eduverse_core::{
    GatewayError, HttpNotificationGateway, NotificationGateway, NotificationId, NotificationKind,
    SyncConfig,
};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// Serves one canned response per accepted connection and returns the
/// request heads it saw.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let mut heads = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0_u8; 1024];
            while !raw.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut buf).unwrap();
                if read == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..read]);
            }
            heads.push(String::from_utf8_lossy(&raw).into_owned());

            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        heads
    });

    (base_url, handle)
}

fn gateway_for(base_url: &str, auth_token: Option<&str>) -> HttpNotificationGateway {
    let config = SyncConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        auth_token: auth_token.map(str::to_string),
        ..SyncConfig::default()
    }
    .validate()
    .unwrap();
    HttpNotificationGateway::new(&config).unwrap()
}

const PAGE_BODY: &str = r#"{
    "notifications": [
        {"id": 12, "title": "Payment due", "message": "Tuition for March", "type": "warning",
         "is_read": false, "is_important": true, "requires_action": true,
         "created_at": "2024-01-10T11:30:00.000123", "action_url": "/payments/3", "action_text": "Pay"},
        {"id": 11, "title": "Welcome", "message": null, "type": "announcement",
         "is_read": true, "created_at": "2024-01-09T08:00:00+00:00"}
    ],
    "has_next": false, "has_prev": false, "page": 1, "pages": 1
}"#;

#[test]
fn fetch_page_requests_page_size_and_decodes_records() {
    let (base_url, server) = serve(vec![(200, PAGE_BODY)]);
    let gateway = gateway_for(&base_url, Some("secret-token"));

    let page = gateway.fetch_page(5).unwrap();

    let heads = server.join().unwrap();
    assert!(heads[0].starts_with("GET /api/notifications?per_page=5 HTTP/1.1"));
    assert!(heads[0]
        .to_ascii_lowercase()
        .contains("authorization: bearer secret-token"));

    assert_eq!(page.notifications.len(), 2);
    let first = &page.notifications[0];
    assert_eq!(first.id, NotificationId(12));
    assert_eq!(first.kind, NotificationKind::Warning);
    assert!(first.is_important);
    assert_eq!(first.action_url.as_deref(), Some("/payments/3"));

    let second = &page.notifications[1];
    assert_eq!(second.kind.icon_class(), "fas fa-bell");
    assert_eq!(second.message, "");
    assert!(second.is_read);
}

#[test]
fn non_success_status_is_reported_without_decoding() {
    let (base_url, server) = serve(vec![(500, r#"{"error": "boom"}"#)]);
    let gateway = gateway_for(&base_url, None);

    let err = gateway.fetch_page(5).unwrap_err();
    server.join().unwrap();

    assert_eq!(
        err,
        GatewayError::Status {
            endpoint: "notifications",
            code: 500,
        }
    );
    assert!(err.is_transient());
}

#[test]
fn malformed_body_is_reported() {
    let (base_url, server) = serve(vec![(200, "<html>login</html>")]);
    let gateway = gateway_for(&base_url, None);

    let err = gateway.fetch_page(5).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, GatewayError::Malformed(_)));
}

#[test]
fn acknowledge_read_posts_and_checks_success_flag() {
    let (base_url, server) = serve(vec![
        (200, r#"{"success": true, "message": "Notification marked as read"}"#),
        (200, r#"{"success": false}"#),
    ]);
    let gateway = gateway_for(&base_url, None);

    assert_eq!(gateway.acknowledge_read(NotificationId(7)), Ok(()));
    assert_eq!(
        gateway.acknowledge_read(NotificationId(8)),
        Err(GatewayError::Rejected(NotificationId(8)))
    );

    let heads = server.join().unwrap();
    assert!(heads[0].starts_with("POST /api/notifications/7/read HTTP/1.1"));
    assert!(heads[1].starts_with("POST /api/notifications/8/read HTTP/1.1"));
}

#[test]
fn dashboard_stats_decode_role_specific_counters() {
    let (base_url, server) = serve(vec![(
        200,
        r#"{"recent_grades": 3, "overdue_payments": 1, "unread_notifications": 4}"#,
    )]);
    let gateway = gateway_for(&base_url, None);

    let stats = gateway.fetch_dashboard_stats().unwrap();
    let heads = server.join().unwrap();

    assert!(heads[0].starts_with("GET /api/dashboard/stats HTTP/1.1"));
    assert_eq!(stats.unread_notifications, 4);
    assert_eq!(stats.recent_grades, Some(3));
    assert_eq!(stats.overdue_payments, Some(1));
    assert_eq!(stats.grades_given, None);
}

#[test]
fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let gateway = gateway_for(&base_url, None);

    let err = gateway.fetch_page(5).unwrap_err();

    assert!(matches!(err, GatewayError::Transport(_)));
    assert_eq!(err.code(), "transport_failed");
}
