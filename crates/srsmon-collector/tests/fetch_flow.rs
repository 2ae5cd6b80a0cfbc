use srsmon_collector::error::CollectorError;
use srsmon_collector::status::request::StatusTarget;
use srsmon_collector::status::{CollectorOptions, MemoryPolicy, ServerStatusPlugin};
use srsmon_collector::Plugin;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

const REPORT: &str = "LoadAverage\t0.50\t0.75\t1.25\n\
Memory\tMemTotal\t16000\n\
Memory\tMemUsedPercentage\t25\n\
Memory\tSwapTotal\t4000\n\
Memory\tSwapUsedPercentage\t50\n\
Disk\t/\t2000\t25\n";

/// Serves one canned HTTP response and returns the raw request it received.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut buf = [0u8; 4096];
        let n = stream.read(&mut buf).expect("read request");
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "{status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });

    (format!("http://{addr}"), handle)
}

#[test]
fn fetch_metrics_from_stub_server() {
    let (base, handle) = serve_once("HTTP/1.1 200 OK", REPORT);
    let target = StatusTarget::from_uri(&format!("{base}/api?cmd=get_server_status"));
    let plugin = ServerStatusPlugin::new("", &target, CollectorOptions::default()).unwrap();

    let sample = plugin.fetch_metrics().unwrap();
    let request = handle.join().unwrap();

    assert!(request.starts_with("GET /api?cmd=get_server_status HTTP/1.1"));
    assert_eq!(sample["loadavg5"], 1.25);
    assert_eq!(sample["mem_total"], 16000.0);
    assert_eq!(sample["mem_used"], 4000.0);
    assert_eq!(sample["mem_swap_used"], 2000.0);
    assert_eq!(sample["disk_root_used"], 500.0);
}

#[test]
fn error_status_is_parsed_like_any_body() {
    let (base, handle) = serve_once("HTTP/1.1 500 Internal Server Error", "oops\n");
    let target = StatusTarget::from_uri(&base);
    let options = CollectorOptions {
        memory_policy: MemoryPolicy::RequireComplete,
        ..CollectorOptions::default()
    };
    let plugin = ServerStatusPlugin::new("", &target, options).unwrap();

    let sample = plugin.fetch_metrics().unwrap();
    handle.join().unwrap();
    assert!(sample.is_empty());
}

#[test]
fn connection_refused_is_a_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let target = StatusTarget::from_uri(&format!("http://{addr}/api?cmd=get_server_status"));
    let plugin = ServerStatusPlugin::new("", &target, CollectorOptions::default()).unwrap();

    let err = plugin.fetch_metrics().unwrap_err();
    assert!(matches!(err, CollectorError::Transport(_)));
}
