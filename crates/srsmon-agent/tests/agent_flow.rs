use chrono::DateTime;
use srsmon_agent::config::AgentConfig;
use srsmon_agent::helper::PluginHelper;
use srsmon_collector::status::request::StatusTarget;
use srsmon_collector::status::{CollectorOptions, ServerStatusPlugin};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

const REPORT: &str = "Version\t7.0.1\n\
LoadAverage\t0.50\t0.75\t1.25\n\
Memory\tMemTotal\t16000\n\
Memory\tMemUsedPercentage\t25\n\
Disk\t/\t2000\t25\n\
Disk\t/mnt/srslogdisk\t8000\t50\n";

fn serve_once(body: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).expect("read request");
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
    });

    (format!("http://{addr}/api?cmd=get_server_status"), handle)
}

fn poll(options: CollectorOptions) -> Vec<String> {
    let (uri, handle) = serve_once(REPORT);
    let dir = tempfile::tempdir().unwrap();
    let plugin = ServerStatusPlugin::new("", &StatusTarget::from_uri(&uri), options).unwrap();
    let helper = PluginHelper::new(plugin, Some(dir.path().join("state")));

    let mut out = Vec::new();
    helper
        .output_values(&mut out, DateTime::from_timestamp(1_700_000_000, 0).unwrap())
        .unwrap();
    handle.join().unwrap();

    String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn incomplete_memory_report_prints_no_memory_by_default() {
    let lines = poll(CollectorOptions::default());

    assert_eq!(
        lines,
        vec![
            "cuenote-srs.disk.disk_root_size\t2000000\t1700000000",
            "cuenote-srs.disk.disk_root_used\t500000\t1700000000",
            "cuenote-srs.disk.disk_srslogdisk_size\t8000000\t1700000000",
            "cuenote-srs.disk.disk_srslogdisk_used\t4000000\t1700000000",
            "cuenote-srs.loadavg.loadavg5\t1.250000\t1700000000",
        ]
    );
}

#[test]
fn zero_fill_without_disk_from_config() {
    let config: AgentConfig = toml::from_str(
        "[collector]\ndisk_enabled = false\nmemory_policy = \"zero-fill\"\n",
    )
    .unwrap();
    let lines = poll(config.collector);

    assert_eq!(
        lines,
        vec![
            "cuenote-srs.loadavg.loadavg5\t1.250000\t1700000000",
            "cuenote-srs.memory.mem_swap_total\t0\t1700000000",
            "cuenote-srs.memory.mem_swap_used\t0\t1700000000",
            "cuenote-srs.memory.mem_total\t16000000\t1700000000",
            "cuenote-srs.memory.mem_used\t4000000\t1700000000",
        ]
    );
}
