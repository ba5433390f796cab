use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "sdn-route-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn topo_route(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_topo_route"))
        .args(args)
        .output()
        .expect("run topo_route")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

const SNAPSHOT: &str = r#"
{
    "switches": [
        { "dpid": "0000000000000001" },
        { "dpid": "0000000000000002" },
        { "dpid": "0000000000000003" }
    ],
    "links": [
        { "src": { "dpid": "0000000000000001", "port_no": "00000002" },
          "dst": { "dpid": "0000000000000002", "port_no": "00000001" } },
        { "src": { "dpid": "0000000000000001", "port_no": "00000003" },
          "dst": { "dpid": "0000000000000002", "port_no": "00000004" } },
        { "src": { "dpid": "0000000000000002", "port_no": "00000002" },
          "dst": { "dpid": "0000000000000003", "port_no": "00000001" } }
    ]
}
"#;

const ROUTE_1_TO_3: &str =
    "/v1.0/topology/route/0000000000000001/00000009/0000000000000003/00000009";

#[test]
fn topo_route_prints_route_from_snapshot() {
    let dir = unique_temp_dir("route");
    let topology = write_file(&dir, "topology.json", SNAPSHOT);

    let output = topo_route(&[
        "--topology",
        topology.to_str().expect("utf-8 path"),
        "--selection",
        "lowest-port",
        ROUTE_1_TO_3,
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let route = stdout_json(&output);
    let hops: Vec<(String, String)> = route
        .as_array()
        .expect("route array")
        .iter()
        .map(|hop| {
            (
                hop["switch"].as_str().unwrap_or_default().to_string(),
                hop["port"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let expected = [
        ("0000000000000001", "00000009"),
        ("0000000000000001", "00000002"),
        ("0000000000000002", "00000001"),
        ("0000000000000002", "00000002"),
        ("0000000000000003", "00000001"),
        ("0000000000000003", "00000009"),
    ];
    assert_eq!(hops.len(), expected.len());
    for (got, want) in hops.iter().zip(expected) {
        assert_eq!((got.0.as_str(), got.1.as_str()), want);
    }
}

#[test]
fn topo_route_reads_selection_from_config() {
    let dir = unique_temp_dir("config");
    let topology = write_file(&dir, "topology.json", SNAPSHOT);
    let config = write_file(
        &dir,
        "config.json",
        r#"{ "edge_selection": { "kind": "lowest_port" }, "log_filter": "warn" }"#,
    );

    for _ in 0..5 {
        let output = topo_route(&[
            "--topology",
            topology.to_str().expect("utf-8 path"),
            "--config",
            config.to_str().expect("utf-8 path"),
            ROUTE_1_TO_3,
        ]);
        assert!(output.status.success());
        let route = stdout_json(&output);
        assert_eq!(route[1]["port"], "00000002");
        assert_eq!(route[2]["port"], "00000001");
    }
}

#[test]
fn topo_route_lists_links_of_one_switch() {
    let dir = unique_temp_dir("links");
    let topology = write_file(&dir, "topology.json", SNAPSHOT);

    let output = topo_route(&[
        "--topology",
        topology.to_str().expect("utf-8 path"),
        "/v1.0/topology/links/0000000000000001",
    ]);
    assert!(output.status.success());
    let links = stdout_json(&output);
    assert_eq!(links.as_array().map(Vec::len), Some(2));
    assert_eq!(links[1]["dst"]["port_no"], "00000004");
}

#[test]
fn topo_route_exits_nonzero_on_unmatched_path() {
    let dir = unique_temp_dir("not-found");
    let topology = write_file(&dir, "topology.json", SNAPSHOT);

    let output = topo_route(&[
        "--topology",
        topology.to_str().expect("utf-8 path"),
        "/v1.0/topology/route/1/1/3/1",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("\"error\""));

    let output = topo_route(&[
        "--topology",
        topology.to_str().expect("utf-8 path"),
        "--method",
        "POST",
        "/v1.0/topology/switches",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("405"));
}

#[test]
fn topo_route_reports_missing_snapshot() {
    let dir = unique_temp_dir("missing");
    let missing = dir.join("nope.json");
    let output = topo_route(&[
        "--topology",
        missing.to_str().expect("utf-8 path"),
        "/v1.0/topology/switches",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn topo_route_serves_generated_fat_tree() {
    let output = topo_route(&["--fat-tree", "4", "/v1.0/topology/switches"]);
    assert!(output.status.success());
    let switches = stdout_json(&output);
    assert_eq!(switches.as_array().map(Vec::len), Some(20));

    // core 交换机 dpid 1..=4，pod 0 的 edge 交换机为 5、6；主机端口为 1、2
    let output = topo_route(&[
        "--fat-tree",
        "4",
        "--parallel-links",
        "2",
        "--selection",
        "flow-hash",
        "--seed",
        "3",
        "/v1.0/topology/route/0000000000000005/00000001/0000000000000006/00000001",
    ]);
    assert!(output.status.success());
    let route = stdout_json(&output);
    assert_eq!(route.as_array().map(Vec::len), Some(6));
    assert_eq!(route[0]["switch"], "0000000000000005");
    assert_eq!(route[5]["switch"], "0000000000000006");
}
