use crate::types::{GraphDescriptor, MetricDescriptor, Unit};

#[test]
fn graph_descriptor_serializes_agent_shape() {
    let graph = GraphDescriptor::new(
        "Memory",
        Unit::Bytes,
        vec![
            MetricDescriptor::new("mem_total", "total").scale(1000.0),
            MetricDescriptor::new("mem_used", "used").stacked().scale(1000.0),
        ],
    );

    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["label"], "Memory");
    assert_eq!(json["unit"], "bytes");
    assert_eq!(json["metrics"][0]["name"], "mem_total");
    assert_eq!(json["metrics"][1]["stacked"], true);
    // Harness-only hints stay out of the definition.
    assert!(json["metrics"][0].get("scale").is_none());
    assert!(json["metrics"][0].get("diff").is_none());
}

#[test]
fn metric_descriptor_builders() {
    let m = MetricDescriptor::new("requests", "requests").diff();
    assert!(m.diff);
    assert!(!m.stacked);
    assert_eq!(m.scale, None);
}

#[test]
fn unit_serializes_with_slash() {
    let json = serde_json::to_string(&Unit::BytesPerSec).unwrap();
    assert_eq!(json, "\"bytes/sec\"");
}

#[test]
fn has_metric_matches_by_name() {
    let graph = GraphDescriptor::new(
        "Load",
        Unit::Float,
        vec![MetricDescriptor::new("loadavg5", "loadavg5")],
    );
    assert!(graph.has_metric("loadavg5"));
    assert!(!graph.has_metric("loadavg1"));
}
