use super::parser::DISK_MOUNTS;
use srsmon_common::types::{GraphDescriptor, MetricDescriptor, Unit};
use std::collections::BTreeMap;

const SCALE_KB: f64 = 1000.0;

/// Graph definitions for every metric the parser can emit.
///
/// Memory and disk figures are reported in kilobytes and scaled to bytes.
pub fn graph_definition(disk_enabled: bool) -> BTreeMap<String, GraphDescriptor> {
    let mut graphs = BTreeMap::new();

    graphs.insert(
        "loadavg".to_string(),
        GraphDescriptor::new(
            "Cuenote SR-S Load Average",
            Unit::Float,
            vec![MetricDescriptor::new("loadavg5", "loadavg5")],
        ),
    );

    graphs.insert(
        "memory".to_string(),
        GraphDescriptor::new(
            "Cuenote SR-S Memory",
            Unit::Bytes,
            vec![
                MetricDescriptor::new("mem_total", "total").scale(SCALE_KB),
                MetricDescriptor::new("mem_used", "used").stacked().scale(SCALE_KB),
                MetricDescriptor::new("mem_swap_total", "swap total").scale(SCALE_KB),
                MetricDescriptor::new("mem_swap_used", "swap used").scale(SCALE_KB),
            ],
        ),
    );

    if disk_enabled {
        let metrics = DISK_MOUNTS
            .iter()
            .flat_map(|(mount, prefix)| {
                [
                    MetricDescriptor::new(&format!("{prefix}_size"), &format!("{mount} size"))
                        .scale(SCALE_KB),
                    MetricDescriptor::new(&format!("{prefix}_used"), &format!("{mount} used"))
                        .scale(SCALE_KB),
                ]
            })
            .collect();

        graphs.insert(
            "disk".to_string(),
            GraphDescriptor::new("Cuenote SR-S Disk", Unit::Bytes, metrics),
        );
    }

    graphs
}
