use super::MemoryPolicy;
use regex::Regex;
use srsmon_common::types::MetricSample;
use std::sync::LazyLock;

static LOAD_AVERAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^LoadAverage\t([^\t]+)\t([^\t]+)\t([^\t]+)$").expect("valid load average pattern")
});

static MEMORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Memory\t([^\t]+)\t([^\t]+)$").expect("valid memory pattern")
});

static DISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Disk\t([^\t]+)\t([^\t]+)\t([^\t]+)$").expect("valid disk pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryField {
    Total,
    UsedPercentage,
    SwapTotal,
    SwapUsedPercentage,
}

const MEMORY_ITEMS: &[(&str, MemoryField)] = &[
    ("MemTotal", MemoryField::Total),
    ("MemUsedPercentage", MemoryField::UsedPercentage),
    ("SwapTotal", MemoryField::SwapTotal),
    ("SwapUsedPercentage", MemoryField::SwapUsedPercentage),
];

/// Mount points reported as disk metrics, with their metric-name prefix.
pub const DISK_MOUNTS: &[(&str, &str)] = &[
    ("/", "disk_root"),
    ("/mnt/srslogdisk", "disk_srslogdisk"),
];

/// Memory fields seen during one scan.
#[derive(Debug, Default)]
struct MemoryInfo {
    total: Option<f64>,
    used_percentage: Option<f64>,
    swap_total: Option<f64>,
    swap_used_percentage: Option<f64>,
}

impl MemoryInfo {
    fn set(&mut self, field: MemoryField, value: f64) {
        match field {
            MemoryField::Total => self.total = Some(value),
            MemoryField::UsedPercentage => self.used_percentage = Some(value),
            MemoryField::SwapTotal => self.swap_total = Some(value),
            MemoryField::SwapUsedPercentage => self.swap_used_percentage = Some(value),
        }
    }

    fn is_complete(&self) -> bool {
        self.total.is_some()
            && self.used_percentage.is_some()
            && self.swap_total.is_some()
            && self.swap_used_percentage.is_some()
    }

    fn emit(&self, policy: MemoryPolicy, out: &mut MetricSample) {
        if policy == MemoryPolicy::RequireComplete && !self.is_complete() {
            return;
        }

        let total = self.total.unwrap_or(0.0);
        let swap_total = self.swap_total.unwrap_or(0.0);
        out.insert("mem_total".to_string(), total);
        out.insert(
            "mem_used".to_string(),
            percent_of(total, self.used_percentage.unwrap_or(0.0)),
        );
        out.insert("mem_swap_total".to_string(), swap_total);
        out.insert(
            "mem_swap_used".to_string(),
            percent_of(swap_total, self.swap_used_percentage.unwrap_or(0.0)),
        );
    }
}

/// Turns a `get_server_status` report into metric values.
///
/// Records are tab separated and tagged by their first field. Lines that
/// match no known record, carry an unknown memory name or mount point, or
/// have the wrong number of fields are skipped. Numbers that fail to parse
/// read as zero.
///
/// # Examples
///
/// ```
/// use srsmon_collector::status::parser::StatusReportParser;
/// use srsmon_collector::status::MemoryPolicy;
///
/// let parser = StatusReportParser::new(true, MemoryPolicy::RequireComplete);
/// let sample = parser.parse("LoadAverage\t0.10\t0.20\t0.30\nDisk\t/\t2000\t25\n");
/// assert_eq!(sample["loadavg5"], 0.30);
/// assert_eq!(sample["disk_root_used"], 500.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StatusReportParser {
    disk_enabled: bool,
    memory_policy: MemoryPolicy,
}

impl StatusReportParser {
    pub fn new(disk_enabled: bool, memory_policy: MemoryPolicy) -> Self {
        Self {
            disk_enabled,
            memory_policy,
        }
    }

    pub fn parse(&self, body: &str) -> MetricSample {
        let mut sample = MetricSample::new();
        let mut memory = MemoryInfo::default();

        for line in body.lines() {
            if let Some(caps) = LOAD_AVERAGE_RE.captures(line) {
                sample.insert("loadavg5".to_string(), parse_number(&caps[3]));
            } else if let Some(caps) = MEMORY_RE.captures(line) {
                match lookup(MEMORY_ITEMS, &caps[1]) {
                    Some(field) => memory.set(field, parse_number(&caps[2])),
                    None => tracing::trace!(field = &caps[1], "Skipping unknown memory field"),
                }
            } else if let Some(caps) = DISK_RE.captures(line) {
                if !self.disk_enabled {
                    continue;
                }
                match lookup(DISK_MOUNTS, &caps[1]) {
                    Some(prefix) => {
                        let size = parse_number(&caps[2]);
                        let used = percent_of(size, parse_number(&caps[3]));
                        sample.insert(format!("{prefix}_size"), size);
                        sample.insert(format!("{prefix}_used"), used);
                    }
                    None => tracing::trace!(mount = &caps[1], "Skipping unknown mount point"),
                }
            }
        }

        memory.emit(self.memory_policy, &mut sample);
        tracing::debug!(metrics = sample.len(), "Parsed server status report");
        sample
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(key, _)| *key == name).map(|(_, v)| *v)
}

fn parse_number(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}

fn percent_of(total: f64, percentage: f64) -> f64 {
    total * percentage / 100.0
}
