//! Prometheus text exposition format, version 0.0.4.
//!
//! `# HELP` and `# TYPE` lines attach metadata to a metric family; every
//! other non-comment line is a sample `name{labels} value [timestamp]`.
//! Lines that do not parse are skipped.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    #[default]
    Untyped,
}

impl MetricType {
    fn from_keyword(s: &str) -> Self {
        match s {
            "counter" => MetricType::Counter,
            "gauge" => MetricType::Gauge,
            "histogram" => MetricType::Histogram,
            "summary" => MetricType::Summary,
            _ => MetricType::Untyped,
        }
    }
}

/// Unit inferred from the metric name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Unit {
    #[serde(rename = "bytes")]
    Bytes,
    #[serde(rename = "s")]
    Seconds,
    #[default]
    #[serde(rename = "")]
    None,
}

impl Unit {
    pub fn for_name(name: &str) -> Self {
        if name.contains("bytes") {
            Unit::Bytes
        } else if name.contains("seconds") {
            Unit::Seconds
        } else {
            Unit::None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Bytes => "bytes",
            Unit::Seconds => "s",
            Unit::None => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub unit: Unit,
}

/// All samples from one scrape, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSet {
    samples: Vec<Sample>,
    #[serde(skip)]
    help: HashMap<String, String>,
}

impl MetricSet {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample named `name`.
    pub fn get(&self, name: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.name == name)
    }

    /// Value of the first sample named `name`, `0.0` when absent.
    pub fn value_or_zero(&self, name: &str) -> f64 {
        self.get(name).map_or(0.0, |s| s.value)
    }

    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples.iter().filter(move |s| s.name == name)
    }

    pub fn help(&self, family: &str) -> Option<&str> {
        self.help.get(family).map(String::as_str)
    }
}

/// Parse a full exposition body.
pub fn parse(text: &str) -> MetricSet {
    let mut types: HashMap<String, MetricType> = HashMap::new();
    let mut help = HashMap::new();
    let mut samples = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            let mut parts = rest.trim_start().splitn(3, char::is_whitespace);
            match (parts.next(), parts.next(), parts.next()) {
                (Some("HELP"), Some(family), doc) => {
                    help.insert(family.to_string(), doc.unwrap_or_default().trim().to_string());
                }
                (Some("TYPE"), Some(family), Some(kind)) => {
                    types.insert(family.to_string(), MetricType::from_keyword(kind.trim()));
                }
                _ => {}
            }
            continue;
        }

        match parse_sample(line) {
            Some((name, labels, value, timestamp_ms)) => {
                let metric_type = family_type(&types, name);
                samples.push(Sample {
                    unit: Unit::for_name(name),
                    name: name.to_string(),
                    labels,
                    value,
                    timestamp_ms,
                    metric_type,
                });
            }
            None => tracing::debug!(line = lineno + 1, "skipping malformed metrics line"),
        }
    }

    MetricSet { samples, help }
}

const FAMILY_SUFFIXES: [&str; 5] = ["_bucket", "_sum", "_count", "_total", "_created"];

/// Histogram and summary series carry a suffix that their `# TYPE` line lacks.
fn family_type(types: &HashMap<String, MetricType>, name: &str) -> MetricType {
    if let Some(t) = types.get(name) {
        return *t;
    }
    FAMILY_SUFFIXES
        .iter()
        .filter_map(|suffix| name.strip_suffix(suffix))
        .find_map(|family| types.get(family).copied())
        .unwrap_or_default()
}

type ParsedSample<'a> = (&'a str, BTreeMap<String, String>, f64, Option<i64>);

fn parse_sample(line: &str) -> Option<ParsedSample<'_>> {
    let name_end = line
        .find(|c: char| c == '{' || c.is_whitespace())
        .unwrap_or(line.len());
    let name = &line[..name_end];
    if !is_metric_name(name) {
        return None;
    }

    let mut rest = &line[name_end..];
    let mut labels = BTreeMap::new();
    if let Some(after_brace) = rest.strip_prefix('{') {
        let (parsed, remaining) = parse_labels(after_brace)?;
        labels = parsed;
        rest = remaining;
    }

    let mut fields = rest.split_whitespace();
    let value = parse_value(fields.next()?)?;
    let timestamp_ms = match fields.next() {
        Some(ts) => Some(ts.parse::<i64>().ok()?),
        None => None,
    };
    if fields.next().is_some() {
        return None;
    }

    Some((name, labels, value, timestamp_ms))
}

fn is_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// Parses `k="v",...}` and returns the labels and the text after `}`.
fn parse_labels(input: &str) -> Option<(BTreeMap<String, String>, &str)> {
    let mut labels = BTreeMap::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix('}') {
            return Some((labels, after));
        }

        let eq = rest.find('=')?;
        let key = rest[..eq].trim();
        if !is_metric_name(key) || key.contains(':') {
            return None;
        }
        rest = rest[eq + 1..].trim_start().strip_prefix('"')?;

        let mut value = String::new();
        let mut chars = rest.char_indices();
        let close = loop {
            let (i, c) = chars.next()?;
            match c {
                '"' => break i,
                '\\' => match chars.next()?.1 {
                    'n' => value.push('\n'),
                    other => value.push(other),
                },
                other => value.push(other),
            }
        };
        labels.insert(key.to_string(), value);

        rest = rest[close + 1..].trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after;
        } else if !rest.starts_with('}') {
            return None;
        }
    }
}

fn parse_value(s: &str) -> Option<f64> {
    match s {
        "+Inf" | "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => s.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}
