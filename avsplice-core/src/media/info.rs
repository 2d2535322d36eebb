//! Typed media metadata and the parser for ffprobe's JSON output.
//!
//! ffprobe is run with `-print_format json -show_format -show_streams`; its
//! output is turned into a [`MediaInfo`] here so nothing else in the crate
//! has to look at the raw JSON shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Media stream types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Attachment,
    Data,
    Unknown,
}

impl From<&str> for StreamType {
    fn from(s: &str) -> Self {
        match s {
            "video" => StreamType::Video,
            "audio" => StreamType::Audio,
            "subtitle" => StreamType::Subtitle,
            "attachment" => StreamType::Attachment,
            "data" => StreamType::Data,
            _ => StreamType::Unknown,
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamType::Video => write!(f, "Video"),
            StreamType::Audio => write!(f, "Audio"),
            StreamType::Subtitle => write!(f, "Subtitle"),
            StreamType::Attachment => write!(f, "Attachment"),
            StreamType::Data => write!(f, "Data"),
            StreamType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Stream information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamInfo {
    /// Stream index within the container
    pub index: u32,

    /// Stream type
    pub codec_type: StreamType,

    /// Codec name, when ffprobe reports one
    pub codec_name: Option<String>,

    /// Stream duration in seconds, when the container stores one per stream
    pub duration_secs: Option<f64>,

    pub width: Option<u32>,
    pub height: Option<u32>,
    pub channels: Option<u32>,
    pub sample_rate: Option<u32>,
}

/// Metadata for one media file, as reported by ffprobe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaInfo {
    /// Scalar container fields (`format_name`, `bit_rate`, ...), stringified
    pub format: BTreeMap<String, String>,

    /// Container-level tags
    pub format_tags: BTreeMap<String, String>,

    /// Container duration in seconds
    pub duration_secs: f64,

    /// Streams in container order
    pub streams: Vec<StreamInfo>,
}

impl MediaInfo {
    pub fn video_streams(&self) -> impl Iterator<Item = &StreamInfo> {
        self.streams
            .iter()
            .filter(|s| s.codec_type == StreamType::Video)
    }

    pub fn audio_streams(&self) -> impl Iterator<Item = &StreamInfo> {
        self.streams
            .iter()
            .filter(|s| s.codec_type == StreamType::Audio)
    }

    pub fn has_video(&self) -> bool {
        self.video_streams().next().is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.audio_streams().next().is_some()
    }

    /// Container format name (e.g. "matroska,webm"), if reported.
    pub fn format_name(&self) -> Option<&str> {
        self.format.get("format_name").map(String::as_str)
    }
}

#[derive(Deserialize)]
struct RawProbe {
    format: Option<Map<String, Value>>,
    #[serde(default)]
    streams: Vec<RawStream>,
}

#[derive(Deserialize)]
struct RawStream {
    index: u32,
    codec_type: Option<String>,
    codec_name: Option<String>,
    duration: Option<Value>,
    width: Option<Value>,
    height: Option<Value>,
    channels: Option<Value>,
    sample_rate: Option<Value>,
}

/// Parses ffprobe JSON (`-show_format -show_streams`) into a [`MediaInfo`].
///
/// Returns a description of the problem when the output is not valid JSON,
/// has no `format` section, or has no usable `format.duration`.
pub fn parse_probe_output(stdout: &[u8]) -> Result<MediaInfo, String> {
    let raw: RawProbe = serde_json::from_slice(stdout)
        .map_err(|e| format!("unparsable ffprobe output: {e}"))?;

    let raw_format = raw
        .format
        .ok_or_else(|| "ffprobe output has no format section".to_string())?;

    let mut format = BTreeMap::new();
    let mut format_tags = BTreeMap::new();
    for (key, value) in raw_format {
        if key == "tags" {
            if let Value::Object(tags) = value {
                format_tags.extend(
                    tags.into_iter()
                        .filter_map(|(k, v)| scalar_to_string(&v).map(|s| (k, s))),
                );
            }
        } else if let Some(text) = scalar_to_string(&value) {
            format.insert(key, text);
        }
    }

    let duration_secs = format
        .get("duration")
        .ok_or_else(|| "ffprobe output has no format duration".to_string())?
        .parse::<f64>()
        .map_err(|e| format!("invalid format duration: {e}"))?;
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return Err(format!("invalid format duration: {duration_secs}"));
    }

    let streams = raw
        .streams
        .into_iter()
        .map(|s| StreamInfo {
            index: s.index,
            codec_type: s
                .codec_type
                .as_deref()
                .map(StreamType::from)
                .unwrap_or(StreamType::Unknown),
            codec_name: s.codec_name,
            duration_secs: s.duration.as_ref().and_then(value_to_f64),
            width: s.width.as_ref().and_then(value_to_u32),
            height: s.height.as_ref().and_then(value_to_u32),
            channels: s.channels.as_ref().and_then(value_to_u32),
            sample_rate: s.sample_rate.as_ref().and_then(value_to_u32),
        })
        .collect();

    Ok(MediaInfo {
        format,
        format_tags,
        duration_secs,
        streams,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ffprobe prints some numeric fields as JSON strings ("48000"), others as numbers.
fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn value_to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
