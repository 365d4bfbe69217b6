use crate::driver::{Driver, DriverError, FrameSource, VideoMetadata};
use crate::sources::{FileSource, Source};
use image::RgbImage;
use serde::Deserialize;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::{debug, warn};

/// FFmpeg driver: `ffprobe` for metadata, `ffmpeg` piping raw `rgb24` frames.
pub struct FFmpegDriver {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FFmpegDriver {
    pub fn new() -> Result<Self, DriverError> {
        let ffmpeg_path = Self::find_executable("ffmpeg")?;
        let ffprobe_path = Self::find_executable("ffprobe")?;

        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
        })
    }

    /// Use an explicit ffmpeg binary. `ffprobe` is looked up next to it first.
    pub fn with_path(ffmpeg_path: impl Into<String>) -> Result<Self, DriverError> {
        let path = ffmpeg_path.into();

        if !Path::new(&path).exists() {
            return Err(DriverError::Initialization(format!("FFmpeg executable not found at: {}", path)));
        }

        let sibling = Path::new(&path).with_file_name("ffprobe");
        let ffprobe_path = if sibling.exists() {
            sibling.display().to_string()
        } else {
            Self::find_executable("ffprobe")?
        };

        Ok(Self {
            ffmpeg_path: path,
            ffprobe_path,
        })
    }

    /// Raw `rgb24` decode to stdout. Display rotation is not applied, so
    /// frames keep the coded size ffprobe reports.
    fn decode_command(&self, source: &FileSource) -> Command {
        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.args(["-v", "error", "-nostdin", "-noautorotate", "-i"])
            .arg(source.path())
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }

    fn find_executable(name: &str) -> Result<String, DriverError> {
        // Try to find it in PATH
        if let Ok(output) = Command::new("which").arg(name).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Ok(path);
                }
            }
        }

        for dir in ["/usr/bin", "/usr/local/bin", "/opt/homebrew/bin"] {
            let candidate = Path::new(dir).join(name);
            if candidate.exists() {
                return Ok(candidate.display().to_string());
            }
        }

        Err(DriverError::Initialization(format!(
            "{name} executable not found. Please install FFmpeg or specify the path."
        )))
    }
}

impl Driver for FFmpegDriver {
    type Source = FileSource;
    type Frames = FFmpegFrames;

    fn probe(&self, source: &FileSource) -> Result<VideoMetadata, DriverError> {
        source.validate()?;

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "-select_streams",
                "v:0",
            ])
            .arg(source.path())
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(DriverError::Probe(format!(
                "ffprobe failed on {}: {}",
                source.description(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        metadata_from_probe(&output.stdout)
    }

    fn open(&self, source: &FileSource) -> Result<FFmpegFrames, DriverError> {
        let metadata = self.probe(source)?;
        if metadata.width == 0 || metadata.height == 0 {
            return Err(DriverError::Probe(format!(
                "{} reports no frame size",
                source.description()
            )));
        }

        let mut cmd = self.decode_command(source);
        debug!("Executing FFmpeg command: {:?}", cmd);

        let mut child = cmd.spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DriverError::Initialization("ffmpeg stdout was not captured".to_string()))?;

        Ok(FFmpegFrames::new(child, stdout, metadata))
    }
}

/// Splits a byte stream of packed `rgb24` frames into images.
#[derive(Debug)]
pub struct RawFrameReader<R> {
    reader: R,
    width: u32,
    height: u32,
    frame_len: usize,
    finished: bool,
}

impl<R: Read> RawFrameReader<R> {
    pub fn new(reader: R, width: u32, height: u32) -> Self {
        Self {
            reader,
            width,
            height,
            frame_len: width as usize * height as usize * 3,
            finished: false,
        }
    }

    /// Next full frame. A trailing partial frame is dropped along with the
    /// end of the stream; after the end or an error only `None` follows.
    pub fn next_frame(&mut self) -> Result<Option<RgbImage>, DriverError> {
        if self.finished || self.frame_len == 0 {
            return Ok(None);
        }

        let mut buf = vec![0u8; self.frame_len];
        match self.reader.read_exact(&mut buf) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                self.finished = true;
                return Ok(None);
            }
            Err(e) => {
                self.finished = true;
                return Err(DriverError::Decode(e.to_string()));
            }
        }

        RgbImage::from_raw(self.width, self.height, buf)
            .map(Some)
            .ok_or_else(|| DriverError::Decode("frame buffer has the wrong size".to_string()))
    }
}

/// Decoded frames read from a running `ffmpeg` process.
pub struct FFmpegFrames {
    child: Child,
    frames: RawFrameReader<BufReader<ChildStdout>>,
    metadata: VideoMetadata,
}

impl FFmpegFrames {
    fn new(child: Child, stdout: ChildStdout, metadata: VideoMetadata) -> Self {
        let frame_len = metadata.width as usize * metadata.height as usize * 3;
        let reader = BufReader::with_capacity(frame_len, stdout);
        Self {
            child,
            frames: RawFrameReader::new(reader, metadata.width, metadata.height),
            metadata,
        }
    }
}

impl FrameSource for FFmpegFrames {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Result<Option<RgbImage>, DriverError> {
        self.frames.next_frame()
    }
}

impl Drop for FFmpegFrames {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            if e.kind() != ErrorKind::InvalidInput {
                warn!("Failed to stop ffmpeg: {}", e);
            }
        }
        let _ = self.child.wait();
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: Option<ProbeFormat>,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
    #[serde(default)]
    tags: Option<ProbeTags>,
}

#[derive(Debug, Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

impl ProbeStream {
    /// Display rotation in degrees, from the display matrix or the legacy `rotate` tag.
    fn rotation(&self) -> i32 {
        self.side_data_list
            .iter()
            .find_map(|d| d.rotation)
            .or_else(|| {
                self.tags
                    .as_ref()
                    .and_then(|t| t.rotate.as_deref())
                    .and_then(|r| r.trim().parse::<f64>().ok())
            })
            .map(|r| r.round() as i32)
            .unwrap_or(0)
    }
}

/// Build [`VideoMetadata`] from `ffprobe -print_format json` output.
pub fn metadata_from_probe(json: &[u8]) -> Result<VideoMetadata, DriverError> {
    let probe: ProbeOutput = serde_json::from_slice(json)?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| DriverError::Probe("No video stream found".to_string()))?;

    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .unwrap_or(0.0);

    // Not every container records nb_frames; fall back to duration * fps
    let duration = stream
        .duration
        .as_deref()
        .or(probe.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|d| d.parse::<f64>().ok());
    let frame_count = stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.parse::<u64>().ok())
        .or_else(|| duration.map(|d| (d * fps).round().max(0.0) as u64))
        .unwrap_or(0);

    Ok(VideoMetadata {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        fps,
        frame_count,
        codec: stream.codec_name.clone().unwrap_or_default(),
        rotation: stream.rotation(),
    })
}

/// Parse a frame rate written as `"30000/1001"` or `"25"`.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let fps = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}
