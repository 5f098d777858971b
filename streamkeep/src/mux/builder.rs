//! Transcoder argument assembly.

use super::plan::{ContainerKind, MuxPlan};
use crate::error::{Error, Result};

/// Build the ordered transcoder argument list for `plan`.
///
/// `base_args` (input specs, hardware/quality flags) come first, unchanged.
/// Pure and deterministic: identical inputs yield identical token lists, and
/// the tokens are meant to be passed to the launcher individually, never
/// joined into a shell string.
pub fn build_command(plan: &MuxPlan, base_args: &[String]) -> Result<Vec<String>> {
    let segment_time = if plan.segmented {
        match plan.segment_duration_secs {
            Some(d) if d > 0 => Some(d),
            _ => {
                return Err(Error::invalid_mux_plan(
                    "segmented output requires a positive segment duration",
                ));
            }
        }
    } else {
        None
    };

    let mut args: Vec<String> = base_args.to_vec();
    let output = plan.output_path.to_string_lossy().into_owned();

    match (plan.container, segment_time) {
        // Resent TS headers and zero mux delay keep players decodable when
        // they join mid-stream.
        (ContainerKind::TransportStream, None) => args.extend([
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-map".to_string(),
            "0".to_string(),
            "-f".to_string(),
            "mpegts".to_string(),
            "-mpegts_flags".to_string(),
            "+resend_headers".to_string(),
            "-muxdelay".to_string(),
            "0".to_string(),
            "-muxpreload".to_string(),
            "0".to_string(),
            output,
        ]),
        (ContainerKind::TransportStream, Some(d)) => args.extend([
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-map".to_string(),
            "0".to_string(),
            "-f".to_string(),
            "segment".to_string(),
            "-segment_time".to_string(),
            d.to_string(),
            "-segment_format".to_string(),
            "mpegts".to_string(),
            "-reset_timestamps".to_string(),
            "1".to_string(),
            "-mpegts_flags".to_string(),
            "+resend_headers".to_string(),
            "-muxdelay".to_string(),
            "0".to_string(),
            "-muxpreload".to_string(),
            "0".to_string(),
            output,
        ]),
        // Fragmented, fast-start layout: the file stays playable if the
        // writer dies before the moov is finalized.
        (ContainerKind::Mp4Family, None) => args.extend([
            "-map".to_string(),
            "0".to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-f".to_string(),
            "mp4".to_string(),
            "-movflags".to_string(),
            "+faststart+frag_keyframe+empty_moov+delay_moov".to_string(),
            output,
        ]),
        // Audio is re-encoded: codec-copy is not segment-safe for mp4 audio.
        (ContainerKind::Mp4Family, Some(d)) => args.extend([
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-map".to_string(),
            "0".to_string(),
            "-f".to_string(),
            "segment".to_string(),
            "-segment_time".to_string(),
            d.to_string(),
            "-segment_format".to_string(),
            "mp4".to_string(),
            "-reset_timestamps".to_string(),
            "1".to_string(),
            "-movflags".to_string(),
            "+frag_keyframe+empty_moov+faststart+delay_moov".to_string(),
            "-flags".to_string(),
            "global_header".to_string(),
            output,
        ]),
        // The ADTS-to-ASC filter applies to both FLV branches.
        (ContainerKind::Flv, None) => args.extend([
            "-map".to_string(),
            "0".to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-bsf:a".to_string(),
            "aac_adtstoasc".to_string(),
            "-f".to_string(),
            "flv".to_string(),
            output,
        ]),
        (ContainerKind::Flv, Some(d)) => args.extend([
            "-map".to_string(),
            "0".to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            "-bsf:a".to_string(),
            "aac_adtstoasc".to_string(),
            "-f".to_string(),
            "segment".to_string(),
            "-segment_time".to_string(),
            d.to_string(),
            "-segment_format".to_string(),
            "flv".to_string(),
            "-reset_timestamps".to_string(),
            "1".to_string(),
            output,
        ]),
    }

    Ok(args)
}
