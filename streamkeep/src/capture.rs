//! Capture-method selection.

use rawtap::DownloadSession;

use crate::Result;
use crate::mux::{MuxPlan, build_command};

/// How a recording's bytes reach disk.
#[derive(Debug, Clone)]
pub enum CaptureMethod {
    /// Launch the external transcoder with this argument list.
    Transcode(Vec<String>),
    /// Tap the stream straight to disk over HTTP.
    DirectTap(DownloadSession),
}

/// Choose the capture path for one source.
///
/// Sources the external transcoder mishandles (typically raw FLV endpoints)
/// are tapped directly; everything else goes through a transcoder invocation
/// built from `plan`.
pub fn select_capture(
    source_url: &str,
    plan: &MuxPlan,
    base_args: &[String],
    transcoder_handles_source: bool,
) -> Result<CaptureMethod> {
    if transcoder_handles_source {
        Ok(CaptureMethod::Transcode(build_command(plan, base_args)?))
    } else {
        Ok(CaptureMethod::DirectTap(DownloadSession::new(
            source_url,
            plan.output_path.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mux::ContainerKind;

    #[test]
    fn test_transcoder_path_builds_arguments() {
        let plan = MuxPlan::new(ContainerKind::TransportStream, "/tmp/out.ts");
        let base = vec!["-i".to_string(), "https://example.com/live".to_string()];
        match select_capture("https://example.com/live", &plan, &base, true).unwrap() {
            CaptureMethod::Transcode(args) => {
                assert_eq!(&args[..2], &base[..]);
                assert_eq!(args.last().map(String::as_str), Some("/tmp/out.ts"));
            }
            other => panic!("expected transcode, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_tap_keeps_source_and_output() {
        let plan = MuxPlan::new(ContainerKind::Flv, "/tmp/out.flv");
        match select_capture("https://example.com/live.flv", &plan, &[], false).unwrap() {
            CaptureMethod::DirectTap(session) => {
                assert_eq!(session.url, "https://example.com/live.flv");
                assert_eq!(session.save_path, std::path::PathBuf::from("/tmp/out.flv"));
            }
            other => panic!("expected direct tap, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_plan_propagates() {
        let mut plan = MuxPlan::new(ContainerKind::Mp4Family, "/tmp/out.mp4");
        plan.segmented = true;
        assert!(select_capture("https://example.com/live", &plan, &[], true).is_err());
    }
}
