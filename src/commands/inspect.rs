//! Inspect command handler

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use scrubline::markers::MediaMarker;
use scrubline::time::format_timestamp;
use scrubline::Project;

/// Print the segments, gaps and markers of a project.
#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path) -> Result<()> {
    let project = Project::load(path)?;
    print!("{}", render(&project));
    Ok(())
}

/// Render the project summary.
fn render(project: &Project) -> String {
    let source = project.source();
    let show_hours = source.duration() >= Duration::from_secs(3600);
    let stamp = |d: Duration| format_timestamp(d, show_hours);

    let mut out = String::new();
    out.push_str(&format!("Project:  {}\n", project.name));
    out.push_str(&format!("Duration: {}\n", stamp(source.duration())));
    out.push_str(&format!(
        "Video:    {}\n",
        if source.has_video() { "yes" } else { "no" }
    ));

    out.push_str("\nSegments:\n");
    let mut playable = 0;
    for segment in source.segments() {
        let span = format!("{} - {}", stamp(segment.offset()), stamp(segment.end()));
        match segment.source() {
            Some(uri) => {
                let index = format!("#{}", playable);
                out.push_str(&format!("  {:<4}{}  {}\n", index, span, uri));
                playable += 1;
            }
            None => out.push_str(&format!("      {}  (gap)\n", span)),
        }
    }

    let mut markers = project.markers();
    markers.sort_by_key(MediaMarker::start_time);
    if !markers.is_empty() {
        out.push_str("\nMarkers:\n");
        for marker in &markers {
            out.push_str(&format!("  {}\n", render_marker(marker, show_hours)));
        }
    }

    out
}

fn render_marker(marker: &MediaMarker, show_hours: bool) -> String {
    let start = format_timestamp(marker.start_time(), show_hours);
    let (span, kind) = if marker.is_range() {
        let end = format_timestamp(marker.end_time(), show_hours);
        (format!("{} - {}", start, end), "range")
    } else {
        (start, "point")
    };

    let mut label = marker.name().to_string();
    if !marker.description().is_empty() {
        label.push_str(": ");
        label.push_str(marker.description());
    }
    let flags: Vec<&str> = [
        (marker.is_system_tag(), "system"),
        (marker.is_read_only(), "read-only"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();
    if !flags.is_empty() {
        label.push_str(&format!(" [{}]", flags.join(", ")));
    }

    let width = if show_hours { 27 } else { 21 };
    format!("{:<width$}  {}  {}", span, kind, label, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_are_listed_without_index() {
        let project = Project::from_json_str(
            r#"{ "name": "t", "segments": [
                { "offset": 0.0, "duration": 1.0, "source": "a.wav" },
                { "offset": 1.0, "duration": 1.0 },
                { "offset": 2.0, "duration": 1.0, "source": "b.wav" }
            ] }"#,
        )
        .unwrap();
        let out = render(&project);
        assert!(out.contains("  #0  00:00.000 - 00:01.000  a.wav\n"));
        assert!(out.contains("      00:01.000 - 00:02.000  (gap)\n"));
        assert!(out.contains("  #1  00:02.000 - 00:03.000  b.wav\n"));
        assert!(!out.contains("Markers:"));
    }

    #[test]
    fn marker_flags_and_description() {
        let marker = MediaMarker::with_details(
            uuid::Uuid::new_v4(),
            "call-start",
            true,
            Duration::from_millis(500),
            None,
            "Call start",
            "",
            true,
        );
        assert_eq!(
            render_marker(&marker, false),
            "00:00.500              point  Call start [system, read-only]"
        );
    }
}
