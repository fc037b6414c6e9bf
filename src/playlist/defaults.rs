use super::Track;

/// Built-in entries used when nothing usable is persisted.
pub fn demo_tracks() -> Vec<Track> {
    vec![
        Track::new(
            "Big Buck Bunny (HLS)",
            "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8",
        )
        .with_language("en"),
        Track::new(
            "Apple Bipbop Advanced (HLS)",
            "https://devstreaming-cdn.apple.com/videos/streaming/examples/img_bipbop_adv_example_fmp4/master.m3u8",
        )
        .with_language("en"),
        Track::new(
            "Sintel Trailer (MP4)",
            "https://media.w3.org/2010/05/sintel/trailer.mp4",
        )
        .with_language("en"),
        // Older entries used `stream` instead of `stream_url`.
        Track {
            title: Some("Tears of Steel (HLS)".to_string()),
            stream: Some(
                "https://demo.unified-streaming.com/k8s/features/stable/video/tears-of-steel/tears-of-steel.ism/.m3u8"
                    .to_string(),
            ),
            lang: Some("en".to_string()),
            ..Track::default()
        },
    ]
}
