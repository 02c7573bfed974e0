#![no_main]
use libfuzzer_sys::fuzz_target;
use zenqoi::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Header probe and full decode must never panic
    let _ = ImageInfo::from_bytes(data);
    let Ok(image) = DecodeRequest::new(data).with_limits(&limits).decode() else {
        return;
    };

    // Placement is a view; re-encoding it through the generic path must
    // reproduce the canonical bytes.
    let view = place(&image);
    let again = EncodeRequest::new()
        .with_color_space(image.color_space())
        .transcode(&view, enough::Unstoppable, &mut NoProgress)
        .expect("placed raster re-encodes");
    let Outcome::Complete(again) = again else {
        panic!("Unstoppable aborted");
    };
    assert_eq!(again.pixels(), image.pixels(), "placement roundtrip mismatch");
});
