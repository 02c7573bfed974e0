#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn qoi(width: u32, height: u32, channels: u8, colorspace: u8, ops: &[u8]) -> Vec<u8> {
    let mut out = b"qoif".to_vec();
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.push(channels);
    out.push(colorspace);
    out.extend_from_slice(ops);
    out.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 opaque red (QOI_OP_RGB)
    fs::write(
        format!("{dir}/rgb_1x1.qoi"),
        qoi(1, 1, 3, 0, &[0xfe, 0xff, 0x00, 0x00]),
    )
    .unwrap();

    // 1x1 half-transparent blue, linear (QOI_OP_RGBA)
    fs::write(
        format!("{dir}/rgba_linear_1x1.qoi"),
        qoi(1, 1, 4, 1, &[0xff, 0x00, 0x00, 0xff, 0x80]),
    )
    .unwrap();

    // 4x1 black run (QOI_OP_RUN, length 4)
    fs::write(format!("{dir}/run_4x1.qoi"), qoi(4, 1, 3, 0, &[0xc3])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/magic_only.qoi"), b"qoif").unwrap();
    fs::write(format!("{dir}/bad_channels.qoi"), qoi(1, 1, 2, 0, &[0xfe, 1, 2, 3])).unwrap();
    fs::write(format!("{dir}/empty"), b"").unwrap();

    let dir = "fuzz/corpus/fuzz_window";
    fs::create_dir_all(dir).unwrap();
    let mut seed = vec![4, 4, 2, 1, 1, 0, 0, 0, 0, 4, 4, 0];
    seed.extend((0..64).map(|i| i as u8 * 3));
    fs::write(format!("{dir}/rgba_4x4_full.bin"), &seed).unwrap();
    seed[3] = 1;
    seed[11] = 0b111; // three selected bands
    fs::write(format!("{dir}/rgba_4x4_bands.bin"), &seed).unwrap();
}
