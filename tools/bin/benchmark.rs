/// Benchmark of encode and decode on a synthetic 3600x1800 panorama
///
/// Time complexity: O(width * height * rounds). Encode only touches the
/// viewport columns; decode writes the full frame, so decode dominates for
/// narrow viewports.
use std::time::{Duration, Instant};

use fovea::{FoveaConfig, Foveator, Frame, Size};

fn main() -> anyhow::Result<()> {
    println!("Foveated Transcoding Benchmark");
    println!("═══════════════════════════════════");

    let size = Size::new(3600, 1800);
    let rounds = 10;
    let frame = synthetic_panorama(size);
    let foveator = Foveator::try_new(FoveaConfig::default())?;

    println!("Benchmarking: {} frame, {} rounds per azimuth", size, rounds);
    println!();

    for azimuth in [0, 90, 180, 300] {
        let mut encode = Duration::ZERO;
        let mut decode = Duration::ZERO;
        let mut record_bytes = 0;

        for _ in 0..rounds {
            let t = Instant::now();
            let record = foveator.optimize_image(&frame, azimuth, 90)?;
            encode += t.elapsed();

            let t = Instant::now();
            let restored = foveator.extract_image(&record)?;
            decode += t.elapsed();

            record_bytes = record.byte_size();
            assert_eq!(restored.size(), size);
        }

        println!("Azimuth {azimuth:>3}°:");
        println!("  encode: {:.2} ms per frame", per_frame_ms(encode, rounds));
        println!("  decode: {:.2} ms per frame", per_frame_ms(decode, rounds));
        println!(
            "  record: {} bytes ({:.1}% of {} source bytes)",
            record_bytes,
            record_bytes as f64 / frame.byte_len() as f64 * 100.0,
            frame.byte_len()
        );
    }
    Ok(())
}

fn per_frame_ms(total: Duration, rounds: u32) -> f64 {
    total.as_secs_f64() * 1000.0 / f64::from(rounds)
}

fn synthetic_panorama(size: Size) -> Frame {
    Frame::from_fn(size, |x, y| {
        [
            (x * 255 / size.w) as u8,
            (y * 255 / size.h) as u8,
            ((x ^ y) & 0xff) as u8,
            255,
        ]
    })
}
