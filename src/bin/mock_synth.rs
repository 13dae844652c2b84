//! Mock synth host binary for integration testing
//!
//! Implements the target side of the process contract without any audio
//! engine: parses `--duration` and `--param` flags, drains the MIDI bytes
//! from stdin, and writes the corresponding number of zero bytes of "PCM"
//! to stdout with the batch-mode marker on stderr.
//!
//! Fault injection for tests via environment variables:
//! - `MOCK_SYNTH_BYTES`    emit exactly this many bytes instead of the
//!   computed size
//! - `MOCK_SYNTH_SLEEP_MS` stall this long before writing output
//! - `MOCK_SYNTH_EXIT`     exit with this code after writing
//! - `MOCK_SYNTH_QUIET`    suppress all stderr diagnostics

use std::io::{Read, Write};
use std::time::Duration;

const SAMPLE_RATE: u64 = 44_100;
const CHANNELS: u64 = 2;
const BYTES_PER_SAMPLE: u64 = 4;

fn main() {
    let mut duration_secs: f64 = 0.0;
    let mut params: Vec<String> = Vec::new();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--duration" if i + 1 < args.len() => {
                duration_secs = args[i + 1].parse().unwrap_or(0.0);
                i += 2;
            }
            "--param" if i + 1 < args.len() => {
                params.push(args[i + 1].clone());
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let quiet = std::env::var("MOCK_SYNTH_QUIET").is_ok();

    if !quiet {
        eprintln!("[SimpleSynthHost] Batch mode (duration={duration_secs}s)");
        for param in &params {
            eprintln!("[SimpleSynthHost] Applying parameter {param}");
        }
    }

    // Drain the MIDI event stream; the byte count is reported but the
    // events themselves are ignored.
    let mut midi = Vec::new();
    let _ = std::io::stdin().read_to_end(&mut midi);
    if !quiet {
        eprintln!("[SimpleSynthHost] Received {} MIDI bytes", midi.len());
    }

    if let Ok(ms) = std::env::var("MOCK_SYNTH_SLEEP_MS") {
        if let Ok(ms) = ms.parse::<u64>() {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }

    let total = match std::env::var("MOCK_SYNTH_BYTES") {
        Ok(n) => n.parse::<u64>().unwrap_or(0),
        Err(_) => {
            (duration_secs * (SAMPLE_RATE * CHANNELS * BYTES_PER_SAMPLE) as f64) as u64
        }
    };

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    let chunk = [0u8; 65_536];
    let mut remaining = total as usize;
    while remaining > 0 {
        let n = remaining.min(chunk.len());
        if writer.write_all(&chunk[..n]).is_err() {
            break;
        }
        remaining -= n;
    }
    let _ = writer.flush();

    let code = std::env::var("MOCK_SYNTH_EXIT")
        .ok()
        .and_then(|c| c.parse::<i32>().ok())
        .unwrap_or(0);
    std::process::exit(code);
}
