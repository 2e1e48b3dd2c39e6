// Run with: cargo run -p sweep-core --example debug_scan -- /path/one /path/two
// Streams engine notifications and progress snapshots while the scan runs.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use sweep_core::{ScanConfig, ScanEngine, ScanMessage, format_size};

fn main() {
    let mut roots: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if roots.is_empty() {
        roots.push(PathBuf::from("."));
    }

    println!("Scanning: {:?}", roots);

    let engine = ScanEngine::new(ScanConfig::default());
    let rx = engine.subscribe();
    engine.start_scan(roots.clone());

    let start = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(ScanMessage::DirectoryStarted { index, path }) => {
                println!("[{:>6.1}s] START  #{index} {}", start.elapsed().as_secs_f64(), path.display());
            }
            Ok(ScanMessage::DirectoryFinished {
                index,
                bytes,
                files,
                cancelled,
                ..
            }) => {
                println!(
                    "[{:>6.1}s] FINISH #{index} files={files:<8} bytes={:<12} cancelled={cancelled}",
                    start.elapsed().as_secs_f64(),
                    format_size(bytes)
                );
            }
            Ok(ScanMessage::Completed) => {
                println!("[{:>6.1}s] COMPLETED", start.elapsed().as_secs_f64());
                break;
            }
            Ok(ScanMessage::Cancelled) => {
                println!("[{:>6.1}s] CANCELLED", start.elapsed().as_secs_f64());
                break;
            }
            Ok(ScanMessage::Started { .. }) => {}
            Err(_) => {
                // Nothing finished this second; show where the walk is
                let p = engine.progress();
                println!(
                    "[{:>6.1}s] ... {}/{} errors={} path={:?}",
                    start.elapsed().as_secs_f64(),
                    p.directories_completed,
                    p.directories_total,
                    p.errors,
                    p.current_directory
                );
                if !p.is_running {
                    break;
                }
            }
        }
    }

    engine.wait();

    println!("\nSizes:");
    for root in &roots {
        println!(
            "  {:>12}  {}",
            format_size(engine.directory_size(root).unwrap_or(0)),
            root.display()
        );
    }

    println!("\nLargest files:");
    for file in engine.top_files(10) {
        println!("  {:>12}  {}", format_size(file.size_bytes), file.path.display());
    }
}
