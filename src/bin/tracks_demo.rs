use feature_tracks::config::tracks;
use feature_tracks::diagnostics::{BuildStage, BuildTrace, TrackStatistics};
use feature_tracks::io::{load_matches_json, write_json_file, write_tracks_dump};
use feature_tracks::{TrackIndex, TracksBuilder};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoReport<'a> {
    trace: &'a BuildTrace,
    statistics: &'a TrackStatistics,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = tracks::load_config(Path::new(&config_path))?;

    let matches = load_matches_json(&config.input)?;
    let mut builder = TracksBuilder::new(config.build.clone());
    let report = builder
        .process_with_diagnostics(&matches)
        .map_err(|e| format!("Track build failed: {e}"))?;

    let trace = report.trace;
    let index = TrackIndex::new(report.tracks);
    let statistics = index.statistics();
    print_text_summary(&trace, &statistics);

    if let Some(path) = &config.output.json_out {
        write_json_file(
            path,
            &DemoReport {
                trace: &trace,
                statistics: &statistics,
            },
        )?;
        println!("\nJSON report written to {}", path.display());
    }
    if let Some(path) = &config.output.dump_out {
        write_tracks_dump(path, &builder)?;
        println!("Track dump written to {}", path.display());
    }
    Ok(())
}

fn print_text_summary(trace: &BuildTrace, stats: &TrackStatistics) {
    let fusion = &trace.fusion;
    println!("Fusion");
    println!(
        "  pairs={} correspondences={} features={} classes={}",
        fusion.view_pairs, fusion.correspondences, fusion.features, fusion.classes
    );

    let filter = &trace.filter;
    println!(
        "Filter: kept={}/{} short={} collision={} min_length={} parallel={}",
        filter.kept,
        filter.classes_in,
        filter.rejected_short,
        filter.rejected_collision,
        filter.min_length,
        filter.parallel
    );
    if trace.export.rejected_mixed_descriptor > 0 {
        println!(
            "Export: skipped {} classes with mixed descriptor types",
            trace.export.rejected_mixed_descriptor
        );
    }

    println!(
        "\nTracks: count={} views={} observations={} mean_length={:.2}",
        stats.tracks, stats.views, stats.observations, stats.mean_length
    );
    for (len, count) in &stats.length_histogram {
        println!("  length {len}: {count}");
    }

    print!("\nTimings (ms):");
    for stage in BuildStage::ALL {
        if let Some(ms) = trace.timings.stage_ms(stage) {
            print!(" {stage}={ms:.3}");
        }
    }
    println!(
        " overhead={:.3} total={:.3}",
        trace.timings.overhead_ms(),
        trace.timings.total_ms
    );
}

fn usage() -> String {
    "Usage: tracks_demo <config.json>".to_string()
}
