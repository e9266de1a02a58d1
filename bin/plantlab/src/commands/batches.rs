//! Derived batch list command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use plantlab_batch::{start_poller, BatchEndpoint, BatchFeed, FeedSnapshot, POLL_INTERVAL};
use plantlab_client::{Api, ClientConfig};

/// Print the batch view once, or keep watching it.
pub fn run(
    outdoor_ready: bool,
    derived: bool,
    watch: bool,
    output_json: bool,
    config_path: &std::path::Path,
) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = config.require_current()?;
    let api = Api::from_context(ctx)?;

    let feed = if derived {
        BatchFeed::over_derived(api)
    } else {
        let endpoint = if outdoor_ready {
            BatchEndpoint::OutdoorReady
        } else {
            BatchEndpoint::Indoor
        };
        BatchFeed::over_api(api, endpoint)
    };

    let feed = Arc::new(feed);
    feed.reload()?;
    print_snapshot(&feed.snapshot(), output_json)?;

    if watch {
        let _poller = start_poller(Arc::clone(&feed), POLL_INTERVAL);
        let mut seen = feed.revision();
        // Runs until interrupted.
        loop {
            std::thread::sleep(Duration::from_millis(500));
            let snapshot = feed.snapshot();
            if snapshot.revision != seen {
                seen = snapshot.revision;
                print_snapshot(&snapshot, output_json)?;
            }
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &FeedSnapshot, output_json: bool) -> Result<()> {
    if output_json {
        let body: Vec<serde_json::Value> = snapshot
            .options
            .iter()
            .map(|o| {
                serde_json::json!({
                    "value": o.value,
                    "label": o.label,
                    "stage": o.stage.map(|s| s.to_string()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{:20} {:30} {:10}", "BATCH", "LABEL", "STAGE");
    for option in &snapshot.options {
        let stage = option
            .stage
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:20} {:30} {:10}", option.value, option.label, stage);
    }
    println!("({} batches, revision {})", snapshot.options.len(), snapshot.revision);
    Ok(())
}
