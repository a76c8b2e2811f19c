//! Boundary fetcher worker.

use anyhow::{Context, Result};
use std::sync::{
    Arc, Mutex,
    mpsc::{self},
};
use std::thread;

use crate::boundary::parser::parse_boundary;
use crate::boundary::types::{BoundaryChannels, BoundaryCommand, BoundaryDataset, BoundaryResult};

pub fn start_boundary_worker() -> BoundaryChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<BoundaryCommand>();
    let (res_tx, res_rx) = mpsc::channel::<BoundaryResult>();

    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        rt.block_on(async move {
            let client = reqwest::Client::new();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BoundaryCommand::Fetch { url } => {
                        println!("[BOUNDARY FETCH] url={}", url);
                        let msg = match fetch_boundary(&client, &url).await {
                            Ok(dataset) => {
                                println!(
                                    "[BOUNDARY FETCH] geometries={} rings={}",
                                    dataset.geometries.len(),
                                    dataset.ring_count()
                                );
                                BoundaryResult::Loaded { dataset }
                            }
                            Err(err) => {
                                eprintln!("[BOUNDARY FETCH] failed: {:#}", err);
                                BoundaryResult::Error {
                                    error: format!("{:#}", err),
                                }
                            }
                        };
                        let _ = res_tx.send(msg);
                    }
                }
            }
        });
    });

    BoundaryChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}

async fn fetch_boundary(client: &reqwest::Client, url: &str) -> Result<BoundaryDataset> {
    let body = fetch_body(client, url).await?;
    parse_boundary(&body).with_context(|| format!("parse boundary from {}", url))
}

async fn fetch_body(client: &reqwest::Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .header("accept", "application/json")
        .send()
        .await
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().await.context("read response")?;
    if !status.is_success() {
        anyhow::bail!("http {} for {}", status, url);
    }
    Ok(body)
}
