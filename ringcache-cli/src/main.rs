//  Copyright 2026 ringcache authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

mod args;
mod demo_source;
mod identity;
mod prefilter;

use std::sync::Arc;

use clap::Parser;
use ringcache::{GroupDirectory, Group, HttpPeerClient, PeerGetter, Registry, RingPeerPicker};
use tokio::net::TcpListener;

use args::Args;
use demo_source::DemoOrigin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let self_id = identity::normalize(&args.self_addr);

    let registry = Arc::new(Registry::new());
    let group = Arc::new(Group::new(
        args.group.clone(),
        args.cache_bytes.as_u64() as usize,
        Arc::new(DemoOrigin::new(args.enable_prefilter)),
    ));

    let peer_addrs: Vec<String> = args
        .peers
        .iter()
        .map(|addr| identity::normalize(addr))
        .filter(|addr| !addr.is_empty() && addr != "http://")
        .collect();

    if !peer_addrs.is_empty() {
        let picker = Arc::new(RingPeerPicker::new(self_id.clone(), args.replicas));
        let http = reqwest::Client::new();
        let mut peers = Vec::with_capacity(peer_addrs.len() + 1);
        // Include self in the ring so keys that hash to this node route
        // locally; `RingPeerPicker::pick_peer` short-circuits to `None`
        // before ever touching this client.
        peers.push((
            self_id.clone(),
            Arc::new(HttpPeerClient::new(self_id.clone(), ringcache::DEFAULT_BASE_PATH, http.clone()))
                as Arc<dyn PeerGetter>,
        ));
        for peer_addr in &peer_addrs {
            peers.push((
                peer_addr.clone(),
                Arc::new(HttpPeerClient::new(peer_addr.clone(), ringcache::DEFAULT_BASE_PATH, http.clone()))
                    as Arc<dyn PeerGetter>,
            ));
        }
        picker.set_peers(peers);
        group.register_peers(picker);
        tracing::info!(self_id = %self_id, peers = ?peer_addrs, "peer picker registered");
    } else {
        tracing::info!(self_id = %self_id, "running single-node, no peers configured");
    }

    registry
        .register(group)
        .map_err(|err| anyhow::anyhow!("{err}"))?;

    let directory: Arc<dyn GroupDirectory> = registry;
    let router = ringcache::router(directory, ringcache::DEFAULT_BASE_PATH);

    let listener = TcpListener::bind(&args.listen).await?;
    tracing::info!(listen = %args.listen, self_id = %self_id, "ringcached listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler, shutting down anyway");
    }
    tracing::info!("shutdown signal received");
}
